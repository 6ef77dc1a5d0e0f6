use api_client::session::{perform_export, perform_search};
use dioxus::{logger::tracing, prelude::*};
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdSearch, md_file_icons::MdFileDownload, md_navigation_icons::MdClose}};

use crate::{
    api::search_api::{SearchSession, SignalHandle, save_export_file},
    components::search_components::status_line::StatusLine,
};


#[component]
pub fn SearchInputTopBar() -> Element {
    let session = use_context::<SearchSession>();
    let mut orchestrator = session.orchestrator;

    let search_session = session.clone();
    let trigger_search = use_callback(move |_: ()| {
        let session = search_session.clone();
        spawn(async move {
            let mut handle = SignalHandle(session.orchestrator);
            perform_search(&session.client, &mut handle).await;
        });
    });

    let export_session = session.clone();
    let trigger_export = move |_| {
        let session = export_session.clone();
        spawn(async move {
            let mut handle = SignalHandle(session.orchestrator);
            if let Some(file) = perform_export(&session.client, &mut handle).await {
                if let Err(e) = save_export_file(&file) {
                    tracing::error!("saving {} failed: {:#}", file.filename, e);
                }
            }
        });
    };

    let search_oninput = move |event: Event<FormData>| {
        orchestrator.write().set_keywords(event.value());
    };
    let search_onkeydown = move |event: Event<KeyboardData>| {
        if event.key() == Key::Enter {
            trigger_search(());
        }
    };

    let orch = orchestrator.read();
    let keywords = orch.keywords().to_string();
    let is_searching = orch.is_searching();
    let is_exporting = orch.is_exporting();
    let status = orch.search_status().cloned();
    drop(orch);

    rsx! {
        div {
            class: "search-bar",
            div {
                id: "x-search-input-search-box",
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color: #6B7280;" }
                input {
                    r#type: "text",
                    placeholder: "Search by description keywords...",
                    value: "{keywords}",
                    oninput: search_oninput,
                    onkeydown: search_onkeydown,
                }
            }
            button {
                class: "btn btn-primary",
                disabled: is_searching,
                onclick: move |_| trigger_search(()),
                if is_searching { "Searching..." } else { "Search" }
            }
            button {
                class: "btn btn-secondary",
                disabled: is_exporting,
                onclick: trigger_export,
                Icon { icon: MdFileDownload, style: "width: 18px; height: 18px;" }
                if is_exporting { "Exporting..." } else { "Export" }
            }
            button {
                class: "btn btn-secondary",
                onclick: move |_| orchestrator.write().clear_search(),
                Icon { icon: MdClose, style: "width: 18px; height: 18px;" }
                "Clear Search"
            }
        }
        if let Some(status) = status {
            StatusLine { status }
        }
    }
}
