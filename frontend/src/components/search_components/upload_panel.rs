//! File picker, upload progress and information about the loaded dataset.

use api_client::session::{perform_clear_upload, perform_upload};
use common::{status::StatusMessage, upload::ProgressBar};
use dioxus::{logger::tracing, prelude::*};
use dioxus_free_icons::{Icon, icons::{md_file_icons::MdFileUpload, md_navigation_icons::MdClose}};
use futures_channel::mpsc;
use futures_util::StreamExt;
use gloo_timers::future::TimeoutFuture;

use crate::{
    api::search_api::{SearchSession, SignalHandle},
    components::search_components::status_line::StatusLine,
};

const PROGRESS_HIDE_DELAY_MS: u32 = 800;

#[derive(Clone, PartialEq)]
struct SelectedFile {
    name: String,
    bytes: Vec<u8>,
}

#[component]
pub fn UploadPanel() -> Element {
    let session = use_context::<SearchSession>();
    let orchestrator = session.orchestrator;
    let mut selected = use_signal(|| None::<SelectedFile>);
    let mut progress_bar = use_signal(ProgressBar::default);

    let on_file_change = move |event: Event<FormData>| {
        let Some(file) = event.files().into_iter().next() else {
            selected.set(None);
            return;
        };
        spawn(async move {
            let name = file.name();
            match file.read_bytes().await {
                Ok(bytes) => selected.set(Some(SelectedFile { name, bytes: bytes.to_vec() })),
                Err(e) => {
                    tracing::warn!("could not read {}: {:?}", name, e);
                    selected.set(None);
                }
            }
        });
    };

    let upload_session = session.clone();
    let on_upload = move |_| {
        let session = upload_session.clone();
        let file = selected.peek().clone();
        let run = progress_bar.write().start();
        spawn(async move {
            let (name, bytes) = match file {
                Some(file) => (Some(file.name), file.bytes),
                None => (None, Vec::new()),
            };
            let (tx, mut rx) = mpsc::unbounded::<u8>();
            spawn(async move {
                while let Some(pct) = rx.next().await {
                    progress_bar.write().show(run, pct);
                }
            });
            let mut handle = SignalHandle(session.orchestrator);
            let on_progress = move |pct: u8| {
                let _ = tx.unbounded_send(pct);
            };
            perform_upload(&session.client, &mut handle, name.as_deref(), bytes, on_progress).await;
            TimeoutFuture::new(PROGRESS_HIDE_DELAY_MS).await;
            progress_bar.write().hide(run);
        });
    };

    let clear_session = session.clone();
    let on_clear = move |_| {
        let session = clear_session.clone();
        spawn(async move {
            let mut handle = SignalHandle(session.orchestrator);
            perform_clear_upload(&session.client, &mut handle).await;
            selected.set(None);
        });
    };

    let orch = orchestrator.read();
    let is_uploading = orch.is_uploading();
    let dataset = orch.dataset().cloned();
    let status = orch
        .upload_status()
        .cloned()
        .unwrap_or(StatusMessage::info("Upload an Excel file to begin"));
    drop(orch);
    let upload_pct = progress_bar.read().percent();

    let button_label = match (is_uploading, selected.read().as_ref()) {
        (true, _) => "Uploading...".to_string(),
        (false, Some(file)) => format!("Upload: {}", file.name),
        (false, None) => "Upload File".to_string(),
    };

    rsx! {
        div {
            class: "upload-panel",
            h2 { "Upload Data" }
            div {
                class: "upload-controls",
                input {
                    r#type: "file",
                    accept: ".xlsx,.csv",
                    onchange: on_file_change,
                }
                button {
                    class: "btn btn-primary",
                    disabled: is_uploading,
                    onclick: on_upload,
                    Icon { icon: MdFileUpload, style: "width: 18px; height: 18px;" }
                    "{button_label}"
                }
            }
            if let Some(pct) = upload_pct {
                div {
                    class: "upload-progress",
                    progress { max: "100", value: "{pct}" }
                    span { "{pct}%" }
                }
            }
            StatusLine { status }
            if let Some(dataset) = dataset {
                div {
                    class: "file-info",
                    p { "File: " strong { "{dataset.file_name}" } }
                    p { "Rows: " strong { "{dataset.row_count}" } }
                    button {
                        class: "btn btn-secondary",
                        onclick: on_clear,
                        Icon { icon: MdClose, style: "width: 18px; height: 18px;" }
                        "Clear Upload"
                    }
                }
            }
        }
    }
}
