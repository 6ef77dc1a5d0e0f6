//! Sidebar with one checkbox list per facet.

use common::{facet::Facet, selection::FacetCheckbox as FacetControl};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdRestore, md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}}};

use crate::api::search_api::SearchSession;


#[component]
pub fn SearchFacetsSidebar() -> Element {
    let mut orchestrator = use_context::<SearchSession>().orchestrator;
    rsx! {
        div {
            class: "filters-header",
            h2 { "Filters" }
            button {
                class: "btn btn-secondary",
                onclick: move |_| orchestrator.write().reset_filters(),
                Icon { icon: MdRestore, style: "width: 18px; height: 18px;" }
                "Reset Filters"
            }
        }
        for facet in Facet::ALL {
            FacetPanel { key: "{facet.wire_key()}", facet }
        }
    }
}

#[component]
fn FacetPanel(facet: Facet) -> Element {
    let mut orchestrator = use_context::<SearchSession>().orchestrator;
    let (query, controls) = {
        let orch = orchestrator.read();
        let controls: Vec<FacetControl> = orch.facet_list(facet).map(|list| list.controls().to_vec()).unwrap_or_default();
        (orch.facet_query(facet).to_string(), controls)
    };
    let checked_count = controls.iter().filter(|c| c.checked).count();

    rsx! {
        div {
            class: "facet-panel",
            div {
                class: "facet-panel-title",
                h3 { "{facet.display_name()}" }
                if checked_count > 0 {
                    span { class: "facet-checked-count", "{checked_count}" }
                }
            }
            input {
                r#type: "text",
                class: "facet-search",
                placeholder: "Search {facet.display_name()}...",
                value: "{query}",
                oninput: move |event: Event<FormData>| orchestrator.write().set_facet_query(facet, event.value()),
            }
            div {
                class: "facet-options",
                if controls.is_empty() {
                    div { class: "facet-empty", "—" }
                }
                for control in controls {
                    FacetCheckbox {
                        key: "{control.value}",
                        facet,
                        value: control.value.clone(),
                        checked: control.checked,
                    }
                }
            }
        }
    }
}

#[component]
fn FacetCheckbox(facet: Facet, value: String, checked: bool) -> Element {
    let mut orchestrator = use_context::<SearchSession>().orchestrator;
    let toggled_value = value.clone();
    rsx! {
        div {
            class: "x-facet-list-item",
            onclick: move |_e| {
                orchestrator.write().toggle_option(facet, &toggled_value);
            },

            if checked {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
            }
            div {
                class: "x-facet-list-item-label",
                title: "{value}",
                "{value}"
            }
        }
    }
}
