use common::status::StatusMessage;
use dioxus::prelude::*;

#[component]
pub fn StatusLine(status: StatusMessage) -> Element {
    rsx! {
        div {
            class: "status-message {status.kind.css_class()}",
            "{status.text}"
        }
    }
}
