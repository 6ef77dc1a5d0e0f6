//! Wiring between the dataset service client and the page's signals.

use anyhow::Context;
use api_client::{client::ApiClient, config::ClientConfig, session::OrchestratorHandle};
use common::{download::ExportFile, orchestrator::SearchOrchestrator};
use dioxus::prelude::*;
use wasm_bindgen::{JsCast, JsValue};


/// Shared by every component on the search page.
#[derive(Clone)]
pub struct SearchSession {
    pub orchestrator: Signal<SearchOrchestrator>,
    pub client: ApiClient,
}

/// Writes go through the signal so dependent components re-render.
#[derive(Clone, Copy)]
pub struct SignalHandle(pub Signal<SearchOrchestrator>);

impl OrchestratorHandle for SignalHandle {
    fn update<R>(&mut self, f: impl FnOnce(&mut SearchOrchestrator) -> R) -> R {
        let mut orchestrator = self.0.write();
        f(&mut *orchestrator)
    }
}

/// The service is served from the same origin as the page.
pub fn api_client() -> ApiClient {
    let origin = web_sys::window().and_then(|window| window.location().origin().ok());
    let config = match origin {
        Some(origin) => ClientConfig::new(origin),
        None => ClientConfig::default(),
    };
    ApiClient::new(config)
}

fn js_error(err: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", err)
}

/// Hands the exported spreadsheet to the browser as a download.
pub fn save_export_file(file: &ExportFile) -> anyhow::Result<()> {
    let window = web_sys::window().context("no window")?;
    let document = window.document().context("no document")?;
    let body = document.body().context("no document body")?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(file.bytes.as_slice()));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| anyhow::anyhow!("created element is not an anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    body.append_child(&anchor).map_err(js_error)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_error)?;
    web_sys::Url::revoke_object_url(&url).map_err(js_error)?;
    Ok(())
}
