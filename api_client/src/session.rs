//! Drives the orchestrator through complete round trips against the service.
//!
//! The orchestrator is only touched between awaits, through
//! [`OrchestratorHandle::update`], so UI state containers never stay
//! borrowed while a request is in flight.

use common::{
    download::ExportFile,
    error::RequestFailure,
    orchestrator::{SearchOrchestrator, SearchOutcome},
};
use tracing::debug;

use crate::{
    api::ProgressSink,
    client::{ApiClient, ServerRejection},
};

pub trait OrchestratorHandle {
    fn update<R>(&mut self, f: impl FnOnce(&mut SearchOrchestrator) -> R) -> R;
}

impl OrchestratorHandle for SearchOrchestrator {
    fn update<R>(&mut self, f: impl FnOnce(&mut SearchOrchestrator) -> R) -> R {
        f(self)
    }
}

/// Messages the service sent itself stay distinct from transport errors.
fn request_failure(err: anyhow::Error) -> RequestFailure {
    match err.downcast::<ServerRejection>() {
        Ok(ServerRejection(message)) => RequestFailure::Rejected(message),
        Err(err) => RequestFailure::Transport(format!("{err:#}")),
    }
}

/// Uploads the file and, once accepted, loads the facet universes.
/// Returns whether the new dataset is in place.
pub async fn perform_upload<H: OrchestratorHandle, P: ProgressSink>(
    client: &ApiClient,
    handle: &mut H,
    file_name: Option<&str>,
    bytes: Vec<u8>,
    on_progress: P,
) -> bool {
    let Ok(ticket) = handle.update(|o| o.begin_upload(file_name)) else {
        return false;
    };
    let result = client.upload(&ticket.file_name, bytes, on_progress).await.map_err(request_failure);
    let Some(filters_ticket) = handle.update(move |o| o.complete_upload(ticket, result)) else {
        return false;
    };
    let filters = client.fetch_filters().await;
    handle.update(move |o| o.complete_filters_fetch(filters_ticket, filters));
    true
}

/// `None` when the search was never sent.
pub async fn perform_search<H: OrchestratorHandle>(client: &ApiClient, handle: &mut H) -> Option<SearchOutcome> {
    let ticket = match handle.update(|o| o.begin_search()) {
        Ok(ticket) => ticket,
        Err(e) => {
            debug!("search not sent: {}", e);
            return None;
        }
    };
    let result = client.search(&ticket.query).await.map_err(request_failure);
    Some(handle.update(move |o| o.complete_search(ticket, result)))
}

pub async fn perform_export<H: OrchestratorHandle>(client: &ApiClient, handle: &mut H) -> Option<ExportFile> {
    let ticket = match handle.update(|o| o.begin_export()) {
        Ok(ticket) => ticket,
        Err(e) => {
            debug!("export not sent: {}", e);
            return None;
        }
    };
    let result = client.export(&ticket.query).await.map_err(request_failure);
    handle.update(move |o| o.complete_export(result))
}

pub async fn perform_clear_upload<H: OrchestratorHandle>(client: &ApiClient, handle: &mut H) {
    let result = client.clear().await;
    handle.update(move |o| o.complete_clear_upload(result));
}
