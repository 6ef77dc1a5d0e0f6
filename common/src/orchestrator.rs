//! Search session state machine.
//!
//! Each operation against the dataset service is split into a `begin_*`
//! step, which validates and produces the request to send, and a
//! `complete_*` step, which applies the response. The caller performs the
//! request in between, so this type never does I/O itself.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::{
    download::ExportFile,
    error::{RequestFailure, ValidationError},
    facet::Facet,
    facet_filter::filter_options,
    option_store::FacetOptionStore,
    projector::project,
    search_query::SearchQuery,
    search_result::{FiltersResponse, ResultRow, SearchResponse, UploadResponse},
    selection::{FacetCheckboxList, FacetSelectionTracker},
    status::StatusMessage,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No dataset loaded.
    Idle,
    /// Dataset loaded, current universes equal the full ones.
    Ready,
    /// Current universes reflect the last result set.
    Searched,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    AwaitingUpload,
    ReadyToSearch,
    Rows { rows: Vec<ResultRow>, keywords: String, count: u64 },
    NoMatch,
}

impl ResultsView {
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            ResultsView::AwaitingUpload => Some("Upload a file and search to see results here"),
            ResultsView::ReadyToSearch => Some("Ready to search. Enter keywords above."),
            ResultsView::NoMatch => Some("No Match Found"),
            ResultsView::Rows { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub file_name: String,
    pub row_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub file_name: String,
}

/// Issued by an accepted upload; the matching `/filters` reply must carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiltersTicket {
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: SearchQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTicket {
    pub query: SearchQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    File(ExportFile),
    /// The service answered with a message instead of a spreadsheet.
    NoMatch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Results(usize),
    NoMatch,
    Failed,
    /// A newer search was issued, or the session was reset, after this one.
    Stale,
}


#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    state: SessionState,
    options: FacetOptionStore,
    tracker: FacetSelectionTracker,
    retained: BTreeMap<Facet, BTreeSet<String>>,
    facet_queries: BTreeMap<Facet, String>,
    keywords: String,
    results: ResultsView,
    dataset: Option<DatasetInfo>,
    upload_status: Option<StatusMessage>,
    search_status: Option<StatusMessage>,
    next_search_seq: u64,
    latest_search_seq: Option<u64>,
    /// Bumped whenever the loaded dataset is replaced or cleared.
    dataset_generation: u64,
    uploading: bool,
    exports_in_flight: u32,
}

impl Default for SearchOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchOrchestrator {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            options: FacetOptionStore::new(),
            tracker: FacetSelectionTracker::new(),
            retained: BTreeMap::new(),
            facet_queries: BTreeMap::new(),
            keywords: String::new(),
            results: ResultsView::AwaitingUpload,
            dataset: None,
            upload_status: None,
            search_status: None,
            next_search_seq: 1,
            latest_search_seq: None,
            dataset_generation: 0,
            uploading: false,
            exports_in_flight: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn options(&self) -> &FacetOptionStore {
        &self.options
    }

    pub fn facet_list(&self, facet: Facet) -> Option<&FacetCheckboxList> {
        self.tracker.list(facet)
    }

    pub fn checked_values(&self, facet: Facet) -> BTreeSet<String> {
        self.tracker.read_selection(facet)
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    pub fn dataset(&self) -> Option<&DatasetInfo> {
        self.dataset.as_ref()
    }

    pub fn upload_status(&self) -> Option<&StatusMessage> {
        self.upload_status.as_ref()
    }

    pub fn search_status(&self) -> Option<&StatusMessage> {
        self.search_status.as_ref()
    }

    pub fn facet_query(&self, facet: Facet) -> &str {
        self.facet_queries.get(&facet).map(String::as_str).unwrap_or("")
    }

    pub fn is_searching(&self) -> bool {
        self.latest_search_seq.is_some()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_exporting(&self) -> bool {
        self.exports_in_flight > 0
    }

    /// Everything the user has checked for `facet`, including values that
    /// are not rendered right now. Rendered controls are authoritative for
    /// the values they show.
    pub fn retained_selection(&self, facet: Facet) -> BTreeSet<String> {
        let rendered = self.tracker.rendered_values(facet);
        let mut selection: BTreeSet<String> = self
            .retained
            .get(&facet)
            .into_iter()
            .flatten()
            .filter(|value| !rendered.contains(*value))
            .cloned()
            .collect();
        selection.extend(self.tracker.read_selection(facet));
        selection
    }

    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.keywords = keywords.into();
    }

    pub fn toggle_option(&mut self, facet: Facet, value: &str) -> Option<bool> {
        self.tracker.toggle(facet, value)
    }

    pub fn set_facet_query(&mut self, facet: Facet, query: impl Into<String>) {
        self.facet_queries.insert(facet, query.into());
        self.refresh_facet(facet);
    }

    /// Snapshot the selection, rebuild the list from the current universe
    /// and the facet's text query, then re-apply the snapshot.
    fn refresh_facet(&mut self, facet: Facet) {
        let snapshot = self.retained_selection(facet);
        let visible = filter_options(self.options.current(facet), self.facet_query(facet));
        self.tracker.repopulate(facet, &visible);
        self.tracker.apply_selection(facet, &snapshot);
        self.retained.insert(facet, snapshot);
    }

    fn refresh_all(&mut self) {
        for facet in Facet::ALL {
            self.refresh_facet(facet);
        }
    }

    fn clear_selections(&mut self) {
        for facet in Facet::ALL {
            self.tracker.clear_selection(facet);
        }
        self.retained.clear();
    }

    fn invalidate_searches(&mut self) {
        if let Some(seq) = self.latest_search_seq.take() {
            debug!("discarding in-flight search #{}", seq);
        }
    }

    fn current_query(&self) -> SearchQuery {
        let selections = Facet::ALL
            .into_iter()
            .map(|facet| (facet, self.tracker.read_selection(facet)))
            .collect();
        SearchQuery::new(&self.keywords, selections)
    }

    // ---- upload ----

    pub fn begin_upload(&mut self, file_name: Option<&str>) -> Result<UploadTicket, ValidationError> {
        let file_name = match crate::upload::validate_upload_file_name(file_name) {
            Ok(name) => name.to_string(),
            Err(e) => {
                self.upload_status = Some(StatusMessage::error(e.to_string()));
                return Err(e);
            }
        };
        info!("uploading {}", file_name);
        self.uploading = true;
        self.upload_status = Some(StatusMessage::info("Uploading..."));
        Ok(UploadTicket { file_name })
    }

    /// Returns a ticket when the dataset was accepted and the facet universes
    /// should be fetched next.
    pub fn complete_upload<E: Into<RequestFailure>>(
        &mut self,
        ticket: UploadTicket,
        result: Result<UploadResponse, E>,
    ) -> Option<FiltersTicket> {
        self.uploading = false;
        match result {
            Ok(response) if response.success => {
                let row_count = response.row_count.unwrap_or(0);
                info!("upload of {} accepted: {} rows", ticket.file_name, row_count);
                self.invalidate_searches();
                self.options.clear_all();
                self.refresh_all();
                self.dataset = Some(DatasetInfo { file_name: ticket.file_name, row_count });
                self.state = SessionState::Ready;
                self.results = ResultsView::ReadyToSearch;
                self.search_status = None;
                let message = if response.message.is_empty() { "Upload complete".to_string() } else { response.message };
                self.upload_status = Some(StatusMessage::success(message));
                self.dataset_generation += 1;
                Some(FiltersTicket { generation: self.dataset_generation })
            }
            Ok(response) => {
                warn!("upload of {} rejected: {}", ticket.file_name, response.message);
                let message = if response.message.is_empty() { "Upload failed".to_string() } else { response.message };
                self.upload_status = Some(StatusMessage::error(message));
                None
            }
            Err(e) => {
                let failure: RequestFailure = e.into();
                warn!("upload of {} failed: {}", ticket.file_name, failure);
                self.upload_status = Some(StatusMessage::error(failure.status_text("Upload")));
                None
            }
        }
    }

    /// Replies for a dataset that has since been replaced or cleared are
    /// dropped.
    pub fn complete_filters_fetch<E: Display>(&mut self, ticket: FiltersTicket, result: Result<FiltersResponse, E>) {
        if ticket.generation != self.dataset_generation || self.dataset.is_none() {
            debug!("filters for dataset #{} arrived late, dropped", ticket.generation);
            return;
        }
        match result {
            Ok(response) => {
                for facet in Facet::ALL {
                    self.options.set_full(facet, response.filters.get(facet).to_vec());
                    self.refresh_facet(facet);
                }
                debug!("facet universes loaded");
            }
            Err(e) => warn!("failed to load filters: {}", e),
        }
    }

    // ---- search ----

    pub fn begin_search(&mut self) -> Result<SearchTicket, ValidationError> {
        if self.dataset.is_none() {
            self.search_status = Some(StatusMessage::error(ValidationError::NoDatasetLoaded.to_string()));
            return Err(ValidationError::NoDatasetLoaded);
        }
        let query = self.current_query();
        if !query.is_sendable() {
            self.search_status = Some(StatusMessage::info(ValidationError::EmptyQuery.to_string()));
            return Err(ValidationError::EmptyQuery);
        }
        let seq = self.next_search_seq;
        self.next_search_seq += 1;
        self.latest_search_seq = Some(seq);
        debug!("search #{} issued: {:?}", seq, query.keywords);
        Ok(SearchTicket { seq, query })
    }

    pub fn complete_search<E: Into<RequestFailure>>(&mut self, ticket: SearchTicket, result: Result<SearchResponse, E>) -> SearchOutcome {
        if self.latest_search_seq != Some(ticket.seq) {
            debug!("search #{} superseded, response dropped", ticket.seq);
            return SearchOutcome::Stale;
        }
        self.latest_search_seq = None;

        match result {
            Ok(response) if response.is_no_match() => {
                info!("search #{} matched nothing", ticket.seq);
                self.apply_projection(project(&[]));
                self.results = ResultsView::NoMatch;
                self.search_status = Some(StatusMessage::info("No Match Found"));
                self.state = SessionState::Searched;
                SearchOutcome::NoMatch
            }
            Ok(response) => {
                let row_count = response.results.len();
                let count = if response.count == 0 { row_count as u64 } else { response.count };
                info!("search #{} returned {} rows", ticket.seq, row_count);
                self.apply_projection(project(&response.results));
                self.results = ResultsView::Rows {
                    rows: response.results,
                    keywords: ticket.query.keywords,
                    count,
                };
                self.search_status = Some(StatusMessage::success(format!("Found {count} result(s)")));
                self.state = SessionState::Searched;
                SearchOutcome::Results(row_count)
            }
            Err(e) => {
                let failure: RequestFailure = e.into();
                warn!("search #{} failed: {}", ticket.seq, failure);
                self.search_status = Some(StatusMessage::error(failure.status_text("Search")));
                SearchOutcome::Failed
            }
        }
    }

    fn apply_projection(&mut self, universes: BTreeMap<Facet, Vec<String>>) {
        for (facet, values) in universes {
            self.options.set_current(facet, values);
            self.refresh_facet(facet);
        }
    }

    // ---- client-side resets ----

    pub fn reset_filters(&mut self) {
        self.invalidate_searches();
        self.clear_selections();
        for facet in Facet::ALL {
            self.options.reset_current_to_full(facet);
        }
        self.refresh_all();
        if self.dataset.is_some() {
            self.state = SessionState::Ready;
        }
        self.search_status = Some(StatusMessage::info("Filters reset"));
    }

    pub fn clear_search(&mut self) {
        self.invalidate_searches();
        self.keywords.clear();
        self.clear_selections();
        self.results = if self.dataset.is_some() { ResultsView::ReadyToSearch } else { ResultsView::AwaitingUpload };
        self.search_status = Some(StatusMessage::info("Search cleared"));
    }

    // ---- export ----

    pub fn begin_export(&mut self) -> Result<ExportTicket, ValidationError> {
        if self.dataset.is_none() {
            self.search_status = Some(StatusMessage::error(ValidationError::NoDatasetLoaded.to_string()));
            return Err(ValidationError::NoDatasetLoaded);
        }
        let query = self.current_query();
        if !query.is_sendable() {
            self.search_status = Some(StatusMessage::info(ValidationError::EmptyQuery.to_string()));
            return Err(ValidationError::EmptyQuery);
        }
        self.exports_in_flight += 1;
        Ok(ExportTicket { query })
    }

    /// Returns the file to save, only when the export succeeded.
    pub fn complete_export<E: Into<RequestFailure>>(&mut self, result: Result<ExportOutcome, E>) -> Option<ExportFile> {
        self.exports_in_flight = self.exports_in_flight.saturating_sub(1);
        match result {
            Ok(ExportOutcome::File(file)) => {
                info!("export ready: {} ({} bytes)", file.filename, file.bytes.len());
                self.search_status = Some(StatusMessage::success(format!("Export ready: {}", file.filename)));
                Some(file)
            }
            Ok(ExportOutcome::NoMatch(message)) => {
                self.search_status = Some(StatusMessage::info(message));
                None
            }
            Err(e) => {
                let failure: RequestFailure = e.into();
                warn!("export failed: {}", failure);
                self.search_status = Some(StatusMessage::error(failure.status_text("Export")));
                None
            }
        }
    }

    // ---- clear upload ----

    pub fn complete_clear_upload<E: Display>(&mut self, result: Result<(), E>) {
        match result {
            Ok(()) => {
                info!("dataset cleared");
                self.invalidate_searches();
                self.dataset_generation += 1;
                self.options.clear_all();
                self.clear_selections();
                self.refresh_all();
                self.keywords.clear();
                self.results = ResultsView::AwaitingUpload;
                self.dataset = None;
                self.state = SessionState::Idle;
                self.search_status = None;
                self.upload_status = Some(StatusMessage::success("Upload cleared. Ready for new upload."));
            }
            Err(e) => {
                warn!("clear upload failed: {}", e);
                self.upload_status = Some(StatusMessage::error("Failed to clear upload"));
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{projector::BLANK_LABEL, search_result::FacetLists, status::StatusKind};
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn row(item: &str, manufacturer: &str) -> ResultRow {
        ResultRow {
            item_no: Some(item.to_string()),
            description: Some(format!("{item} bolt")),
            manufacturer_name: Some(manufacturer.to_string()),
            sales_status: Some("Active".to_string()),
            ..Default::default()
        }
    }

    fn response(rows: Vec<ResultRow>) -> Result<SearchResponse, String> {
        let count = rows.len() as u64;
        Ok(SearchResponse { results: rows, count, no_match: false, message: None })
    }

    fn loaded() -> SearchOrchestrator {
        let mut orch = SearchOrchestrator::new();
        let ticket = orch.begin_upload(Some("items.xlsx")).unwrap();
        let accepted = orch.complete_upload::<String>(ticket, Ok(UploadResponse {
            success: true,
            message: "File \"items.xlsx\" uploaded successfully! (120 rows loaded)".to_string(),
            row_count: Some(120),
        }));
        let filters_ticket = accepted.unwrap();
        orch.complete_filters_fetch::<String>(filters_ticket, Ok(FiltersResponse {
            filters: FacetLists {
                manufacturers: strings(&["Acme", "Beta", "Zenith"]),
                sales_statuses: strings(&[BLANK_LABEL, "Active", "Obsolete"]),
                sub_items: strings(&["S1", "S2"]),
                ..Default::default()
            },
        }));
        orch
    }

    fn rendered(orch: &SearchOrchestrator, facet: Facet) -> Vec<String> {
        orch.facet_list(facet)
            .map(|l| l.controls().iter().map(|c| c.value.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn upload_makes_current_equal_full() {
        let orch = loaded();
        assert_eq!(orch.state(), SessionState::Ready);
        assert_eq!(orch.dataset(), Some(&DatasetInfo { file_name: "items.xlsx".to_string(), row_count: 120 }));
        for facet in Facet::ALL {
            assert_eq!(orch.options().current(facet), orch.options().full(facet));
        }
        assert_eq!(rendered(&orch, Facet::Manufacturer), strings(&["Acme", "Beta", "Zenith"]));
        assert_eq!(orch.results(), &ResultsView::ReadyToSearch);
    }

    #[test]
    fn rejected_file_type_sends_nothing() {
        let mut orch = SearchOrchestrator::new();
        assert_eq!(orch.begin_upload(Some("items.pdf")), Err(ValidationError::UnsupportedFileType));
        assert!(!orch.is_uploading());
        assert_eq!(orch.upload_status().map(|s| s.kind), Some(StatusKind::Error));
        assert_eq!(orch.state(), SessionState::Idle);
    }

    #[test]
    fn failed_upload_keeps_state() {
        let mut orch = SearchOrchestrator::new();
        let ticket = orch.begin_upload(Some("items.csv")).unwrap();
        let accepted = orch.complete_upload::<String>(ticket, Ok(UploadResponse {
            success: false,
            message: "Missing required 'Description' column".to_string(),
            row_count: None,
        }));
        assert_eq!(accepted, None);
        assert_eq!(orch.state(), SessionState::Idle);
        assert_eq!(orch.upload_status(), Some(&StatusMessage::error("Missing required 'Description' column")));

        let ticket = orch.begin_upload(Some("items.csv")).unwrap();
        orch.complete_upload::<String>(ticket, Ok(UploadResponse { success: false, message: String::new(), row_count: None }));
        assert_eq!(orch.upload_status(), Some(&StatusMessage::error("Upload failed")));
    }

    #[test]
    fn upload_status_text_is_prefixed_only_for_transport_errors() {
        let mut orch = SearchOrchestrator::new();
        let ticket = orch.begin_upload(Some("items.csv")).unwrap();
        orch.complete_upload(ticket, Err(RequestFailure::Rejected("Invalid file type".to_string())));
        assert_eq!(orch.upload_status(), Some(&StatusMessage::error("Invalid file type")));

        let ticket = orch.begin_upload(Some("items.csv")).unwrap();
        orch.complete_upload(ticket, Err(RequestFailure::Transport("HTTP 502 Bad Gateway".to_string())));
        assert_eq!(orch.upload_status(), Some(&StatusMessage::error("Upload failed: HTTP 502 Bad Gateway")));
    }

    #[test]
    fn filters_arriving_after_clear_are_dropped() {
        let mut orch = SearchOrchestrator::new();
        let ticket = orch.begin_upload(Some("items.xlsx")).unwrap();
        let filters_ticket = orch
            .complete_upload::<String>(ticket, Ok(UploadResponse { success: true, message: String::new(), row_count: Some(3) }))
            .unwrap();
        orch.complete_clear_upload::<String>(Ok(()));

        orch.complete_filters_fetch::<String>(filters_ticket, Ok(FiltersResponse {
            filters: FacetLists { manufacturers: strings(&["Acme"]), ..Default::default() },
        }));
        assert_eq!(orch.state(), SessionState::Idle);
        for facet in Facet::ALL {
            assert!(orch.options().full(facet).is_empty());
            assert!(orch.options().current(facet).is_empty());
            assert!(rendered(&orch, facet).is_empty());
        }
    }

    #[test]
    fn filters_for_a_replaced_dataset_are_dropped() {
        let mut orch = SearchOrchestrator::new();
        let ticket = orch.begin_upload(Some("first.csv")).unwrap();
        let first = orch
            .complete_upload::<String>(ticket, Ok(UploadResponse { success: true, message: String::new(), row_count: Some(1) }))
            .unwrap();
        let ticket = orch.begin_upload(Some("second.csv")).unwrap();
        let second = orch
            .complete_upload::<String>(ticket, Ok(UploadResponse { success: true, message: String::new(), row_count: Some(1) }))
            .unwrap();

        orch.complete_filters_fetch::<String>(second, Ok(FiltersResponse {
            filters: FacetLists { manufacturers: strings(&["Omega"]), ..Default::default() },
        }));
        orch.complete_filters_fetch::<String>(first, Ok(FiltersResponse {
            filters: FacetLists { manufacturers: strings(&["Acme"]), ..Default::default() },
        }));
        assert_eq!(orch.options().full(Facet::Manufacturer).to_vec(), strings(&["Omega"]));
        assert_eq!(rendered(&orch, Facet::Manufacturer), strings(&["Omega"]));
    }

    #[test]
    fn search_narrows_current_universe() {
        let mut orch = loaded();
        orch.set_keywords("bolt");
        let ticket = orch.begin_search().unwrap();
        assert!(orch.is_searching());
        assert_eq!(ticket.query.keywords, "bolt");
        assert!(!ticket.query.has_filters());

        let outcome = orch.complete_search(ticket, response(vec![
            row("A1", "Acme"),
            row("Z1", "Zenith"),
            row("A2", "Acme"),
        ]));
        assert_eq!(outcome, SearchOutcome::Results(3));
        assert!(!orch.is_searching());
        assert_eq!(orch.state(), SessionState::Searched);
        assert_eq!(orch.options().current(Facet::Manufacturer).to_vec(), strings(&["Acme", "Zenith"]));
        assert_eq!(orch.options().full(Facet::Manufacturer).to_vec(), strings(&["Acme", "Beta", "Zenith"]));
        assert_eq!(rendered(&orch, Facet::Manufacturer), strings(&["Acme", "Zenith"]));
        assert_eq!(orch.search_status(), Some(&StatusMessage::success("Found 3 result(s)")));
    }

    #[test]
    fn empty_query_is_rejected_without_state_change() {
        let mut orch = loaded();
        orch.set_keywords("   ");
        assert_eq!(orch.begin_search(), Err(ValidationError::EmptyQuery));
        assert!(!orch.is_searching());
        assert_eq!(orch.state(), SessionState::Ready);
        assert_eq!(orch.search_status().map(|s| s.kind), Some(StatusKind::Info));

        // a single checked facet value is enough
        orch.toggle_option(Facet::SalesStatus, BLANK_LABEL);
        let ticket = orch.begin_search().unwrap();
        assert_eq!(ticket.query.keywords, "");
        assert_eq!(ticket.query.selected(Facet::SalesStatus).cloned().collect::<Vec<_>>(), strings(&[BLANK_LABEL]));
    }

    #[test]
    fn search_without_dataset_is_rejected() {
        let mut orch = SearchOrchestrator::new();
        orch.set_keywords("bolt");
        assert_eq!(orch.begin_search(), Err(ValidationError::NoDatasetLoaded));
        assert_eq!(orch.begin_export(), Err(ValidationError::NoDatasetLoaded));
    }

    #[test]
    fn no_match_clears_current_and_reset_restores_full() {
        let mut orch = loaded();
        orch.set_keywords("unobtainium");
        let ticket = orch.begin_search().unwrap();
        let outcome = orch.complete_search::<String>(ticket, Ok(SearchResponse {
            no_match: true,
            message: Some("No Match Found".to_string()),
            ..Default::default()
        }));

        assert_eq!(outcome, SearchOutcome::NoMatch);
        assert_eq!(orch.results(), &ResultsView::NoMatch);
        for facet in Facet::ALL {
            assert!(orch.options().current(facet).is_empty());
            assert!(rendered(&orch, facet).is_empty());
        }

        orch.reset_filters();
        assert_eq!(orch.state(), SessionState::Ready);
        for facet in Facet::ALL {
            assert_eq!(orch.options().current(facet), orch.options().full(facet));
            assert!(orch.checked_values(facet).is_empty());
            assert!(orch.retained_selection(facet).is_empty());
        }
        assert_eq!(rendered(&orch, Facet::SubItem), strings(&["S1", "S2"]));
    }

    #[test]
    fn selection_sticks_across_narrowing() {
        let mut orch = loaded();
        orch.toggle_option(Facet::Manufacturer, "Acme");
        orch.set_keywords("bolt");

        let ticket = orch.begin_search().unwrap();
        orch.complete_search(ticket, response(vec![row("Z1", "Zenith")]));
        assert_eq!(rendered(&orch, Facet::Manufacturer), strings(&["Zenith"]));
        assert!(orch.checked_values(Facet::Manufacturer).is_empty());
        assert_eq!(orch.retained_selection(Facet::Manufacturer), set(&["Acme"]));

        // Acme comes back and is checked again
        let ticket = orch.begin_search().unwrap();
        orch.complete_search(ticket, response(vec![row("A1", "Acme"), row("Z1", "Zenith")]));
        assert_eq!(orch.checked_values(Facet::Manufacturer), set(&["Acme"]));

        orch.clear_search();
        assert!(orch.retained_selection(Facet::Manufacturer).is_empty());
        assert_eq!(orch.keywords(), "");
        assert_eq!(orch.results(), &ResultsView::ReadyToSearch);
    }

    #[test]
    fn unchecking_a_rendered_value_drops_it_from_retained() {
        let mut orch = loaded();
        orch.toggle_option(Facet::Manufacturer, "Acme");
        orch.toggle_option(Facet::Manufacturer, "Acme");
        orch.set_facet_query(Facet::Manufacturer, "zen");
        orch.set_facet_query(Facet::Manufacturer, "");
        assert!(orch.checked_values(Facet::Manufacturer).is_empty());
    }

    #[test]
    fn facet_text_query_hides_options_but_keeps_selection() {
        let mut orch = loaded();
        orch.toggle_option(Facet::Manufacturer, "Acme");

        orch.set_facet_query(Facet::Manufacturer, "  ZEN ");
        assert_eq!(rendered(&orch, Facet::Manufacturer), strings(&["Zenith"]));
        assert_eq!(orch.retained_selection(Facet::Manufacturer), set(&["Acme"]));

        orch.set_facet_query(Facet::Manufacturer, "");
        assert_eq!(rendered(&orch, Facet::Manufacturer), strings(&["Acme", "Beta", "Zenith"]));
        assert_eq!(orch.checked_values(Facet::Manufacturer), set(&["Acme"]));
    }

    #[test]
    fn failed_search_leaves_everything_untouched() {
        let mut orch = loaded();
        orch.set_keywords("bolt");
        let ticket = orch.begin_search().unwrap();
        orch.complete_search(ticket, response(vec![row("A1", "Acme")]));
        orch.toggle_option(Facet::Manufacturer, "Acme");
        let results_before = orch.results().clone();

        let ticket = orch.begin_search().unwrap();
        let outcome = orch.complete_search::<String>(ticket, Err("500 Internal Server Error".to_string()));
        assert_eq!(outcome, SearchOutcome::Failed);
        assert_eq!(orch.results(), &results_before);
        assert_eq!(orch.options().current(Facet::Manufacturer).to_vec(), strings(&["Acme"]));
        assert_eq!(orch.checked_values(Facet::Manufacturer), set(&["Acme"]));
        assert_eq!(orch.search_status(), Some(&StatusMessage::error("Search failed: 500 Internal Server Error")));
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut orch = loaded();
        orch.set_keywords("bolt");
        let first = orch.begin_search().unwrap();
        let second = orch.begin_search().unwrap();
        assert!(second.seq > first.seq);

        assert_eq!(orch.complete_search(second, response(vec![row("Z1", "Zenith")])), SearchOutcome::Results(1));
        assert_eq!(orch.complete_search(first, response(vec![row("A1", "Acme")])), SearchOutcome::Stale);
        assert_eq!(orch.options().current(Facet::Manufacturer).to_vec(), strings(&["Zenith"]));
    }

    #[test]
    fn reset_discards_in_flight_search() {
        let mut orch = loaded();
        orch.set_keywords("bolt");
        let ticket = orch.begin_search().unwrap();
        orch.reset_filters();
        assert_eq!(orch.complete_search(ticket, response(vec![row("A1", "Acme")])), SearchOutcome::Stale);
        assert_eq!(orch.state(), SessionState::Ready);
    }

    #[test]
    fn export_returns_file_only_on_success() {
        let mut orch = loaded();
        orch.toggle_option(Facet::Manufacturer, "Acme");
        let ticket = orch.begin_export().unwrap();
        assert!(orch.is_exporting());
        assert_eq!(ticket.query.keywords, "");

        let file = ExportFile { filename: "search_results_acme.xlsx".to_string(), bytes: vec![1, 2, 3] };
        let saved = orch.complete_export::<String>(Ok(ExportOutcome::File(file.clone())));
        assert_eq!(saved, Some(file));
        assert!(!orch.is_exporting());

        orch.begin_export().unwrap();
        assert_eq!(orch.complete_export::<String>(Err("connection reset".to_string())), None);
        assert_eq!(orch.search_status(), Some(&StatusMessage::error("Export failed: connection reset")));

        orch.begin_export().unwrap();
        let rejected = RequestFailure::Rejected("Export error: disk full".to_string());
        assert_eq!(orch.complete_export(Err(rejected)), None);
        assert_eq!(orch.search_status(), Some(&StatusMessage::error("Export error: disk full")));

        orch.begin_export().unwrap();
        assert_eq!(orch.complete_export::<String>(Ok(ExportOutcome::NoMatch("No Match Found".to_string()))), None);
        assert_eq!(orch.search_status(), Some(&StatusMessage::info("No Match Found")));
    }

    #[test]
    fn overlapping_exports_stay_busy_until_the_last_finishes() {
        let mut orch = loaded();
        orch.toggle_option(Facet::Manufacturer, "Acme");
        orch.begin_export().unwrap();
        orch.begin_export().unwrap();

        orch.complete_export::<String>(Ok(ExportOutcome::NoMatch("No Match Found".to_string())));
        assert!(orch.is_exporting());
        orch.complete_export::<String>(Err("connection reset".to_string()));
        assert!(!orch.is_exporting());
    }

    #[test]
    fn clear_upload_returns_to_idle() {
        let mut orch = loaded();
        orch.set_keywords("bolt");
        orch.toggle_option(Facet::Manufacturer, "Acme");

        orch.complete_clear_upload::<String>(Err("503".to_string()));
        assert_eq!(orch.state(), SessionState::Ready);
        assert_eq!(orch.upload_status(), Some(&StatusMessage::error("Failed to clear upload")));

        orch.complete_clear_upload::<String>(Ok(()));
        assert_eq!(orch.state(), SessionState::Idle);
        assert_eq!(orch.keywords(), "");
        assert_eq!(orch.results(), &ResultsView::AwaitingUpload);
        assert_eq!(orch.dataset(), None);
        for facet in Facet::ALL {
            assert!(orch.options().full(facet).is_empty());
            assert!(orch.options().current(facet).is_empty());
            assert!(orch.retained_selection(facet).is_empty());
        }
    }

    #[test]
    fn new_upload_replaces_narrowed_universes() {
        let mut orch = loaded();
        orch.set_keywords("bolt");
        let ticket = orch.begin_search().unwrap();
        orch.complete_search(ticket, response(vec![row("A1", "Acme")]));

        let ticket = orch.begin_upload(Some("other.csv")).unwrap();
        let filters_ticket = orch
            .complete_upload::<String>(ticket, Ok(UploadResponse { success: true, message: String::new(), row_count: Some(2) }))
            .unwrap();
        orch.complete_filters_fetch::<String>(filters_ticket, Ok(FiltersResponse {
            filters: FacetLists { manufacturers: strings(&["Omega"]), ..Default::default() },
        }));
        assert_eq!(orch.state(), SessionState::Ready);
        assert_eq!(orch.options().current(Facet::Manufacturer).to_vec(), strings(&["Omega"]));
    }
}
