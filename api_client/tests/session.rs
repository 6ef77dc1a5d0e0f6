use api_client::{
    client::ApiClient,
    config::ClientConfig,
    session::{perform_clear_upload, perform_export, perform_search, perform_upload},
};
use common::{
    facet::Facet,
    orchestrator::{ResultsView, SearchOrchestrator, SearchOutcome, SessionState},
    status::StatusMessage,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

async fn mount_dataset(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "File \"items.xlsx\" uploaded successfully! (120 rows loaded)",
            "row_count": 120
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/filters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "filters": {
                "manufacturers": ["Acme", "Beta", "Zenith"],
                "sales_statuses": ["(blank)", "Active"]
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn upload_search_clear_round_trip() {
    let server = MockServer::start().await;
    mount_dataset(&server).await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": [
                {"item_no": "A1", "description": "Hex bolt", "manufacturer_name": "Acme", "sales_status": "Active"},
                {"item_no": "Z1", "description": "Carriage bolt", "manufacturer_name": "Zenith", "sales_status": "Active"},
                {"item_no": "A2", "description": "Bolt kit", "manufacturer_name": "Acme", "sales_status": "Active"}
            ],
            "count": 3
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let client = ApiClient::new(ClientConfig::new(server.uri()));
    let mut orch = SearchOrchestrator::new();

    assert!(perform_upload(&client, &mut orch, Some("items.xlsx"), b"data".to_vec(), |_: u8| {}).await);
    assert_eq!(orch.state(), SessionState::Ready);
    assert_eq!(orch.dataset().map(|d| d.row_count), Some(120));
    assert_eq!(orch.options().current(Facet::Manufacturer).to_vec(), strings(&["Acme", "Beta", "Zenith"]));

    orch.set_keywords("bolt");
    assert_eq!(perform_search(&client, &mut orch).await, Some(SearchOutcome::Results(3)));
    assert_eq!(orch.state(), SessionState::Searched);
    assert_eq!(orch.options().current(Facet::Manufacturer).to_vec(), strings(&["Acme", "Zenith"]));
    assert_eq!(orch.options().full(Facet::Manufacturer).to_vec(), strings(&["Acme", "Beta", "Zenith"]));
    assert!(matches!(orch.results(), ResultsView::Rows { count: 3, .. }));

    perform_clear_upload(&client, &mut orch).await;
    assert_eq!(orch.state(), SessionState::Idle);
    assert!(orch.options().full(Facet::Manufacturer).is_empty());
    assert_eq!(orch.results(), &ResultsView::AwaitingUpload);
}

#[tokio::test]
async fn search_without_dataset_is_never_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(ClientConfig::new(server.uri()));
    let mut orch = SearchOrchestrator::new();
    orch.set_keywords("bolt");

    assert_eq!(perform_search(&client, &mut orch).await, None);
    assert_eq!(orch.search_status(), Some(&StatusMessage::error("Please upload a file first")));
}

#[tokio::test]
async fn failed_search_keeps_previous_universes() {
    let server = MockServer::start().await;
    mount_dataset(&server).await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"success": false, "message": "Search error"})))
        .mount(&server)
        .await;

    let client = ApiClient::new(ClientConfig::new(server.uri()));
    let mut orch = SearchOrchestrator::new();
    assert!(perform_upload(&client, &mut orch, Some("items.xlsx"), Vec::new(), |_: u8| {}).await);

    orch.set_keywords("bolt");
    assert_eq!(perform_search(&client, &mut orch).await, Some(SearchOutcome::Failed));
    assert_eq!(orch.state(), SessionState::Ready);
    assert_eq!(orch.options().current(Facet::Manufacturer).to_vec(), strings(&["Acme", "Beta", "Zenith"]));
    assert_eq!(orch.search_status(), Some(&StatusMessage::error("Search error")));
}

#[tokio::test]
async fn search_without_service_message_names_the_action() {
    let server = MockServer::start().await;
    mount_dataset(&server).await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = ApiClient::new(ClientConfig::new(server.uri()));
    let mut orch = SearchOrchestrator::new();
    assert!(perform_upload(&client, &mut orch, Some("items.xlsx"), Vec::new(), |_: u8| {}).await);

    orch.set_keywords("bolt");
    assert_eq!(perform_search(&client, &mut orch).await, Some(SearchOutcome::Failed));
    assert_eq!(orch.search_status(), Some(&StatusMessage::error("Search failed: HTTP 503 Service Unavailable")));
}

#[tokio::test]
async fn export_saves_only_real_files() {
    let server = MockServer::start().await;
    mount_dataset(&server).await;
    Mock::given(method("POST"))
        .and(path("/export"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"search_results_acme.xlsx\"")
                .set_body_bytes(vec![1, 2, 3]),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(ClientConfig::new(server.uri()));
    let mut orch = SearchOrchestrator::new();
    assert!(perform_upload(&client, &mut orch, Some("items.xlsx"), Vec::new(), |_: u8| {}).await);

    // nothing to export yet
    assert_eq!(perform_export(&client, &mut orch).await, None);

    orch.set_keywords("bolt");
    let file = perform_export(&client, &mut orch).await.unwrap();
    assert_eq!(file.filename, "search_results_acme.xlsx");
    assert_eq!(file.bytes, vec![1, 2, 3]);
    assert_eq!(orch.search_status(), Some(&StatusMessage::success("Export ready: search_results_acme.xlsx")));
    assert!(!orch.is_exporting());
}

#[tokio::test]
async fn rejected_upload_leaves_session_idle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"success": false, "message": "Invalid file type"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/filters"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(ClientConfig::new(server.uri()));
    let mut orch = SearchOrchestrator::new();

    assert!(!perform_upload(&client, &mut orch, Some("items.csv"), Vec::new(), |_: u8| {}).await);
    assert_eq!(orch.state(), SessionState::Idle);
    assert_eq!(orch.upload_status(), Some(&StatusMessage::error("Invalid file type")));
}

#[tokio::test]
async fn refused_upload_without_message_reads_upload_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/filters"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(ClientConfig::new(server.uri()));
    let mut orch = SearchOrchestrator::new();

    assert!(!perform_upload(&client, &mut orch, Some("items.csv"), Vec::new(), |_: u8| {}).await);
    assert_eq!(orch.state(), SessionState::Idle);
    assert_eq!(orch.upload_status(), Some(&StatusMessage::error("Upload failed")));
}
