use common::{
    download::{ExportFile, filename_from_content_disposition},
    orchestrator::ExportOutcome,
    search_query::SearchQuery,
    search_result::ServerMessage,
};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use tracing::info;

use crate::client::{ApiClient, error_from_response, read_json};

impl ApiClient {
    /// `POST /export`. A JSON reply instead of a spreadsheet means the
    /// query matched nothing.
    pub async fn export(&self, query: &SearchQuery) -> anyhow::Result<ExportOutcome> {
        let response = self.http.post(self.endpoint("export")).json(query).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let headers = response.headers();
        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        if is_json {
            let body: ServerMessage = read_json(response, "export").await?;
            return Ok(ExportOutcome::NoMatch(body.message.unwrap_or("No Match Found".to_string())));
        }

        let filename = filename_from_content_disposition(headers.get(CONTENT_DISPOSITION).and_then(|v| v.to_str().ok()));
        let bytes = response.bytes().await?;
        info!("export {}: {} bytes", filename, bytes.len());
        Ok(ExportOutcome::File(ExportFile { filename, bytes: bytes.to_vec() }))
    }
}
