use common::search_result::FiltersResponse;
use tracing::debug;

use crate::client::{ApiClient, error_from_response, read_json};

impl ApiClient {
    /// `GET /filters`: full option universes of the loaded dataset.
    pub async fn fetch_filters(&self) -> anyhow::Result<FiltersResponse> {
        let response = self.http.get(self.endpoint("filters")).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        let body: FiltersResponse = read_json(response, "filters").await?;
        debug!("filters: {} manufacturers", body.filters.manufacturers.len());
        Ok(body)
    }
}
