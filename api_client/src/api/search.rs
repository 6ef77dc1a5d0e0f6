use common::{search_query::SearchQuery, search_result::SearchResponse};
use tracing::info;

use crate::client::{ApiClient, error_from_response, read_json};

impl ApiClient {
    pub async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchResponse> {
        let response = self.http.post(self.endpoint("search")).json(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }
        let body: SearchResponse = read_json(response, "search").await?;
        info!("search {:?}: {} rows", query.keywords, body.results.len());
        Ok(body)
    }
}
