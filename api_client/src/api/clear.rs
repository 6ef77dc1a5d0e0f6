use tracing::info;

use crate::client::{ApiClient, error_from_response};

impl ApiClient {
    /// `POST /clear`: drops the dataset held by the service.
    pub async fn clear(&self) -> anyhow::Result<()> {
        let response = self.http.post(self.endpoint("clear")).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        info!("dataset cleared on server");
        Ok(())
    }
}
