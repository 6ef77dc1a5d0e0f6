//! Shared HTTP plumbing for the endpoint calls in [`crate::api`].

use anyhow::Context;
use common::search_result::ServerMessage;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;


#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { http: reqwest::Client::new(), base_url: config.base_url }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// A non-2xx reply that carried the service's own `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRejection(pub String);

impl std::fmt::Display for ServerRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ServerRejection {}

/// Error for a non-2xx reply, preferring the service's own `message`.
pub(crate) async fn error_from_response(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let response_txt = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ServerMessage>(&response_txt) {
        Ok(ServerMessage { message: Some(message), .. }) if !message.is_empty() => {
            anyhow::Error::new(ServerRejection(message))
        }
        _ => anyhow::anyhow!("HTTP {}", status),
    }
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> anyhow::Result<T> {
    let response_txt = response.text().await?;
    serde_json::from_str(&response_txt).with_context(|| format!("malformed {what} response"))
}
