//! History endpoint client.

use std::time::Duration;

use async_trait::async_trait;

use bellhop_core::error::{AppError, ErrorKind};
use bellhop_core::result::AppResult;
use bellhop_entity::{HistoryResponse, Notification};
use bellhop_feed::traits::HistoryClient;

use bellhop_core::config::backend::BackendConfig;

/// Client for `GET <base>/admin/notifications?limit=N` with bearer
/// authentication.
#[derive(Debug, Clone)]
pub struct HttpHistoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHistoryClient {
    /// Creates a client from the backend configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl HistoryClient for HttpHistoryClient {
    async fn recent(&self, token: &str, limit: u32) -> AppResult<Vec<Notification>> {
        let url = format!("{}/admin/notifications", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("History request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "History request returned {status}"
            )));
        }

        let body: HistoryResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("History response parse failed: {e}"),
                e,
            )
        })?;

        if !body.success {
            return Err(AppError::external_service(
                "History endpoint reported failure",
            ));
        }

        Ok(body.items)
    }
}
