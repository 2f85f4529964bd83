//! Client for the Practicum homework status API

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::io::HttpClient;
use crate::BotError;

/// Fetches raw homework status payloads
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.practicum.endpoint);

        Self {
            endpoint: config.practicum.endpoint.clone(),
            authorization: format!("OAuth {}", config.credentials.practicum_token),
            http,
        }
    }

    /// Request statuses changed since `from_date` and decode the body.
    ///
    /// The payload is returned as-is; shape checks live in
    /// [`crate::response::check_response`].
    pub async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .map_err(|e| BotError::ApiConnect(format!("{} unreachable: {}", self.endpoint, e)))?;

        if response.status != 200 {
            return Err(BotError::ApiConnect(format!(
                "{} returned status {}: {}",
                self.endpoint, response.status, response.body
            )));
        }

        tracing::info!("Received response from {}", self.endpoint);

        serde_json::from_str(&response.body).map_err(|e| BotError::ApiResponse(e.to_string()))
    }
}
