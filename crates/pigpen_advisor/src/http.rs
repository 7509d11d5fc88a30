//! HTTP client for a remote move advisor.

use crate::wire::{MoveRequest, MoveResponse};
use async_trait::async_trait;
use pigpen_board::{Advice, AdviceQuery, Advisor, AdvisorError};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Advisor backed by a remote `/api/move` endpoint.
#[derive(Debug, Clone)]
pub struct HttpAdvisor {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAdvisor {
    /// Creates a client for the service at `base_url`.
    ///
    /// Requests that take longer than `timeout` fail with an [`AdvisorError`].
    #[instrument]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AdvisorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdvisorError::new(format!("Failed to build HTTP client: {}", e)))?;
        info!("Creating HTTP advisor");
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The service root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/api/move", self.base_url)
    }
}

#[async_trait]
impl Advisor for HttpAdvisor {
    #[instrument(skip(self, query), fields(token = %query.token))]
    async fn suggest(&self, query: &AdviceQuery) -> Result<Advice, AdvisorError> {
        let request = MoveRequest::from(query);
        debug!(walls = request.walls.len(), "Sending advice request");

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Advice request failed");
                AdvisorError::new(format!("Advice request failed: {}", e))
            })?;

        // A 500 with a JSON body is the "no move" answer, not a failure.
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read advice response");
            AdvisorError::new(format!("Failed to read response: {}", e))
        })?;

        let parsed: MoveResponse = serde_json::from_str(&body).map_err(|e| {
            error!(status = %status, body = %body, "Unparseable advice response");
            AdvisorError::new(format!("Advisor returned {}: {}", status, e))
        })?;

        debug!(status = %status, has_move = parsed.has_move(), "Advice received");
        Ok(parsed.into())
    }

    fn name(&self) -> &str {
        "http"
    }
}
