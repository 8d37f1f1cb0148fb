//! HTTP client: POST questions to the search endpoint, POST reports to the
//! notification endpoint.

use std::time::Duration;

use crate::config::{Config, ConfigError};
use crate::messages::{Answer, Notification, NotifyRequest, SearchRequest, SearchResponse};

/// Client error. Every variant is surfaced inline or logged by the caller;
/// nothing here retries.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("notifications are not configured")]
    NotifyDisabled,
}

/// Endpoints plus a shared connection pool. Cheap to clone.
///
/// Timeouts are per endpoint: a slow notification channel never shortens or
/// lengthens the search deadline.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    search_url: String,
    notify_url: Option<String>,
    search_timeout: Option<Duration>,
    notify_timeout: Option<Duration>,
}

impl SearchClient {
    /// Client with default transport settings (no timeout).
    pub fn new(search_url: impl Into<String>, notify_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            search_url: search_url.into(),
            notify_url,
            search_timeout: None,
            notify_timeout: None,
        }
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = Some(timeout);
        self
    }

    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = Some(timeout);
        self
    }

    /// Build from a loaded config. Fails when `search.endpoint` is absent.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let notify_url = config
            .notify
            .endpoint
            .clone()
            .filter(|e| !e.trim().is_empty());
        let mut client = Self::new(config.search_endpoint()?, notify_url);
        if let Some(secs) = config.search.timeout_secs {
            client = client.with_search_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.notify.timeout_secs {
            client = client.with_notify_timeout(Duration::from_secs(secs));
        }
        Ok(client)
    }

    pub fn search_timeout(&self) -> Option<Duration> {
        self.search_timeout
    }

    pub fn notify_timeout(&self) -> Option<Duration> {
        self.notify_timeout
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    pub fn can_notify(&self) -> bool {
        self.notify_url.is_some()
    }

    /// Ask the search endpoint. `Ok(None)` when the response carries no match.
    pub async fn search(&self, question: &str) -> Result<Option<Answer>, ClientError> {
        tracing::debug!(url = %self.search_url, question, "search request");
        let mut request = self
            .http
            .post(&self.search_url)
            .json(&SearchRequest::new(question));
        if let Some(timeout) = self.search_timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        Ok(parsed.first_answer())
    }

    /// Report a Q&A pair. The response body is only logged.
    pub async fn notify(&self, notification: &Notification) -> Result<(), ClientError> {
        let url = self.notify_url.as_deref().ok_or(ClientError::NotifyDisabled)?;
        let mut request = self.http.post(url).json(&NotifyRequest::new(notification));
        if let Some(timeout) = self.notify_timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }
        tracing::debug!(%status, body = %body, "notification delivered");
        Ok(())
    }
}
