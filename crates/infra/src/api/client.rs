//! HTTP report backend with bounded retry
//!
//! Transport failures and non-success statuses are mapped to
//! `ShiftlineError::Remote` with a [`RemoteFailureKind`]. A well-formed
//! envelope is returned untouched, including `success: false`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use shiftline_core::ReportBackend;
use shiftline_domain::{
    BackendConfig, BackendEnvelope, GanttInterval, RemoteFailureKind, Result, SessionHistoryEntry,
    ShiftlineError,
};
use tracing::{debug, info, instrument, warn};

use crate::errors::conversions::kind_for_status;
use crate::errors::InfraError;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Configuration for the report client
#[derive(Debug, Clone)]
pub struct ReportClientConfig {
    /// Base URL, e.g. `http://localhost:8080/api`
    pub base_url: String,
    pub timeout: Duration,
    /// Total attempts (initial try + retries).
    pub max_attempts: usize,
    pub base_backoff: Duration,
}

impl Default for ReportClientConfig {
    fn default() -> Self {
        Self::from(&BackendConfig::default())
    }
}

impl From<&BackendConfig> for ReportClientConfig {
    fn from(config: &BackendConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds.max(1)),
            max_attempts: 2,
            base_backoff: Duration::from_millis(200),
        }
    }
}

pub struct HttpReportBackend {
    client: ReqwestClient,
    base_url: Url,
    config: ReportClientConfig,
}

impl HttpReportBackend {
    /// # Errors
    /// Returns `ShiftlineError::Config` for an unusable base URL and
    /// `ShiftlineError::Internal` if the HTTP client cannot be built.
    pub fn new(config: ReportClientConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|err| {
            ShiftlineError::Config(format!("invalid backend URL '{}': {err}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ShiftlineError::Config(format!(
                "backend URL '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .map_err(|err| ShiftlineError::Internal(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { client, base_url, config })
    }

    /// # Errors
    /// See [`HttpReportBackend::new`].
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::new(ReportClientConfig::from(config))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ShiftlineError::Config("backend URL cannot be used as a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_envelope<T: DeserializeOwned + Default>(
        &self,
        request: RequestBuilder,
    ) -> Result<BackendEnvelope<T>> {
        let response = self.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            let message = if snippet.is_empty() {
                format!("backend returned status {status}")
            } else {
                format!("backend returned status {status}: {snippet}")
            };
            return Err(ShiftlineError::remote(kind_for_status(status.as_u16()), message));
        }

        response.json::<BackendEnvelope<T>>().await.map_err(|err| {
            ShiftlineError::remote(
                RemoteFailureKind::InvalidResponse,
                format!("failed to decode backend envelope: {err}"),
            )
        })
    }

    /// Send with retries on connection failures, timeouts and 5xx.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let attempts = self.config.max_attempts.max(1);

        for attempt in 1..=attempts {
            let request = builder
                .try_clone()
                .ok_or_else(|| ShiftlineError::Internal("request cannot be cloned".into()))?
                .build()
                .map_err(|err| ShiftlineError::from(InfraError::from(err)))?;
            let url = request.url().clone();
            debug!(attempt, %url, "sending backend request");

            match self.client.execute(request).await {
                Ok(response) if response.status().is_server_error() && attempt < attempts => {
                    warn!(attempt, %url, status = %response.status(), "backend server error, retrying");
                }
                Ok(response) => return Ok(response),
                Err(err) if attempt < attempts && (err.is_connect() || err.is_timeout()) => {
                    warn!(attempt, %url, error = %err, "backend request failed, retrying");
                }
                Err(err) => return Err(InfraError::from(err).into()),
            }

            self.sleep_with_backoff(attempt).await;
        }

        Err(ShiftlineError::Internal("backend client exhausted retries".into()))
    }

    async fn sleep_with_backoff(&self, attempt: usize) {
        let shift = attempt.saturating_sub(1).min(8) as u32;
        let delay = self.config.base_backoff.saturating_mul(1u32 << shift);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ReportBackend for HttpReportBackend {
    #[instrument(skip(self))]
    async fn get_gantt_data(
        &self,
        session_number: &str,
    ) -> Result<BackendEnvelope<Vec<GanttInterval>>> {
        let url = self.endpoint(&["sessions", session_number, "gantt"])?;
        let envelope = self.get_envelope(self.client.get(url)).await?;
        info!(session_number, success = envelope.success, "gantt data received");
        Ok(envelope)
    }

    #[instrument(skip(self))]
    async fn get_session_history(
        &self,
        days: u32,
    ) -> Result<BackendEnvelope<Vec<SessionHistoryEntry>>> {
        let url = self.endpoint(&["sessions", "history"])?;
        let envelope = self.get_envelope(self.client.get(url).query(&[("days", days)])).await?;
        info!(days, success = envelope.success, "session history received");
        Ok(envelope)
    }
}
