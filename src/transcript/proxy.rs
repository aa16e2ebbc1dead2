//! HTTP client for the transcript extraction service.

use super::{TranscriptResult, TranscriptSource};
use crate::config::TranscriptSettings;
use crate::error::{NotesError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Path of the transcript endpoint on the extraction service.
pub const TRANSCRIPT_PATH: &str = "api/py/youtube-transcript";

/// Path of the extraction service's health endpoint.
pub const HEALTH_PATH: &str = "api/py/helloFastApi";

const GENERIC_FAILURE: &str = "Failed to fetch transcript";

#[derive(Serialize)]
struct TranscriptRequest<'a> {
    url: &'a str,
    lang: &'a str,
}

/// Error body returned by the service on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Forwards transcript requests to the extraction service.
///
/// Each call is a single attempt bounded by a hard deadline. The service may
/// be cold-starting, so a slow response fails fast instead of being retried.
pub struct TranscriptProxy {
    client: reqwest::Client,
    endpoint: Url,
    health_endpoint: Url,
    timeout: Duration,
}

impl TranscriptProxy {
    /// Create a proxy for the service at `service_url`.
    pub fn new(service_url: &str, timeout: Duration) -> Result<Self> {
        let base = if service_url.ends_with('/') {
            service_url.to_string()
        } else {
            format!("{}/", service_url)
        };
        let base = Url::parse(&base)
            .map_err(|e| NotesError::Config(format!("Invalid transcript service URL '{}': {}", service_url, e)))?;

        let endpoint = base
            .join(TRANSCRIPT_PATH)
            .map_err(|e| NotesError::Config(e.to_string()))?;
        let health_endpoint = base
            .join(HEALTH_PATH)
            .map_err(|e| NotesError::Config(e.to_string()))?;

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            endpoint,
            health_endpoint,
            timeout,
        })
    }

    /// Create a proxy from settings.
    pub fn from_settings(settings: &TranscriptSettings) -> Result<Self> {
        Self::new(&settings.service_url, settings.timeout())
    }

    /// The full transcript endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check that the service is reachable, under the same deadline.
    pub async fn ping(&self) -> Result<()> {
        let request = async {
            let response = self
                .client
                .get(self.health_endpoint.clone())
                .send()
                .await
                .map_err(transport_error)?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(NotesError::Upstream {
                    status: response.status().as_u16(),
                    message: format!("Health check returned {}", response.status()),
                })
            }
        };

        with_deadline(self.timeout, request).await
    }

    async fn send(&self, url: &str, lang: &str) -> Result<TranscriptResult> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&TranscriptRequest { url, lang })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .map(detail_message)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());

            warn!("Transcript service returned {}: {}", status, message);
            return Err(NotesError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let result = response.json::<TranscriptResult>().await.map_err(|e| NotesError::Upstream {
            status: 502,
            message: format!("Invalid response from transcript service: {}", e),
        })?;

        debug!(
            "Received transcript ({} chars, status {})",
            result.transcript.len(),
            result.status
        );
        Ok(result)
    }
}

#[async_trait]
impl TranscriptSource for TranscriptProxy {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_transcript(&self, url: &str, lang: &str) -> Result<TranscriptResult> {
        with_deadline(self.timeout, self.send(url, lang)).await
    }
}

/// Run `request` under a deadline. When the deadline fires first the request
/// future is dropped, which cancels it.
pub(crate) async fn with_deadline<F, T>(deadline: Duration, request: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, request).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Transcript request exceeded {:?} deadline, cancelled", deadline);
            Err(NotesError::Timeout(deadline))
        }
    }
}

fn transport_error(e: reqwest::Error) -> NotesError {
    NotesError::Upstream {
        status: 500,
        message: format!("{}: {}", GENERIC_FAILURE, e),
    }
}

fn detail_message(detail: serde_json::Value) -> String {
    match detail {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
