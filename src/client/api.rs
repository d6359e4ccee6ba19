//! Core `GenerationClient` trait and the reqwest-backed implementation.
//!
//! [`HttpGenerationClient`] posts JSON to the endpoints named in
//! [`ServiceConfig`]; nothing is hardcoded here.  No timeout, no retry: one
//! submission is exactly one request.

use async_trait::async_trait;
use thiserror::Error;

use crate::client::wire::{ErrorBody, GenerateRequest, RequestResult, ServiceHealth};
use crate::config::ServiceConfig;
use crate::form::{FormMode, SubmissionPayload};

/// Shown when the service fails without saying why.
pub const GENERIC_FAILURE: &str = "Ein Fehler ist aufgetreten";

/// Shown when a failure carries no usable message at all.
pub const UNKNOWN_FAILURE: &str = "Ein unbekannter Fehler ist aufgetreten";

// ---------------------------------------------------------------------------
// GenerationError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to the generation service.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The service answered with a non-success status.  `message` is the
    /// server's own text, or [`GENERIC_FAILURE`].
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Connection, DNS or I/O failure; no response was received.
    #[error("Verbindung zum Dienst fehlgeschlagen: {0}")]
    Transport(String),

    /// A success response whose body could not be read or parsed.
    #[error("Antwort des Dienstes konnte nicht gelesen werden: {0}")]
    Decode(String),
}

impl GenerationError {
    /// The string to put in front of the user.  Never empty.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Remote { message, .. } if !message.trim().is_empty() => {
                message.clone()
            }
            GenerationError::Remote { .. } => GENERIC_FAILURE.to_string(),
            GenerationError::Transport(detail) | GenerationError::Decode(detail)
                if detail.trim().is_empty() =>
            {
                UNKNOWN_FAILURE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GenerationError::Decode(e.to_string())
        } else {
            GenerationError::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationClient trait
// ---------------------------------------------------------------------------

/// Async seam between the orchestrator and the remote service.
///
/// Implementors must be `Send + Sync` so they can be held behind
/// `Arc<dyn GenerationClient>` inside the orchestrator task.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Submit one payload and wait for the finished video.
    async fn generate(&self, payload: &SubmissionPayload) -> Result<RequestResult, GenerationError>;

    /// Probe the service health endpoint.
    async fn health(&self) -> Result<ServiceHealth, GenerationError>;
}

// ---------------------------------------------------------------------------
// HttpGenerationClient
// ---------------------------------------------------------------------------

/// Talks to the generation service over HTTP/JSON.
pub struct HttpGenerationClient {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpGenerationClient {
    /// Build a client from the service section of the app config.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("text-to-video/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("client: custom HTTP client unavailable ({e}); using defaults");
                reqwest::Client::new()
            });

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Full URL of the generation endpoint for `mode`.
    pub fn endpoint_for(&self, mode: FormMode) -> String {
        match mode {
            FormMode::Simple => self.config.endpoint(&self.config.simple_path),
            FormMode::Extended => self.config.endpoint(&self.config.extended_path),
        }
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(&self, payload: &SubmissionPayload) -> Result<RequestResult, GenerationError> {
        let url = self.endpoint_for(payload.mode);
        let body = GenerateRequest::from(payload);

        log::debug!("client: POST {url} ({} chars)", body.audio_text.chars().count());

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        log::debug!("client: {url} answered {status}");

        if !status.is_success() {
            // Unreadable or message-less error bodies map to the generic text.
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message().map(str::to_string))
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(GenerationError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))?;
        serde_json::from_str::<RequestResult>(&text).map_err(|e| GenerationError::Decode(e.to_string()))
    }

    async fn health(&self) -> Result<ServiceHealth, GenerationError> {
        let url = self.config.endpoint(&self.config.health_path);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(GenerationError::Remote {
                status: status.as_u16(),
                message: format!("Dienst meldet Status {}", status.as_u16()),
            });
        }

        response
            .json::<ServiceHealth>()
            .await
            .map_err(|e| GenerationError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_message_is_shown_verbatim() {
        let err = GenerationError::Remote {
            status: 429,
            message: "quota exceeded".into(),
        };
        assert_eq!(err.user_message(), "quota exceeded");
    }

    #[test]
    fn blank_remote_message_uses_generic_fallback() {
        let err = GenerationError::Remote {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn transport_error_keeps_its_detail() {
        let err = GenerationError::Transport("connection refused".into());
        assert!(err.user_message().contains("connection refused"));
        assert_eq!(
            GenerationError::Transport(" ".into()).user_message(),
            UNKNOWN_FAILURE
        );
        assert_eq!(GenerationError::Decode(String::new()).user_message(), UNKNOWN_FAILURE);
    }

    #[test]
    fn endpoints_follow_mode() {
        let client = HttpGenerationClient::from_config(&ServiceConfig::default());
        assert_eq!(
            client.endpoint_for(FormMode::Simple),
            "http://localhost:5000/api/generate-free-ai-video"
        );
        assert_eq!(
            client.endpoint_for(FormMode::Extended),
            "http://localhost:5000/api/generate-ai-video"
        );
    }

    #[test]
    fn client_is_object_safe() {
        let client: Box<dyn GenerationClient> =
            Box::new(HttpGenerationClient::from_config(&ServiceConfig::default()));
        drop(client);
    }
}
