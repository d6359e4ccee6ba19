//! JSON bodies exchanged with the generation service.

use serde::{Deserialize, Serialize};

use crate::form::{FormMode, GenerationOptions, SubmissionPayload};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of both generation endpoints.  `options` is only present on the
/// extended flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub audio_text: String,
    pub video_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerationOptions>,
}

impl From<&SubmissionPayload> for GenerateRequest {
    fn from(payload: &SubmissionPayload) -> Self {
        Self {
            audio_text: payload.primary_text.clone(),
            video_description: payload.auxiliary_text.clone(),
            options: match payload.mode {
                FormMode::Simple => None,
                FormMode::Extended => Some(payload.options),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Successful generation response.  Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestResult {
    /// Absolute or root-relative address of the generated video.
    #[serde(rename = "url")]
    pub media_locator: String,
    #[serde(rename = "message", default)]
    pub status_message: Option<String>,
    /// e.g. `"FREE"`.
    #[serde(rename = "cost", default)]
    pub cost_indicator: Option<String>,
    #[serde(rename = "type", default)]
    pub media_kind: Option<String>,
    /// Address of the narration track, if the service exposes it.
    #[serde(rename = "audio_url", default)]
    pub audio_locator: Option<String>,
    #[serde(default)]
    pub service_used: Option<String>,
}

impl RequestResult {
    pub fn is_free(&self) -> bool {
        self.cost_indicator.as_deref() == Some("FREE")
    }
}

/// Failure body: `{ "error": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The server's message, if present and non-blank.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// `GET /api/health` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Language;

    fn payload(mode: FormMode) -> SubmissionPayload {
        SubmissionPayload {
            primary_text: "Hallo Welt".into(),
            auxiliary_text: "Ein Park".into(),
            options: GenerationOptions {
                language: Language::En,
                ..GenerationOptions::default()
            },
            mode,
        }
    }

    #[test]
    fn simple_request_has_no_options_field() {
        let body = serde_json::to_value(GenerateRequest::from(&payload(FormMode::Simple))).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "audioText": "Hallo Welt", "videoDescription": "Ein Park" })
        );
    }

    #[test]
    fn extended_request_carries_options() {
        let body =
            serde_json::to_value(GenerateRequest::from(&payload(FormMode::Extended))).unwrap();
        assert_eq!(body["options"]["language"], "en");
        assert_eq!(body["options"]["style"], "explainer");
        assert_eq!(body["options"]["resolution"], "1080p");
        assert_eq!(body["options"]["voice"], "anna");
    }

    #[test]
    fn result_parses_full_success_body() {
        let result: RequestResult = serde_json::from_str(
            r#"{
                "success": true,
                "url": "/output/final.mp4",
                "audio_url": "/output/speech.mp3",
                "message": "done",
                "cost": "FREE",
                "service_used": "free_ai_services",
                "processing_time": 1700000000.5
            }"#,
        )
        .unwrap();
        assert_eq!(result.media_locator, "/output/final.mp4");
        assert_eq!(result.status_message.as_deref(), Some("done"));
        assert_eq!(result.audio_locator.as_deref(), Some("/output/speech.mp3"));
        assert!(result.is_free());
        assert!(result.media_kind.is_none());
    }

    #[test]
    fn result_without_url_is_rejected() {
        assert!(serde_json::from_str::<RequestResult>(r#"{"message":"done"}"#).is_err());
    }

    #[test]
    fn blank_error_message_counts_as_absent() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"  "}"#).unwrap();
        assert!(body.message().is_none());
        let body: ErrorBody = serde_json::from_str(r#"{"error":"quota exceeded"}"#).unwrap();
        assert_eq!(body.message(), Some("quota exceeded"));
    }
}
