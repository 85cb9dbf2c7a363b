use serde::Deserialize;

use crate::{FailureKind, GenerationReceipt, SubmissionFailure};

/// Stand-in `erro` when a non-success body cannot be decoded.
pub const SERVER_ERROR_MESSAGE: &str = "server error";
/// Non-success status without an `erro`, and every transport failure.
pub const REQUEST_ERROR_MESSAGE: &str = "request error";
/// `sucesso: false` without an `erro`.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// JSON body returned by the generation endpoint, for any status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "sucesso", default)]
    pub success: bool,
    #[serde(rename = "arquivo", default)]
    pub file: Option<String>,
    #[serde(rename = "erro", default)]
    pub error: Option<String>,
    #[serde(rename = "detalhes", default)]
    pub details: Option<String>,
}

impl ResponseEnvelope {
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    fn server_error() -> Self {
        Self {
            error: Some(SERVER_ERROR_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    fn error_or(&self, fallback: &str) -> String {
        non_empty(&self.error).unwrap_or(fallback).to_string()
    }

    fn details(&self) -> Option<String> {
        non_empty(&self.details).map(str::to_string)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

/// Turns a settled exchange into either a download receipt or a failure.
///
/// Non-success statuses and `sucesso: false` envelopes both yield a message and
/// optional details; a success status with an unreadable body is a transport failure.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<GenerationReceipt, SubmissionFailure> {
    if !(200..300).contains(&status) {
        let envelope = ResponseEnvelope::decode(body).unwrap_or_else(|_| ResponseEnvelope::server_error());
        return Err(SubmissionFailure::new(
            FailureKind::HttpStatus(status),
            envelope.error_or(REQUEST_ERROR_MESSAGE),
            envelope.details(),
        ));
    }

    let envelope = ResponseEnvelope::decode(body).map_err(|_| SubmissionFailure::transport())?;
    if !envelope.success {
        return Err(SubmissionFailure::new(
            FailureKind::Rejected,
            envelope.error_or(UNKNOWN_ERROR_MESSAGE),
            envelope.details(),
        ));
    }

    match non_empty(&envelope.file) {
        Some(file) => Ok(GenerationReceipt {
            file: file.to_string(),
        }),
        None => Err(SubmissionFailure::transport()),
    }
}
