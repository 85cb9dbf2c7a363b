use std::fmt;

use thiserror::Error;

use crate::REQUEST_ERROR_MESSAGE;

pub type SubmissionId = slides_core::SubmissionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReceipt {
    /// Download token returned by the server.
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmissionSettled {
        submission_id: SubmissionId,
        result: Result<GenerationReceipt, SubmissionFailure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    pub kind: FailureKind,
    pub message: String,
    pub details: Option<String>,
}

impl SubmissionFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details,
        }
    }

    /// Generic transport failure: fixed message, never any details.
    pub fn transport() -> Self {
        Self::new(FailureKind::Transport, REQUEST_ERROR_MESSAGE, None)
    }
}

impl fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    HttpStatus(u16),
    Rejected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport failure"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Rejected => write!(f, "rejected by server"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("engine worker is no longer running")]
    Stopped,
}
