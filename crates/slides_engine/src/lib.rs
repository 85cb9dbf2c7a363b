//! Slides engine: multipart submission, envelope interpretation and effect execution.
mod engine;
mod envelope;
mod submit;
mod types;

pub use engine::EngineHandle;
pub use envelope::{
    interpret_response, ResponseEnvelope, REQUEST_ERROR_MESSAGE, SERVER_ERROR_MESSAGE,
    UNKNOWN_ERROR_MESSAGE,
};
pub use submit::{ReqwestSubmitter, SubmitSettings, Submitter};
pub use types::{
    EngineError, EngineEvent, FailureKind, GenerationReceipt, SubmissionFailure, SubmissionId,
};
