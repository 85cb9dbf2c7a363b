//! Slides core: pure request-lifecycle state machine and view-model helpers.
mod effect;
mod form;
mod msg;
mod preview;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{
    Attachment, FormField, PresentationForm, SubmissionRequest, SubmissionRequestBuilder,
    ATTACHMENT_FIELD,
};
pub use msg::Msg;
pub use preview::{preview_reference, project_preview, PreviewEntry, PreviewView, PREVIEW_HEADER};
pub use state::{
    AppState, FailureOrigin, FailureReport, SubmissionId, UiState, DEFAULT_DOWNLOAD_PREFIX,
};
pub use update::update;
pub use view_model::{download_target, AppViewModel, ResultView};
