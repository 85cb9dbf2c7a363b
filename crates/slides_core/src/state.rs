use crate::preview::{project_preview, PreviewView};
use crate::view_model::{download_target, AppViewModel, ResultView};

pub type SubmissionId = u64;

pub const DEFAULT_DOWNLOAD_PREFIX: &str = "/download/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// The exchange could not complete, or the body could not be understood.
    Transport,
    /// The server answered with a non-success HTTP status.
    Protocol { status: u16 },
    /// HTTP succeeded but the envelope reported `sucesso: false`.
    Application,
}

/// Common payload shared by every failure origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub origin: FailureOrigin,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    Success {
        file: String,
    },
    Failure(FailureReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    ui: UiState,
    trigger_enabled: bool,
    in_flight: Option<SubmissionId>,
    next_submission_id: SubmissionId,
    preview: PreviewView,
    download_prefix: String,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            ui: UiState::Idle,
            trigger_enabled: true,
            in_flight: None,
            next_submission_id: 1,
            preview: PreviewView::default(),
            download_prefix: DEFAULT_DOWNLOAD_PREFIX.to_string(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_download_prefix(prefix: impl Into<String>) -> Self {
        Self {
            download_prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub fn view(&self) -> AppViewModel {
        let result = match &self.ui {
            UiState::Idle | UiState::Submitting => None,
            UiState::Success { file } => Some(ResultView::Success {
                download_target: download_target(&self.download_prefix, file),
            }),
            UiState::Failure(report) => Some(ResultView::Failure {
                message: report.message.clone(),
                details: report.details.clone(),
            }),
        };

        AppViewModel {
            trigger_enabled: self.trigger_enabled,
            loading_visible: self.ui == UiState::Submitting,
            result,
            preview: self.preview.clone(),
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        let id = self.next_submission_id;
        self.next_submission_id += 1;
        self.ui = UiState::Submitting;
        self.trigger_enabled = false;
        self.in_flight = Some(id);
        self.dirty = true;
        id
    }

    /// Applies the settlement of the in-flight attempt. Returns false for stale ids.
    pub(crate) fn settle(
        &mut self,
        submission_id: SubmissionId,
        outcome: Result<String, FailureReport>,
    ) -> bool {
        if self.in_flight != Some(submission_id) {
            return false;
        }
        self.ui = match outcome {
            Ok(file) => UiState::Success { file },
            Err(report) => UiState::Failure(report),
        };
        self.in_flight = None;
        self.trigger_enabled = true;
        self.dirty = true;
        true
    }

    pub(crate) fn replace_attachments(&mut self, names: &[String]) {
        self.preview = project_preview(names);
        self.dirty = true;
    }
}
