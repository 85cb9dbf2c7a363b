use crate::PreviewView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub trigger_enabled: bool,
    pub loading_visible: bool,
    /// `None` keeps the result region hidden.
    pub result: Option<ResultView>,
    pub preview: PreviewView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Success {
        download_target: String,
    },
    /// Every failure origin lands here; `details` goes into the collapsed region.
    Failure {
        message: String,
        details: Option<String>,
    },
}

/// Download route prefix followed by the token, concatenated as-is.
pub fn download_target(prefix: &str, token: &str) -> String {
    format!("{prefix}{token}")
}
