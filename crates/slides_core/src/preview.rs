/// Label rendered above the entries whenever the selection is non-empty.
pub const PREVIEW_HEADER: &str = "Selected images:";

const FIGURES_DIR: &str = "Figuras";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewView {
    pub header: Option<&'static str>,
    pub entries: Vec<PreviewEntry>,
}

impl PreviewView {
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub file_name: String,
    pub reference: String,
}

/// Embed-path hint the user copies into the slide content.
///
/// The name is used verbatim: no escaping, no validation.
pub fn preview_reference(file_name: &str) -> String {
    format!("![]({FIGURES_DIR}/{file_name})")
}

/// Projects the current selection into the preview region.
///
/// Always recomputed from scratch; the previous preview is never consulted.
pub fn project_preview<S: AsRef<str>>(names: &[S]) -> PreviewView {
    if names.is_empty() {
        return PreviewView::default();
    }

    PreviewView {
        header: Some(PREVIEW_HEADER),
        entries: names
            .iter()
            .map(|name| PreviewEntry {
                file_name: name.as_ref().to_string(),
                reference: preview_reference(name.as_ref()),
            })
            .collect(),
    }
}
