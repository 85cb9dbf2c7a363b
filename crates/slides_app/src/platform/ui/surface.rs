use std::collections::BTreeMap;
use std::io::{self, Write};

use engine_logging::{engine_debug, engine_warn};

const ECHO_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(u32);

impl ControlId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SetControlEnabled {
        control_id: ControlId,
        enabled: bool,
    },
    SetVisible {
        control_id: ControlId,
        visible: bool,
    },
    SetClassName {
        control_id: ControlId,
        class_name: &'static str,
    },
    SetInnerMarkup {
        control_id: ControlId,
        markup: String,
    },
    /// Marks the region as a collapsed disclosure showing only `summary`.
    SetDisclosure {
        control_id: ControlId,
        summary: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionState {
    pub enabled: bool,
    pub visible: bool,
    pub class_name: &'static str,
    pub markup: String,
    pub disclosure: Option<&'static str>,
}

impl Default for RegionState {
    fn default() -> Self {
        Self {
            enabled: true,
            visible: true,
            class_name: "",
            markup: String::new(),
            disclosure: None,
        }
    }
}

/// Region table standing in for the page, echoing visible markup changes as plain text.
pub struct TerminalSurface<W: Write> {
    regions: BTreeMap<ControlId, RegionState>,
    expand_disclosures: bool,
    out: W,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            regions: BTreeMap::new(),
            expand_disclosures: false,
            out,
        }
    }

    /// Echo disclosure contents instead of just their summary line.
    pub fn expand_disclosures(mut self, expand: bool) -> Self {
        self.expand_disclosures = expand;
        self
    }

    pub fn region(&self, control_id: ControlId) -> Option<&RegionState> {
        self.regions.get(&control_id)
    }

    pub fn apply(&mut self, commands: Vec<UiCommand>) -> io::Result<()> {
        let before = self.regions.clone();
        for command in commands {
            engine_debug!("UiCommand {:?}", command);
            match command {
                UiCommand::SetControlEnabled {
                    control_id,
                    enabled,
                } => self.regions.entry(control_id).or_default().enabled = enabled,
                UiCommand::SetVisible {
                    control_id,
                    visible,
                } => self.regions.entry(control_id).or_default().visible = visible,
                UiCommand::SetClassName {
                    control_id,
                    class_name,
                } => self.regions.entry(control_id).or_default().class_name = class_name,
                UiCommand::SetInnerMarkup { control_id, markup } => {
                    self.regions.entry(control_id).or_default().markup = markup
                }
                UiCommand::SetDisclosure {
                    control_id,
                    summary,
                } => self.regions.entry(control_id).or_default().disclosure = Some(summary),
            }
        }

        for (control_id, region) in &self.regions {
            let changed = before.get(control_id) != Some(region);
            if !changed || !region.visible || region.markup.is_empty() {
                continue;
            }
            match region.disclosure {
                Some(summary) if !self.expand_disclosures => writeln!(self.out, "{summary}")?,
                _ => write!(self.out, "{}", plain_text(&region.markup))?,
            }
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn plain_text(markup: &str) -> String {
    html2text::from_read(markup.as_bytes(), ECHO_WIDTH).unwrap_or_else(|err| {
        engine_warn!("Could not render markup as text: {}", err);
        String::new()
    })
}
