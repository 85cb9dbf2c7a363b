use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use slides_core::PresentationForm;

use super::config::CONFIG_FILENAME;
use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "slides", about = "Request a generated presentation from the slides server")]
pub struct Args {
    /// Base URL of the server; overrides the config file.
    #[arg(long)]
    pub server: Option<String>,
    #[arg(long, default_value = CONFIG_FILENAME)]
    pub config: PathBuf,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub subtitle: Option<String>,
    #[arg(long)]
    pub institute: Option<String>,
    /// Slide content in Markdown.
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,
    #[arg(long)]
    pub content_file: Option<PathBuf>,
    /// Image to attach; repeat for several. Order is kept.
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,
    /// Debug logging, and expanded technical details on failure.
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    /// Form values as typed, falling back to the form's defaults.
    pub fn form(&self) -> std::io::Result<PresentationForm> {
        let defaults = PresentationForm::default();
        let content = match (&self.content, &self.content_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => fs::read_to_string(path)?,
            (None, None) => defaults.content,
        };
        Ok(PresentationForm {
            title: self.title.clone().unwrap_or(defaults.title),
            subtitle: self.subtitle.clone().unwrap_or(defaults.subtitle),
            institute: self.institute.clone().unwrap_or(defaults.institute),
            content,
        })
    }

    /// File names as the attachment input reports them.
    pub fn image_names(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string_lossy().into_owned())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::{Args, LogTarget};

    #[test]
    fn defaults_fill_missing_fields() {
        let args = Args::parse_from(["slides", "--title", "TCC"]);
        let form = args.form().expect("form");

        assert_eq!(form.title, "TCC");
        assert_eq!(form.subtitle, "Autor");
        assert_eq!(form.institute, "Instituto Federal de Sergipe");
        assert_eq!(args.log, LogTarget::Terminal);
    }

    #[test]
    fn content_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().expect("tmp");
        write!(file, "## Slide").expect("write");
        let path = file.path().to_string_lossy().into_owned();

        let args = Args::parse_from(["slides", "--content-file", path.as_str()]);
        assert_eq!(args.form().expect("form").content, "## Slide");
    }

    #[test]
    fn content_and_content_file_conflict() {
        let result = Args::try_parse_from(["slides", "--content", "x", "--content-file", "y.md"]);
        assert!(result.is_err());
    }

    #[test]
    fn image_names_keep_order_and_duplicates() {
        let args = Args::parse_from([
            "slides",
            "--image",
            "one/a.png",
            "--image",
            "two/a.png",
            "--image",
            "b.jpg",
        ]);
        assert_eq!(args.image_names(), ["a.png", "a.png", "b.jpg"]);
    }
}
