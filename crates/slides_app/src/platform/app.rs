use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_info;
use slides_core::{update, AppState, Attachment, Msg, ResultView};
use slides_engine::{EngineHandle, SubmitSettings};

use super::cli::Args;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::render::render;
use super::ui::surface::TerminalSurface;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::initialize(args.log.into(), args.log_level());

    let config = AppConfig::load_or_default(&args.config).with_server(args.server.clone());
    let engine = EngineHandle::new(SubmitSettings {
        generation_url: config.generation_url()?,
    })?;
    let state = AppState::with_download_prefix(config.download_prefix()?);
    let surface = TerminalSurface::stdout().expand_disclosures(args.verbose);
    let mut session = Session::new(state, EffectRunner::new(engine), surface);

    session.dispatch(Msg::AttachmentsChanged(args.image_names()))?;

    let form = args.form().context("failed to read slide content")?;
    let request = form.into_request(read_attachments(&args.images)?);
    session.dispatch(Msg::FormSubmitted(request))?;
    session.run_until_settled()?;

    Ok(match session.view_result() {
        Some(ResultView::Success { download_target }) => {
            println!("Download: {download_target}");
            ExitCode::SUCCESS
        }
        _ => ExitCode::FAILURE,
    })
}

fn read_attachments(paths: &[PathBuf]) -> anyhow::Result<Vec<Attachment>> {
    paths
        .iter()
        .map(|path| {
            let bytes =
                fs::read(path).with_context(|| format!("failed to read image {path:?}"))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            Ok(Attachment::image(name, bytes))
        })
        .collect()
}

/// Owns the state and feeds every message through `update`, rendering dirty views.
pub(crate) struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    surface: TerminalSurface<W>,
}

impl<W: Write> Session<W> {
    pub(crate) fn new(state: AppState, runner: EffectRunner, surface: TerminalSurface<W>) -> Self {
        Self {
            state,
            runner,
            surface,
        }
    }

    pub(crate) fn dispatch(&mut self, msg: Msg) -> std::io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        // Render before effects run: the submitting view is up before any network activity.
        if was_dirty {
            self.surface.apply(render(&view))?;
        }
        for follow_up in self.runner.enqueue(effects) {
            self.dispatch(follow_up)?;
        }
        Ok(())
    }

    /// Pumps engine events until no submission is in flight. No deadline.
    pub(crate) fn run_until_settled(&mut self) -> std::io::Result<()> {
        while let Some(submission_id) = self.state.in_flight() {
            match self.runner.next_msg(TICK_INTERVAL, submission_id) {
                Some(msg) => {
                    engine_info!("Settlement received for #{}", submission_id);
                    self.dispatch(msg)?;
                }
                None => self.dispatch(Msg::Tick)?,
            }
        }
        Ok(())
    }

    pub(crate) fn view_result(&self) -> Option<ResultView> {
        self.state.view().result
    }

    #[cfg(test)]
    pub(crate) fn surface(&self) -> &TerminalSurface<W> {
        &self.surface
    }
}
