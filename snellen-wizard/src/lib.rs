// Snellen / duochrome vision self-test
// Main library entry point

pub mod config;
pub mod flow;
pub mod models;
mod tui;
mod utils;

use anyhow::Result;
use config::Settings;
use flow::{FlowError, FormFlowController};
use log::{error, info, warn};
use models::form::{FieldId, ResultSnapshot, Stage, SubmitEvent};
use models::markup::{Markup, MemorySurface};
use std::path::{Path, PathBuf};
use utils::logging::{split_log_tags, LogLine};

/// Initialize logging: JSON lines and human-readable text under `log_dir`, optionally echoed
/// to stderr. Never echoed in TUI mode.
fn init_logging(log_dir: &Path, echo_stderr: bool) -> Result<()> {
    let (json_log_file, txt_log_file) = log_file_paths(log_dir, chrono::Utc::now());

    // One id per process so runs can be told apart in a shared log folder.
    let session = uuid::Uuid::new_v4().simple().to_string();

    let mut dispatch = fern::Dispatch::new().level(log::LevelFilter::Debug);

    if echo_stderr {
        let session = session.clone();
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Info)
                .format(move |out, message, record| {
                    let ts = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
                    let tags = split_log_tags(&message.to_string());
                    let line = LogLine::new(&ts, record.level(), record.target(), &session, &tags);
                    out.finish(format_args!("{}", line.to_text()));
                })
                .chain(std::io::stderr()),
        );
    }

    let json_session = session.clone();
    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let ts = chrono::Utc::now().to_rfc3339();
                    let tags = split_log_tags(&message.to_string());
                    let line =
                        LogLine::new(&ts, record.level(), record.target(), &json_session, &tags);
                    out.finish(format_args!("{}\n", line.to_json()));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let ts = chrono::Local::now()
                        .format("%Y-%m-%d %H:%M:%S%.3f")
                        .to_string();
                    let tags = split_log_tags(&message.to_string());
                    let line = LogLine::new(&ts, record.level(), record.target(), &session, &tags);
                    out.finish(format_args!("{}\n", line.to_text()));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;

    info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        log_dir
    );
    Ok(())
}

/// JSON and text log file names for a run started at `at`. Millisecond resolution keeps
/// runs started in the same second in separate files.
fn log_file_paths(log_dir: &Path, at: chrono::DateTime<chrono::Utc>) -> (PathBuf, PathBuf) {
    let timestamp = at.format("%Y-%m-%d-%H%M%S-%3f");
    (
        log_dir.join(format!("selftest-{}.log", timestamp)),
        log_dir.join(format!("selftest-{}.txt", timestamp)),
    )
}

/// Logging is best effort: a failure is reported and the self-test goes on without logs.
fn start_logging(settings: &Settings, echo_stderr: bool) {
    let result = utils::path_resolver::resolve_log_folder(settings.log_dir.as_deref())
        .and_then(|dir| init_logging(&dir, echo_stderr));
    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {:#}", e);
    }
}

/// Interactive terminal wizard.
pub fn run_tui(settings: &Settings) -> Result<()> {
    // No stderr echo: it would corrupt the terminal UI.
    start_logging(settings, false);
    info!(
        "[PHASE: initialization] Self-test wizard starting at {}",
        chrono::Utc::now()
    );

    tui::run(&settings.options).map_err(|e| {
        error!("[PHASE: tui] [STEP: fatal] TUI exited with error: {:?}", e);
        e
    })
}

/// Non-interactive TUI smoke mode: renders one frame of `page` and returns it as text.
pub fn run_tui_smoke(settings: &Settings, page: &str, verbose: bool) -> Result<String> {
    start_logging(settings, verbose);
    tui::smoke(page, &settings.options)
}

/// Answers for a scripted (non-interactive) run. Empty strings mean "nothing selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedAnswers {
    pub right_eye: String,
    pub left_eye: String,
    pub duochrome: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedOutcome {
    Completed(ResultSnapshot),
    /// A transition was refused; `annotations` lists each field left without a selection.
    Blocked {
        stage: Stage,
        annotations: Vec<(FieldId, String)>,
    },
}

/// Drive the controller through the whole self-test with fixed answers.
pub fn run_flow(answers: &ScriptedAnswers) -> std::result::Result<ScriptedOutcome, FlowError> {
    let markup = Markup::default();
    let surface = MemorySurface::from_markup(&markup);
    let mut flow = FormFlowController::new(markup, surface)?;

    flow.select(FieldId::RightEye, &answers.right_eye);
    flow.select(FieldId::LeftEye, &answers.left_eye);
    if !flow.advance()? {
        return Ok(blocked(&flow));
    }

    flow.select(FieldId::Duochrome, &answers.duochrome);
    let mut submit = SubmitEvent::new();
    if !flow.submit(&mut submit)? {
        return Ok(blocked(&flow));
    }

    match flow.snapshot() {
        Some(snapshot) => Ok(ScriptedOutcome::Completed(snapshot.clone())),
        None => Ok(blocked(&flow)),
    }
}

fn blocked(flow: &FormFlowController<MemorySurface>) -> ScriptedOutcome {
    ScriptedOutcome::Blocked {
        stage: flow.stage(),
        annotations: flow
            .visible_annotations()
            .into_iter()
            .map(|(field, a)| (field, a.message.clone()))
            .collect(),
    }
}

/// Scripted run with logging, as used by the `run` command.
pub fn run_scripted(
    settings: &Settings,
    answers: &ScriptedAnswers,
    verbose: bool,
) -> Result<ScriptedOutcome> {
    start_logging(settings, verbose);
    info!("[PHASE: scripted] [STEP: start] Running self-test with scripted answers");

    let outcome = run_flow(answers)?;
    match &outcome {
        ScriptedOutcome::Completed(s) => info!(
            "[PHASE: scripted] [STEP: done] right_eye={} left_eye={} duochrome={}",
            s.right_eye, s.left_eye, s.duochrome
        ),
        ScriptedOutcome::Blocked { stage, annotations } => warn!(
            "[PHASE: scripted] [STEP: blocked] Stopped on {} stage with {} annotation(s)",
            stage,
            annotations.len()
        ),
    }
    Ok(outcome)
}
