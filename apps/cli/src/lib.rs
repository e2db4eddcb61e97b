//! Shared plumbing for the download cleanup binaries
//!
//! Both binaries parse their arguments with clap, set up logging, build a
//! [`ReconcileConfig`] from environment and flags, then hand over to a
//! [`Session`] driven by console prompts.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Args, Parser};
use dialoguer::{Confirm, Input};
use is_terminal::IsTerminal;
use reconciler::{
    Confirmation, ConsoleReporter, IntoEventCallback, ModlistSources, Prompter, ReconcileConfig,
    ReconcileError, Session,
};
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};

const DIR_PROMPT: &str = "Enter the path to your downloaded mods directory";

/// Flags shared by both binaries
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory the report files are written to [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Do not write report files
    #[arg(long)]
    pub no_reports: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Remove downloaded archives that a Wabbajack modlist does not reference
#[derive(Parser, Debug)]
#[command(name = "clean_wj_downloads", disable_version_flag = true)]
pub struct CleanArgs {
    /// Path to the .wabbajack file
    #[arg(value_name = "WABBAJACK_FILE")]
    pub modlist: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Remove downloaded archives that neither of two Wabbajack modlists references
#[derive(Parser, Debug)]
#[command(name = "merge_wj_downloads", disable_version_flag = true)]
pub struct MergeArgs {
    /// Path to the first .wabbajack file
    #[arg(value_name = "WABBAJACK_FILE_1")]
    pub first: PathBuf,

    /// Path to the second .wabbajack file
    #[arg(value_name = "WABBAJACK_FILE_2")]
    pub second: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Exit code for an argument error: 0 for help, 1 for everything else
pub fn exit_code_for(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Parse arguments, printing help or usage and yielding the exit code on failure
pub fn parse_args<T, I, A>(args: I) -> Result<T, ExitCode>
where
    T: Parser,
    I: IntoIterator<Item = A>,
    A: Into<OsString> + Clone,
{
    T::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        ExitCode::from(exit_code_for(&err))
    })
}

/// Initialize tracing on stderr
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Build the run configuration from `.env`, the environment and flags
pub fn build_config(base: ReconcileConfig, common: &CommonArgs) -> ReconcileConfig {
    if let Ok(path) = dotenv::dotenv() {
        debug!("Loaded environment variables from {}", path.display());
    }

    apply_flags(base.apply_env(), common)
}

/// Apply command line flags on top of a configuration
pub fn apply_flags(mut config: ReconcileConfig, common: &CommonArgs) -> ReconcileConfig {
    if let Some(dir) = &common.report_dir {
        config = config.with_report_dir(dir);
    }
    if common.no_reports {
        config = config.with_reports(false);
    }
    config
}

/// Run a session and translate the outcome into an exit code
pub fn execute<F>(config: ReconcileConfig, verbose: u8, sources: F) -> ExitCode
where
    F: FnOnce(&ReconcileConfig) -> reconciler::Result<ModlistSources>,
{
    let sources = match sources(&config) {
        Ok(sources) => sources,
        Err(err) if err.is_usage_error() => {
            debug!("{}", err);
            println!("The file you provided is not a Wabbajack mod archive.");
            return ExitCode::SUCCESS;
        }
        Err(err) => return report_failure(err.into(), verbose),
    };

    let session = Session::new(config, sources)
        .with_events(ConsoleReporter::new(verbose > 0).into_callback());
    let mut prompter = console_prompter();

    match session.run(prompter.as_mut()).context("Reconciliation aborted") {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => report_failure(err, verbose),
    }
}

fn report_failure(err: anyhow::Error, verbose: u8) -> ExitCode {
    eprint!("{}", failure_message(&err, verbose));
    ExitCode::FAILURE
}

/// Text shown for a failed run; `-vv` adds the full error report
pub fn failure_message(err: &anyhow::Error, verbose: u8) -> String {
    let mut message = format!("❌ {:#}\n", err);
    let Some(reconcile_err) = err.downcast_ref::<ReconcileError>() else {
        return message;
    };

    if verbose >= 2 {
        message.push_str(&reconcile_err.detailed_report());
    } else if let Some(suggestion) = reconcile_err.suggestion() {
        message.push_str(&format!("💡 {}\n", suggestion));
    }
    message
}

/// Pick the interactive prompter when stdin is a terminal, plain lines otherwise
pub fn console_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(DialoguerPrompter)
    } else {
        Box::new(LinePrompter::new(io::stdin().lock(), io::stdout()))
    }
}

/// Terminal prompts; every question defaults to "no"
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn local_mods_dir(&mut self) -> reconciler::Result<PathBuf> {
        let input: String = Input::new()
            .with_prompt(DIR_PROMPT)
            .interact_text()
            .map_err(prompt_error)?;
        Ok(PathBuf::from(input))
    }

    fn confirm(&mut self, confirmation: &Confirmation) -> reconciler::Result<bool> {
        Confirm::new()
            .with_prompt(confirmation.question())
            .default(false)
            .interact()
            .map_err(prompt_error)
    }
}

fn prompt_error(err: dialoguer::Error) -> ReconcileError {
    ReconcileError::Prompt {
        reason: err.to_string(),
    }
}

/// Line based prompts for piped input; only `y` or `yes` counts as yes
///
/// Answers are taken verbatim apart from the line terminator.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> reconciler::Result<Option<String>> {
        write!(self.output, "{}", prompt)
            .and_then(|_| self.output.flush())
            .map_err(|e| ReconcileError::Prompt { reason: e.to_string() })?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| ReconcileError::Prompt { reason: e.to_string() })?;

        Ok((read > 0).then(|| line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn local_mods_dir(&mut self) -> reconciler::Result<PathBuf> {
        match self.ask(&format!("{}: ", DIR_PROMPT))? {
            Some(line) => Ok(PathBuf::from(line)),
            None => Err(ReconcileError::Prompt {
                reason: "no downloads directory given".to_string(),
            }),
        }
    }

    fn confirm(&mut self, confirmation: &Confirmation) -> reconciler::Result<bool> {
        let answer = self.ask(&format!("{} (y/N): ", confirmation.question()))?;
        Ok(answer.is_some_and(|answer| {
            let answer = answer.trim().to_ascii_lowercase();
            answer == "y" || answer == "yes"
        }))
    }
}
