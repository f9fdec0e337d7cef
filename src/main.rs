//! `backup` — timestamped snapshots of a working directory.
//!
//! # Overview
//!
//! Copies the working directory into `.backup/Backup_<YYYY-MM-DD_HH-MM-SS>/`,
//! once or on a timer, and restores the newest (or an indexed) snapshot back
//! over it.  A `.backupignore` file lists names to leave out.
//!
//! # Usage
//!
//! ```text
//! backup init                  # create .backup/ and its metadata record
//! backup do                    # take one snapshot
//! backup auto --min 30         # snapshot every 30 minutes until Ctrl-C
//! backup list                  # snapshots, newest first
//! backup pull --last           # restore the newest snapshot
//! backup pull --specific 2     # restore the third newest
//! backup remove --all          # delete .backup/ entirely
//! backup meta                  # show the metadata record
//! backup logs [--copy]         # show (or copy out) the event log
//! ```
//!
//! # Module layout
//!
//! | Module           | Responsibility                                  |
//! |------------------|-------------------------------------------------|
//! | [`cli`]          | Argument types parsed by clap                   |
//! | [`config`]       | `Config` struct + TOML loader                   |
//! | [`workspace`]    | Root directory and derived paths                |
//! | [`meta`]         | Metadata record and the initialized check       |
//! | [`ignore`]       | `.backupignore` parsing                         |
//! | [`snapshot`]     | Create, list, remove snapshots                  |
//! | [`restore`]      | Overlay a snapshot onto the root                |
//! | [`copy`]         | Overwriting file/tree copy                      |
//! | [`schedule`]     | Cancellable periodic task                       |
//! | [`eventlog`]     | Append-only event log                           |
//! | [`ui`]           | Spinner and outcome lines                       |
//! | [`commands`]     | One handler per subcommand                      |

mod cli;
mod commands;
mod config;
mod copy;
mod error;
mod eventlog;
mod ignore;
mod meta;
mod restore;
mod schedule;
mod snapshot;
mod ui;
mod workspace;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, error::ErrorKind};
use cli::Cli;
use eventlog::{EventLog, FileLog};
use tracing_subscriber::EnvFilter;
use workspace::Workspace;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_error(&e),
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let cfg_path = cli.config.clone().or_else(config::default_config_path);
    let cfg = match cfg_path {
        Some(p) => config::load_config(&p)?,
        None => config::Config::default(),
    };

    let root = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("resolving the current directory")?,
    };
    let ws = Workspace::new(root, &cfg.backup);

    let log_dir = eventlog::resolve_log_dir(cfg.log.dir.clone(), eventlog::default_log_dir());
    let log = FileLog::in_dir(&log_dir);

    let invocation: Vec<String> = std::env::args().skip(1).collect();
    log.record(&format!("Ran: {}", invocation.join(" ")));

    if cli.command.requires_init() && !meta::is_initialized(&ws) {
        let err = error::BackupError::NotInitialized;
        log.error(&err.to_string());
        ui::Outcome::failed("Not initialized", err).print();
        return Ok(ExitCode::FAILURE);
    }

    let outcome = commands::dispatch(&cli.command, &ws, &log);
    outcome.print();
    if outcome.is_failure() {
        tracing::debug!(label = %outcome.label, "command reported a failure");
    }
    Ok(ExitCode::SUCCESS)
}

/// Print a clap error and map it to an exit code.
///
/// Help and version requests exit 0.  Anything else is a usage error: the
/// message is followed by the full help text and the exit code is 1.
fn usage_error(e: &clap::Error) -> ExitCode {
    // Nothing useful to do if stdout/stderr is gone.
    let _ = e.print();
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ExitCode::FAILURE,
        _ => {
            eprintln!("\n{}", Cli::command().render_help());
            ExitCode::FAILURE
        },
    }
}

/// Diagnostics on stderr, filtered by `RUST_LOG` (default `warn`, or `debug`
/// with `--verbose`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
