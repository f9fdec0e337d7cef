//! Command-line interface definition.
//!
//! All argument parsing lives here so the rest of the codebase can stay
//! agnostic to `clap`.  Numeric arguments are validated by clap, so a
//! malformed `--min` or `--specific` is a usage error rather than a crash.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::restore::Selection;

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name    = "backup",
    about   = "Timestamped snapshots of the working directory into .backup",
    version,
    disable_version_flag = true,
    arg_required_else_help = true,
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Directory to back up and restore into.  Defaults to the current directory.
    #[arg(short = 'C', long = "dir", global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Path to the configuration file.
    ///
    /// Defaults to `~/.config/backup/config.toml`.  A missing file means
    /// built-in defaults.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show debug diagnostics on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print version.
    #[allow(dead_code)]
    #[arg(short = 'V', long = "version", alias = "v", action = ArgAction::Version)]
    pub version: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create `.backup/` and write the metadata record.
    ///
    /// Running it again rewrites the record with a new author and timestamp.
    Init,

    /// Take one snapshot of the working directory now.
    Do,

    /// Take a snapshot now and then every N minutes until interrupted.
    Auto {
        /// Minutes between snapshots.
        #[arg(long = "min", value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
        minutes: u64,
    },

    /// Delete every snapshot and the metadata record.
    Remove {
        /// Required confirmation that everything should go.
        #[arg(long, required = true)]
        all: bool,
    },

    /// Restore a snapshot over the working directory.
    ///
    /// Files missing from the snapshot are left in place.
    Pull {
        #[command(flatten)]
        target: PullTarget,
    },

    /// List snapshots, newest first, with the index `pull --specific` takes.
    List,

    /// Show the metadata record.
    Meta,

    /// Show the event log.
    Logs {
        /// Copy the log file into the working directory instead of printing it.
        #[arg(long)]
        copy: bool,
    },
}

impl Command {
    /// Commands that refuse to run before `backup init`.
    pub const fn requires_init(&self) -> bool {
        matches!(
            self,
            Self::Do | Self::Auto { .. } | Self::Remove { .. } | Self::Pull { .. } | Self::List
        )
    }
}

/// Exactly one of `--last` / `--specific <N>`.
#[derive(clap::Args, Debug, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct PullTarget {
    /// Restore the newest snapshot.
    #[arg(long)]
    pub last: bool,

    /// Restore the Nth newest snapshot (0 = newest).
    #[arg(long, value_name = "N")]
    pub specific: Option<usize>,
}

impl PullTarget {
    pub fn selection(&self) -> Selection {
        match (self.last, self.specific) {
            (false, Some(n)) => Selection::Index(n),
            _ => Selection::Latest,
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
