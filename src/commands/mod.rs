//! Subcommand handlers.
//!
//! Each file in this module corresponds to one or more user-facing commands:
//!
//! | File         | Invocation                          | Description                    |
//! |--------------|-------------------------------------|--------------------------------|
//! | `init.rs`    | `backup init`, `backup meta`        | Metadata record                |
//! | `snap.rs`    | `backup do`, `backup auto --min N`  | One-off and periodic snapshots |
//! | `pull.rs`    | `backup pull …`, `backup list`      | Restore and listing            |
//! | `remove.rs`  | `backup remove --all`               | Delete the backup root         |
//! | `logs.rs`    | `backup logs [--copy]`              | Event log access               |
//!
//! Handlers return an [`Outcome`] rather than an error: failures inside a
//! command are shown to the user but do not change the exit status.

pub mod init;
pub mod logs;
pub mod pull;
pub mod remove;
pub mod snap;

use crate::{cli::Command, eventlog::FileLog, ui::Outcome, workspace::Workspace};

/// Run `command` against `ws`, recording events in `log`.
pub fn dispatch(command: &Command, ws: &Workspace, log: &FileLog) -> Outcome {
    match command {
        Command::Init => init::run(ws, log),
        Command::Do => snap::once(ws, log),
        Command::Auto { minutes } => snap::auto(ws, log, *minutes),
        Command::Remove { all } => {
            debug_assert!(*all, "clap requires --all");
            remove::run(ws, log)
        },
        Command::Pull { target } => pull::run(ws, log, target.selection()),
        Command::List => pull::list(ws),
        Command::Meta => init::meta(ws),
        Command::Logs { copy } => logs::run(ws, log, *copy),
    }
}
