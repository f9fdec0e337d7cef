//! `backup remove --all`.

use crate::{eventlog::EventLog, snapshot, ui::Outcome, workspace::Workspace};

/// Delete the backup root.  No confirmation; `--all` is the confirmation.
pub fn run(ws: &Workspace, log: &dyn EventLog) -> Outcome {
    match snapshot::remove_all(ws, log) {
        Ok(true) => Outcome::ok("All backups removed."),
        Ok(false) => Outcome::ok("Nothing to remove."),
        Err(e) => Outcome::failed("Remove failed", e),
    }
}
