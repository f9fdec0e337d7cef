//! `backup logs` and `backup logs --copy`.

use crate::{
    eventlog::FileLog,
    ui::Outcome,
    workspace::Workspace,
};

/// Name of the copy written into the working directory by `logs --copy`.
pub const LOG_COPY_NAME: &str = "backup-logs.txt";

/// Print the event log, or copy it into the working directory.
pub fn run(ws: &Workspace, log: &FileLog, copy: bool) -> Outcome {
    let path = log.path();
    if !path.is_file() {
        return Outcome::ok(format!("No logs yet ({})", path.display()));
    }

    if copy {
        let dest = ws.root().join(LOG_COPY_NAME);
        return match std::fs::copy(path, &dest) {
            Ok(_) => Outcome::ok(format!("Logs copied to {}", dest.display())),
            Err(e) => Outcome::failed("Could not copy logs", e),
        };
    }

    match std::fs::read_to_string(path) {
        Ok(text) => Outcome::ok(format!("Logs ({})", path.display()))
            .with_details(text.lines().map(str::to_string)),
        Err(e) => Outcome::failed("Could not read logs", e),
    }
}
