//! `backup pull --last`, `backup pull --specific <N>` and `backup list`.

use crate::{
    eventlog::EventLog,
    restore::{self, Selection},
    snapshot,
    ui::{Outcome, with_spinner},
    workspace::Workspace,
};

/// Restore the selected snapshot over the working directory.
pub fn run(ws: &Workspace, log: &dyn EventLog, selection: Selection) -> Outcome {
    match with_spinner("Restoring", || restore::restore(ws, selection, log)) {
        Ok(report) => {
            let name = report
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let details = report
                .failed
                .iter()
                .map(|(entry, err)| format!("not restored: {entry} ({err})"));
            if report.failed.is_empty() {
                Outcome::ok(format!("Restored from backup: {name}"))
                    .with_details([format!("{} entries restored", report.restored.len())])
            } else {
                let total = report.failed.len() + report.restored.len();
                Outcome::failed(
                    format!("Partially restored from backup: {name}"),
                    format!("{} of {total} entries failed", report.failed.len()),
                )
                .with_details(details)
            }
        },
        Err(e) => Outcome::failed("Restore failed", e),
    }
}

/// Print snapshots newest first, numbered the way `pull --specific` counts.
pub fn list(ws: &Workspace) -> Outcome {
    match snapshot::list(ws) {
        Ok(snapshots) if snapshots.is_empty() => Outcome::ok("No backups found."),
        Ok(snapshots) => {
            let lines = snapshots.iter().enumerate().map(|(i, p)| {
                let name = p.file_name().unwrap_or_default().to_string_lossy();
                format!("{i:>3}  {name}")
            });
            Outcome::ok(format!("{} backup(s), newest first", snapshots.len()))
                .with_details(lines.collect::<Vec<_>>())
        },
        Err(e) => Outcome::failed("Could not list backups", e),
    }
}
