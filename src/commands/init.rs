//! `backup init` and `backup meta`.

use chrono::Local;

use crate::{eventlog::EventLog, meta, ui::Outcome, workspace::Workspace};

/// Create the backup root and write a fresh metadata record.
pub fn run(ws: &Workspace, log: &dyn EventLog) -> Outcome {
    match meta::init(ws, &meta::current_user(), Local::now().naive_local()) {
        Ok(record) => {
            log.record(&format!("Initialized backup system in {}", ws.backup_root().display()));
            Outcome::ok(format!(
                "Backup system initialized in `{}/`",
                ws.backup_dir_name()
            ))
            .with_details([
                format!("author: {}", record.author),
                format!("folder: {}", record.folder.display()),
            ])
        },
        Err(e) => {
            log.error(&e.to_string());
            Outcome::failed("Init failed", e)
        },
    }
}

/// Show the metadata record.  Never writes anything.
pub fn meta(ws: &Workspace) -> Outcome {
    match meta::read_raw(ws) {
        Ok(Some(text)) => {
            let mut outcome = Outcome::ok("Backup meta information")
                .with_details(text.lines().map(str::to_string));
            if meta::Metadata::parse(&text).is_none() {
                outcome.details.push("(record is incomplete)".into());
            }
            outcome
        },
        Ok(None) => Outcome::ok("No metadata found. Run `backup init` first."),
        Err(e) => Outcome::failed("Could not read metadata", e),
    }
}
