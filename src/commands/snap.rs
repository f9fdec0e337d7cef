//! `backup do` and `backup auto --min <N>`.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::{
    eventlog::EventLog, schedule::run_periodic, snapshot, ui::Outcome, ui::with_spinner,
    workspace::Workspace,
};

/// Take one snapshot.
pub fn once(ws: &Workspace, log: &dyn EventLog) -> Outcome {
    match with_spinner("Copying", || snapshot::create(ws, log)) {
        Ok(report) => {
            let mut details = vec![format!(
                "{} entries, {} files copied",
                report.copied.len(),
                report.files
            )];
            if !report.skipped.is_empty() {
                details.push(format!("ignored: {}", report.skipped.join(", ")));
            }
            Outcome::ok(format!("Backup saved to: {}", display_rel(ws, &report.path)))
                .with_details(details)
        },
        Err(e) => Outcome::failed("Backup failed", e),
    }
}

/// Snapshot now and every `minutes` minutes until Ctrl-C.
pub fn auto(ws: &Workspace, log: &dyn EventLog, minutes: u64) -> Outcome {
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => return Outcome::failed("Could not start the scheduler", e),
    };

    let period = Duration::from_secs(minutes.saturating_mul(60));
    let token = CancellationToken::new();

    let runs = rt.block_on(async {
        let watcher = tokio::spawn({
            let token = token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            }
        });

        let runs = run_periodic(period, token, |_| {
            once(ws, log).print();
            println!("     Waiting {minutes} minute(s) for the next backup… (Ctrl-C to stop)");
            std::future::ready(())
        })
        .await;

        watcher.abort();
        runs
    });

    log.record(&format!("Automatic backups stopped after {runs} run(s)"));
    Outcome::ok(format!("Automatic backups stopped after {runs} run(s)"))
}

/// `path` relative to the workspace root when possible, for shorter output.
fn display_rel(ws: &Workspace, path: &std::path::Path) -> String {
    path.strip_prefix(ws.root())
        .unwrap_or(path)
        .display()
        .to_string()
}
