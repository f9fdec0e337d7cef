//! Terminal UI — spinners and ✓/✗ outcome lines.
//!
//! Every command produces an [`Outcome`] instead of printing as it goes.  A
//! failed outcome still exits zero: filesystem errors inside a command are
//! reported, never fatal.  Only usage errors and the not-initialized gate
//! change the exit status, and those are handled in `main`.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

// ─── Icons ───────────────────────────────────────────────────────────────────

/// Braille spinner frames — same style as indicatif's default.
static SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}
fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}

// ─── Outcome ──────────────────────────────────────────────────────────────────

/// The result of one command, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Headline, e.g. `"Backup saved to: .backup/Backup_…"`.
    pub label: String,
    pub success: bool,
    /// Extra lines printed under the headline.
    pub details: Vec<String>,
    /// Error message for failed outcomes.
    pub error: Option<String>,
}

impl Outcome {
    pub fn ok(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            success: true,
            details: Vec::new(),
            error: None,
        }
    }

    pub fn failed(label: impl Into<String>, error: impl ToString) -> Self {
        Self {
            label: label.into(),
            success: false,
            details: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl IntoIterator<Item = String>) -> Self {
        self.details.extend(details);
        self
    }

    /// Print the headline and details to stdout; errors go to stderr.
    pub fn print(&self) {
        if self.success {
            println!("  {}  {}", icon_ok(), style(&self.label).bold());
        } else {
            println!("  {}  {}", icon_err(), style(&self.label).bold());
        }
        for line in &self.details {
            println!("     {line}");
        }
        if let Some(ref msg) = self.error {
            eprintln!("  {} {}", style("Error:").red().bold(), msg);
        }
    }

    pub const fn is_failure(&self) -> bool {
        !self.success
    }
}

// ─── Spinner ──────────────────────────────────────────────────────────────────

/// Run `work` behind an indeterminate spinner labelled `label`.
///
/// The spinner draws to stderr and stays hidden when stderr is not a
/// terminal, so captured output in tests is unaffected.
pub fn with_spinner<T>(label: &str, work: impl FnOnce() -> T) -> T {
    let pb = ProgressBar::new_spinner();
    if let Ok(tpl) = ProgressStyle::with_template("  {spinner:.cyan}  {msg}") {
        pb.set_style(tpl.tick_chars(SPINNER_CHARS));
    }
    pb.set_message(format!("{}", style(label).dim()));
    pb.enable_steady_tick(Duration::from_millis(80));

    let out = work();
    pb.finish_and_clear();
    out
}

// ─── Tests ────────────────────────────────────────────────────────────────────
