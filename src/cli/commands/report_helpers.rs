use crate::cli::output;
use crate::core::models::outcome::{BatchReport, EntryStatus, OperationKind};

/// Print what a batch did. Rejected entries go to stderr; they never
/// make the command fail.
pub fn print_report(report: &BatchReport) {
    for outcome in &report.outcomes {
        match (&outcome.status, report.kind) {
            (EntryStatus::Added(fp), OperationKind::Import) => {
                output::success(&format!("Imported {fp} from {}", outcome.entry));
            }
            (EntryStatus::Added(fp), _) => output::success(&format!("Added {fp}")),
            (EntryStatus::AlreadyPresent(fp), _) => {
                output::note(&format!("Already authorized: {fp}"));
            }
            (EntryStatus::Removed(id), _) => output::success(&format!("Deleted {id}")),
            (EntryStatus::Rejected(e), _) => output::error(&e.to_string()),
        }
    }

    for warning in &report.warnings {
        output::warning(warning);
    }

    if report.applied() == 0 {
        output::note("No changes made.");
    }
}
