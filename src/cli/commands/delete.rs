use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditAction;

/// Execute the `authkeys delete` command.
pub fn execute(user: Option<&str>, ids: &[String]) -> Result<()> {
    let env_dir = crate::cli::context::require_initialized()?;
    let report = crate::cli::context::engine(env_dir).delete(ids)?;

    super::report_helpers::print_report(&report);

    if report.applied() > 0 {
        super::audit_helpers::log_audit(
            env_dir,
            user,
            AuditAction::KeyDelete,
            report.changed_ids(),
            None,
        );
    }
    Ok(())
}
