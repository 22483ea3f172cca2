use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditAction;

/// Execute the `authkeys import` command.
pub fn execute(user: Option<&str>, identities: &[String]) -> Result<()> {
    let env_dir = crate::cli::context::require_initialized()?;
    let config = AppConfig::load(env_dir)?;
    let resolver = crate::cli::context::identity_resolver(&config);

    let report = crate::cli::context::engine(env_dir).import(&resolver, identities)?;

    super::report_helpers::print_report(&report);

    if report.applied() > 0 {
        super::audit_helpers::log_audit(
            env_dir,
            user,
            AuditAction::KeyImport,
            report.changed_ids(),
            Some(format!("from {}", identities.join(", "))),
        );
    }
    Ok(())
}
