use crate::adapters::guards::file_change_guard::{BlockType, FileChangeGuard};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::audit_entry::AuditAction;

/// Execute the `authkeys block` command.
pub fn execute_block(user: Option<&str>, kind: BlockType, message: Option<String>) -> Result<()> {
    let env_dir = crate::cli::context::require_initialized()?;
    let guard = FileChangeGuard::new(env_dir.join("blocks.toml"));

    let detail = match &message {
        Some(m) => format!("{}: {m}", kind.as_str()),
        None => kind.as_str().to_string(),
    };
    guard.switch_on(kind, message)?;
    output::success(&format!("Block \"{}\" is on", kind.as_str()));
    output::note(&format!("To lift it: authkeys unblock {}", kind.as_str()));

    super::audit_helpers::log_audit(env_dir, user, AuditAction::Block, vec![], Some(detail));
    Ok(())
}

/// Execute the `authkeys unblock` command.
pub fn execute_unblock(user: Option<&str>, kind: BlockType) -> Result<()> {
    let env_dir = crate::cli::context::require_initialized()?;
    let guard = FileChangeGuard::new(env_dir.join("blocks.toml"));

    if !guard.switch_off(kind)? {
        output::warning(&format!("Block \"{}\" was not on", kind.as_str()));
        return Ok(());
    }
    output::success(&format!("Block \"{}\" lifted", kind.as_str()));

    super::audit_helpers::log_audit(
        env_dir,
        user,
        AuditAction::Unblock,
        vec![],
        Some(kind.as_str().to_string()),
    );
    Ok(())
}
