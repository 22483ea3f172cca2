use crate::cli::output;
use crate::core::errors::{AuthKeysError, Result};
use crate::core::models::audit_entry::AuditAction;

const CONFIG_TEMPLATE: &str = r#"[authkeys]
version = "0.1.0"
default_user = "admin"

[import]
timeout_secs = 10
# Identities without a provider prefix are looked up here:
# default_provider = "lp"

# Extra HTTP providers, "{handle}" is replaced by the account name:
# [import.providers]
# corp = "https://keys.example.com/{handle}"

[audit]
enabled = true
log_file = "audit.log"
"#;

/// Execute the `authkeys init` command.
///
/// Creates the environment directory with a default config, an empty
/// key list and no active blocks.
pub fn execute(user: Option<&str>) -> Result<()> {
    let env_dir = crate::cli::context::env_dir();

    if env_dir.exists() {
        return Err(AuthKeysError::InvalidConfig {
            detail: format!("An environment already exists at {}", env_dir.display()),
        });
    }

    output::header("authkeys: initializing environment");

    std::fs::create_dir_all(env_dir)?;
    output::success(&format!("Created {}", env_dir.display()));

    std::fs::write(env_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    output::success("Generated config.toml with defaults");

    std::fs::write(env_dir.join("environment.toml"), "authorized-keys = \"\"\n")?;
    std::fs::write(env_dir.join("blocks.toml"), "")?;
    output::success("Created an empty key list");

    println!("\n  Next: authkeys add \"$(cat ~/.ssh/id_ed25519.pub)\"");

    super::audit_helpers::log_audit(
        env_dir,
        user,
        AuditAction::Init,
        vec![],
        Some("environment initialized".into()),
    );

    Ok(())
}
