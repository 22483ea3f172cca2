use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::presenter::{DisplayMode, Presenter};

/// Execute the `authkeys list` command.
pub fn execute(user: Option<&str>, full: bool) -> Result<()> {
    let env_dir = crate::cli::context::require_initialized()?;
    let config = AppConfig::load(env_dir)?;
    let user = super::audit_helpers::acting_user(user, Some(&config));

    let keys = crate::cli::context::engine(env_dir).list()?;

    if keys.is_empty() {
        output::warning(&format!("No keys for user {user}."));
        output::note("Run 'authkeys add <ssh-key>' to add one.");
        return Ok(());
    }

    let mode = if full {
        DisplayMode::Full
    } else {
        DisplayMode::Short
    };

    println!("Keys for user {user}:");
    println!("{}", Presenter::format(&keys, mode));
    Ok(())
}
