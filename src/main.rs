mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli::context::init(args.dir.as_deref());
    let user = args.user.as_deref();

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(user),
        Commands::List { full } => cli::commands::list::execute(user, *full),
        Commands::Add { keys } => cli::commands::add::execute(user, keys),
        Commands::Delete { ids } => cli::commands::delete::execute(user, ids),
        Commands::Import { identities } => cli::commands::import::execute(user, identities),
        Commands::Block { kind, message } => {
            cli::commands::block::execute_block(user, *kind, message.clone())
        }
        Commands::Unblock { kind } => cli::commands::block::execute_unblock(user, *kind),
        Commands::Log {
            author,
            since,
            key,
            last,
        } => cli::commands::log::execute(
            author.as_deref(),
            since.as_deref(),
            key.as_deref(),
            *last,
        ),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
