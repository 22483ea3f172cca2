pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::guards::file_change_guard::BlockType;

/// Manage the SSH public keys authorized to access an environment.
#[derive(Parser, Debug)]
#[command(name = "authkeys", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Environment directory
    #[arg(long, global = true, env = "AUTHKEYS_DIR")]
    pub dir: Option<PathBuf>,

    /// User the keys are listed for and changes are recorded under
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the environment directory
    Init,

    /// List authorized keys
    List {
        /// Show the complete key lines
        #[arg(long)]
        full: bool,
    },

    /// Add one or more public keys
    Add {
        /// Public key lines, e.g. "ssh-ed25519 AAAA... user@host"
        #[arg(value_name = "SSH_KEY", required = true)]
        keys: Vec<String>,
    },

    /// Delete keys by fingerprint, full key text or comment
    Delete {
        #[arg(value_name = "SSH_KEY_ID", required = true)]
        ids: Vec<String>,
    },

    /// Import keys from an identity provider, e.g. lp:alice or gh:alice
    Import {
        #[arg(value_name = "IDENTITY", required = true)]
        identities: Vec<String>,
    },

    /// Block changes to the key list
    Block {
        #[arg(value_enum)]
        kind: BlockType,
        /// Reason shown to anyone whose change is blocked
        #[arg(long)]
        message: Option<String>,
    },

    /// Lift a block
    Unblock {
        #[arg(value_enum)]
        kind: BlockType,
    },

    /// Show the change history
    Log {
        /// Filter by user
        #[arg(long)]
        author: Option<String>,
        /// Filter entries since this date (ISO 8601)
        #[arg(long)]
        since: Option<String>,
        /// Only changes to this key (fingerprint or listed prefix)
        #[arg(long)]
        key: Option<String>,
        /// Show last N entries
        #[arg(long)]
        last: Option<usize>,
    },
}
