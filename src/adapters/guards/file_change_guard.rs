use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{AuthKeysError, Result};
use crate::core::models::outcome::OperationKind;
use crate::core::traits::change_guard::ChangeGuard;

/// Kinds of administrative block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    /// Blocks every change to the key list.
    AllChanges,
    /// Blocks removals only.
    RemoveObject,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::AllChanges => "all-changes",
            BlockType::RemoveObject => "remove-object",
        }
    }

    /// Whether an active block of this type vetoes `kind`.
    pub fn blocks(self, kind: OperationKind) -> bool {
        match self {
            BlockType::AllChanges => true,
            BlockType::RemoveObject => kind == OperationKind::Delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BlocksFile {
    #[serde(default, rename = "block")]
    blocks: Vec<Block>,
}

/// Change guard backed by `blocks.toml` in the environment directory.
///
/// Example:
/// ```text
/// [[block]]
/// type = "all-changes"
/// message = "release freeze until Monday"
/// ```
pub struct FileChangeGuard {
    path: PathBuf,
}

impl FileChangeGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Active blocks, in the order they were switched on.
    pub fn list(&self) -> Result<Vec<Block>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let file: BlocksFile = toml::from_str(&content).map_err(|e| AuthKeysError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", self.path.display()),
        })?;
        Ok(file.blocks)
    }

    /// Turn a block on, replacing the message of an existing one.
    pub fn switch_on(&self, block_type: BlockType, message: Option<String>) -> Result<()> {
        let mut blocks = self.list()?;
        blocks.retain(|b| b.block_type != block_type);
        blocks.push(Block {
            block_type,
            message,
        });
        self.write(blocks)
    }

    /// Turn a block off. Returns `false` if it was not on.
    pub fn switch_off(&self, block_type: BlockType) -> Result<bool> {
        let mut blocks = self.list()?;
        let before = blocks.len();
        blocks.retain(|b| b.block_type != block_type);
        if blocks.len() == before {
            return Ok(false);
        }
        self.write(blocks)?;
        Ok(true)
    }

    fn write(&self, blocks: Vec<Block>) -> Result<()> {
        let content =
            toml::to_string(&BlocksFile { blocks }).map_err(|e| AuthKeysError::InvalidConfig {
                detail: format!("Failed to serialize blocks: {e}"),
            })?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ChangeGuard for FileChangeGuard {
    fn check_blocked(&self, kind: OperationKind) -> Result<()> {
        let Some(block) = self.list()?.into_iter().find(|b| b.block_type.blocks(kind)) else {
            return Ok(());
        };

        tracing::debug!(%kind, block = block.block_type.as_str(), "operation blocked");
        let reason = block
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("\"{}\" block is active", block.block_type.as_str()));
        Err(AuthKeysError::Blocked {
            block: block.block_type.as_str().to_string(),
            reason,
        })
    }
}
