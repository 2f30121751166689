//! Script replay.
//!
//! A script is a JSON file holding the initial size classes and a flat
//! list of operations. Replaying it produces one record per operation,
//! serializable as a machine-readable report.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quickfit_core::{AllocOutcome, FreeError, FreeOutcome, QuickFitAllocator};

/// A replayable operation script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Size classes the allocator is constructed with.
    pub block_sizes: Vec<usize>,
    /// Operations, replayed in order.
    pub ops: Vec<ScriptOp>,
}

/// One scripted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    Allocate { size: usize },
    Free { address: usize },
    Check { address: usize },
}

/// Outcome record for one replayed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OpRecord {
    Reused { address: usize, size: usize },
    Grown { address: usize, size: usize },
    Recycled { address: usize, size: usize },
    Unrecycled { address: usize, size: usize },
    InvalidFree { address: usize },
    Checked { address: usize, free: bool },
}

/// Full replay output: per-operation records plus final allocator state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub records: Vec<OpRecord>,
    pub final_pool_len: usize,
    pub final_active: usize,
}

/// Script loading or parsing failure.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Script {
    /// Parses a script from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a script from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Replays the script against a fresh allocator.
    pub fn run(&self) -> ReplayReport {
        let mut allocator = QuickFitAllocator::new(&self.block_sizes);
        let records = self
            .ops
            .iter()
            .map(|&op| match op {
                ScriptOp::Allocate { size } => match allocator.allocate(size) {
                    AllocOutcome::Reused { address, size } => OpRecord::Reused { address, size },
                    AllocOutcome::Grown { address, size } => OpRecord::Grown { address, size },
                },
                ScriptOp::Free { address } => match allocator.free(address) {
                    Ok(FreeOutcome::Recycled { address, size }) => {
                        OpRecord::Recycled { address, size }
                    }
                    Ok(FreeOutcome::Unrecycled { address, size }) => {
                        OpRecord::Unrecycled { address, size }
                    }
                    Err(FreeError::InvalidAddress { address }) => OpRecord::InvalidFree { address },
                },
                ScriptOp::Check { address } => OpRecord::Checked {
                    address,
                    free: allocator.is_block_free(address),
                },
            })
            .collect();
        ReplayReport {
            records,
            final_pool_len: allocator.pool_len(),
            final_active: allocator.active_count(),
        }
    }
}

impl ReplayReport {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
