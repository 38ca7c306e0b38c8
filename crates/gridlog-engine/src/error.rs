use std::time::Duration;

use thiserror::Error;

use gridlog_model::StoreError;

use crate::DuplicateMode;

/// Errors surfaced by the append/placement engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("lock not acquired within {waited:?}")]
    LockTimeout { waited: Duration },
    #[error("duplicate-check mode {0:?} is not supported on this path")]
    UnsupportedMode(DuplicateMode),
    #[error("placement row {row} exceeds the table's addressable bounds ({max} rows)")]
    OutOfBounds { row: u32, max: u32 },
    #[error("unrecognized period {0:?} (expected \"monthly\" or \"yearly\")")]
    InvalidPeriod(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
