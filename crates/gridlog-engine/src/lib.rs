//! `gridlog-engine` implements the append-or-move core for append-only
//! tabular logs backed by an external grid (see `gridlog-model`'s
//! [`RowStore`](gridlog_model::RowStore)).
//!
//! The engine places rows under one of two empty-row policies, fingerprints
//! row content for O(n) duplicate lookups over a digest column, and
//! serializes concurrent appends behind a process-wide lock, mirroring the
//! single script lock of hosted spreadsheet platforms.

mod append;
mod digest;
mod duplicate;
mod error;
mod lock;
mod period;
mod placement;
mod sweep;

pub use append::{append_row, move_row, AppendOptions, AppendOutcome, RowLocation};
pub use digest::{compute_digest, HashAlgorithm, DEFAULT_SKIP_COLUMNS};
pub use duplicate::{is_duplicate, DuplicateMode};
pub use error::{EngineError, Result};
pub use lock::{LockGuard, ScriptLock, DEFAULT_LOCK_TIMEOUT};
pub use period::{bucket_name, Period};
pub use placement::{find_insertion_row, reserve_insertion_row, PlacementPolicy};
pub use sweep::{sweep_all, SweepReport};
