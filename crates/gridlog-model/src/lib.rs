//! `gridlog-model` defines the data model shared by the gridlog engine and
//! its host adapters.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the append/placement engine (`gridlog-engine`)
//! - host spreadsheet adapters implementing [`RowStore`]
//! - IPC boundaries via `serde` (JSON-safe schema)

mod mem;
mod store;
mod value;

pub use mem::MemTable;
pub use store::{RowStore, StoreError};
pub use value::CellValue;

/// Result alias for row-store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
