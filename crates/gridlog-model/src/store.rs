use thiserror::Error;

use crate::CellValue;

/// Errors surfaced by a [`RowStore`] adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("row {row} is out of bounds (allocated rows: {max})")]
    RowOutOfBounds { row: u32, max: u32 },
    #[error("column {col} is out of bounds")]
    ColumnOutOfBounds { col: u32 },
    #[error("backend error: {0}")]
    Backend(String),
}

/// Capability trait over an external 2-D growing table (e.g. one sheet of a
/// hosted spreadsheet).
///
/// All row and column indices are 1-based; index 0 is invalid everywhere.
/// The first [`frozen_row_count`](RowStore::frozen_row_count) rows are a
/// fixed header region that placement logic never touches.
///
/// Implementations are expected to be plain synchronous adapters; retry of
/// transient host failures is the caller's responsibility.
pub trait RowStore {
    /// Index of the last row containing any non-empty cell, or 0 when the
    /// whole table (headers included) is empty.
    fn last_data_row(&self) -> u32;

    /// Number of leading header rows never eligible for data placement.
    fn frozen_row_count(&self) -> u32;

    /// Total number of allocated rows, including blank trailing rows.
    fn max_allocated_rows(&self) -> u32;

    /// Natural column span of a data row, excluding any trailing digest
    /// column maintained by the engine.
    fn column_count(&self) -> u32;

    /// Reads one row. Cells past the row's stored width read as
    /// [`CellValue::Empty`]; the result is at least
    /// [`column_count`](RowStore::column_count) long.
    fn read_row(&self, row: u32) -> Result<Vec<CellValue>, StoreError>;

    /// Reads a vertical slice of one column, `from_row..=to_row` inclusive.
    /// The column may lie past [`column_count`](RowStore::column_count)
    /// (the digest column does); absent cells read as empty.
    fn read_column(&self, col: u32, from_row: u32, to_row: u32)
        -> Result<Vec<CellValue>, StoreError>;

    /// Overwrites one row starting at column 1. `values` may be wider than
    /// [`column_count`](RowStore::column_count) (a trailing digest cell).
    fn write_row(&mut self, row: u32, values: &[CellValue]) -> Result<(), StoreError>;

    /// Inserts a blank row so that it becomes row `row`, shifting that row
    /// and everything below it down by one.
    fn insert_blank_row_at(&mut self, row: u32) -> Result<(), StoreError>;

    /// Deletes one row, shifting everything below it up by one.
    fn delete_row(&mut self, row: u32) -> Result<(), StoreError>;

    /// Appends `n` blank rows past the current allocation.
    fn grow_by(&mut self, n: u32) -> Result<(), StoreError>;

    /// Whether the cell carries checkbox data validation. Supports the
    /// checkbox-aware blank-row test; hosts without per-cell metadata may
    /// always return false.
    fn is_checkbox_cell(&self, row: u32, col: u32) -> Result<bool, StoreError>;
}
