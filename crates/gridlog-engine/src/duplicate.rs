use serde::{Deserialize, Serialize};

use gridlog_model::{CellValue, RowStore};

use crate::digest::{compute_digest, HashAlgorithm};
use crate::Result;

/// How duplicate candidates are matched against existing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateMode {
    /// O(n) scan of the digest column one past the natural column span. The
    /// preferred mode; the whole reason the digest column exists.
    Digest,
    /// O(n·m) comparison of raw post-skip values against every row. Exists
    /// for tables without a digest column; correctness only.
    Raw,
}

impl Default for DuplicateMode {
    fn default() -> Self {
        DuplicateMode::Digest
    }
}

/// Returns whether `candidate`'s post-skip content already appears in the
/// table.
///
/// Scans rows 1 through `last_row_to_check` (default: the current last data
/// row). A table with zero data rows never matches. The candidate itself
/// must not yet be in the table; the append engine runs this check before
/// inserting.
pub fn is_duplicate(
    store: &dyn RowStore,
    candidate: &[CellValue],
    mode: DuplicateMode,
    last_row_to_check: Option<u32>,
    skip: u32,
    algorithm: HashAlgorithm,
) -> Result<bool> {
    let last = last_row_to_check.unwrap_or_else(|| store.last_data_row());
    if last == 0 || store.last_data_row() <= store.frozen_row_count() {
        return Ok(false);
    }

    match mode {
        DuplicateMode::Digest => {
            let digest_col = store.column_count() + 1;
            let needle = compute_digest(candidate, skip, algorithm);
            let column = store.read_column(digest_col, 1, last)?;
            Ok(column
                .iter()
                .any(|cell| matches!(cell, CellValue::Text(s) if *s == needle)))
        }
        DuplicateMode::Raw => {
            log::debug!("raw-mode duplicate scan over {last} rows");
            let span = store.column_count() as usize;
            let wanted: Vec<String> = candidate
                .iter()
                .take(span)
                .skip(skip as usize)
                .map(CellValue::canonical_text)
                .collect();
            for row in 1..=last {
                let cells = store.read_row(row)?;
                let have: Vec<String> = cells
                    .iter()
                    .take(span)
                    .skip(skip as usize)
                    .map(CellValue::canonical_text)
                    .collect();
                if have == wanted {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}
