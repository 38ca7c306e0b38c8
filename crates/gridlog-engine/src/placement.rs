use serde::{Deserialize, Serialize};

use gridlog_model::{CellValue, RowStore};

use crate::{EngineError, Result};

/// Strategy for choosing the row a new record goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// O(1): the row immediately after the last non-empty row.
    Append,
    /// O(n): reuse the first interior gap left by manual deletions, falling
    /// back to appending past the end when the data region is dense.
    FirstGap,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        PlacementPolicy::Append
    }
}

/// Whether a row counts as blank for placement purposes.
///
/// With `ignore_checkbox_columns` set, a cell that is non-empty only because
/// it holds a checkbox boolean is excluded from the test, so a row whose only
/// content is unticked/ticked checkboxes still reads as blank.
pub(crate) fn row_is_blank(
    store: &dyn RowStore,
    row: u32,
    ignore_checkbox_columns: bool,
) -> Result<bool> {
    let cells = store.read_row(row)?;
    for (i, cell) in cells.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        if ignore_checkbox_columns
            && matches!(cell, CellValue::Bool(_))
            && store.is_checkbox_cell(row, i as u32 + 1)?
        {
            continue;
        }
        return Ok(false);
    }
    Ok(true)
}

/// Computes the row new data should be inserted at, without reserving it.
///
/// The returned index is always past the frozen header region. An entirely
/// empty table yields the first unfrozen row under either policy.
pub fn find_insertion_row(
    store: &dyn RowStore,
    policy: PlacementPolicy,
    ignore_checkbox_columns: bool,
) -> Result<u32> {
    let frozen = store.frozen_row_count();
    let first_unfrozen = frozen + 1;
    let last = store.last_data_row();
    if last <= frozen {
        return Ok(first_unfrozen);
    }

    match policy {
        PlacementPolicy::Append => Ok(last + 1),
        PlacementPolicy::FirstGap => {
            // Backward scan: the last row with real content. `last_data_row`
            // already ignores trailing fully-empty rows, but checkbox-only
            // rows can still trail the data region.
            let mut last_real = frozen;
            for row in (first_unfrozen..=last).rev() {
                if !row_is_blank(store, row, ignore_checkbox_columns)? {
                    last_real = row;
                    break;
                }
            }
            if last_real == frozen {
                return Ok(first_unfrozen);
            }
            // Forward scan: the first interior gap wins over appending.
            for row in first_unfrozen..=last_real {
                if row_is_blank(store, row, ignore_checkbox_columns)? {
                    log::debug!("reusing interior gap at row {row}");
                    return Ok(row);
                }
            }
            Ok(last_real + 1)
        }
    }
}

/// Computes the insertion row and physically reserves it.
///
/// The reservation is a blank row inserted at the target (or one row of
/// growth when the target lies past the allocation), so that a concurrent
/// caller can never be handed the same index. Callers wanting that guarantee
/// must hold the script lock around reserve-and-write; see
/// [`append_row`](crate::append_row).
pub fn reserve_insertion_row(
    store: &mut dyn RowStore,
    policy: PlacementPolicy,
    ignore_checkbox_columns: bool,
) -> Result<u32> {
    let row = find_insertion_row(store, policy, ignore_checkbox_columns)?;
    let allocated = store.max_allocated_rows();
    if row > allocated {
        store
            .grow_by(1)
            .map_err(|_| EngineError::OutOfBounds { row, max: allocated })?;
    } else {
        store.insert_blank_row_at(row)?;
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlog_model::MemTable;
    use pretty_assertions::assert_eq;

    fn seeded() -> MemTable {
        // Header in row 1, data in rows 2-5.
        MemTable::new(1, 3)
            .push_row(&["When".into(), "Who".into(), "Answer".into()])
            .push_row(&["t1".into(), "alice".into(), "1".into()])
            .push_row(&["t2".into(), "bob".into(), "2".into()])
            .push_row(&["t3".into(), "carol".into(), "3".into()])
            .push_row(&["t4".into(), "dave".into(), "4".into()])
    }

    #[test]
    fn append_targets_the_row_after_the_last() {
        let table = seeded();
        assert_eq!(
            find_insertion_row(&table, PlacementPolicy::Append, false).unwrap(),
            6
        );
    }

    #[test]
    fn empty_table_targets_first_unfrozen_row() {
        let table = MemTable::new(2, 3);
        for policy in [PlacementPolicy::Append, PlacementPolicy::FirstGap] {
            assert_eq!(find_insertion_row(&table, policy, false).unwrap(), 3);
        }
    }

    #[test]
    fn first_gap_reuses_an_interior_gap() {
        let mut table = seeded();
        table.write_row(3, &[]).unwrap();
        assert_eq!(
            find_insertion_row(&table, PlacementPolicy::FirstGap, false).unwrap(),
            3
        );
    }

    #[test]
    fn first_gap_on_a_dense_table_appends_past_the_end() {
        let table = seeded();
        assert_eq!(
            find_insertion_row(&table, PlacementPolicy::FirstGap, false).unwrap(),
            6
        );
    }

    #[test]
    fn checkbox_only_row_counts_as_blank_when_asked() {
        let mut table = seeded();
        table
            .write_row(3, &[CellValue::Empty, CellValue::Empty, false.into()])
            .unwrap();
        table.mark_checkbox(3, 3);
        assert_eq!(
            find_insertion_row(&table, PlacementPolicy::FirstGap, true).unwrap(),
            3
        );
        // Without the exception the boolean makes the row non-blank.
        assert_eq!(
            find_insertion_row(&table, PlacementPolicy::FirstGap, false).unwrap(),
            6
        );
    }

    #[test]
    fn reserve_inserts_a_blank_row_at_the_target() {
        let mut table = seeded();
        table.write_row(3, &[]).unwrap();
        let row = reserve_insertion_row(&mut table, PlacementPolicy::FirstGap, false).unwrap();
        assert_eq!(row, 3);
        // Row 3 is the fresh reservation; the old row 4 data moved to row 5.
        assert!(row_is_blank(&table, 3, false).unwrap());
        assert_eq!(table.read_row(5).unwrap()[1], "carol".into());
    }

    #[test]
    fn policies_serialize_snake_case() {
        assert_eq!(
            serde_json::to_value(PlacementPolicy::FirstGap).unwrap(),
            serde_json::json!("first_gap")
        );
        assert_eq!(
            serde_json::to_value(PlacementPolicy::Append).unwrap(),
            serde_json::json!("append")
        );
    }

    #[test]
    fn reserve_grows_the_table_when_the_target_is_past_the_allocation() {
        let mut table = MemTable::new(0, 1);
        let allocated = table.max_allocated_rows();
        for row in 1..=allocated {
            table.write_row(row, &["x".into()]).unwrap();
        }
        let row = reserve_insertion_row(&mut table, PlacementPolicy::Append, false).unwrap();
        assert_eq!(row, allocated + 1);
        assert_eq!(table.max_allocated_rows(), allocated + 1);
    }
}
