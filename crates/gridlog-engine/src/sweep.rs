use gridlog_model::RowStore;

use crate::append::{append_row, move_row, AppendOptions};
use crate::placement::row_is_blank;
use crate::Result;

/// What a bulk sweep did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    /// Rows appended (or moved) into the destination.
    pub moved: u32,
    /// Blank source rows passed over.
    pub skipped: u32,
}

/// Applies the append (or move) to every non-blank unfrozen row of `source`.
///
/// Rows are processed in reverse index order so that, when deleting from the
/// source, row shifts from each deletion never skip or double-process a row.
/// Sweeps typically run with `options.use_lock` off: a bulk job serializes
/// itself by construction, and taking the global lock once per row buys
/// nothing. The option is honored either way.
pub fn sweep_all(
    source: &mut dyn RowStore,
    dest: &mut dyn RowStore,
    delete_from_source: bool,
    options: &AppendOptions<'_>,
) -> Result<SweepReport> {
    let frozen = source.frozen_row_count();
    let last = source.last_data_row();
    let mut report = SweepReport::default();
    if last <= frozen {
        return Ok(report);
    }

    for row in (frozen + 1..=last).rev() {
        if row_is_blank(source, row, options.ignore_checkbox_columns)? {
            report.skipped += 1;
            continue;
        }
        if delete_from_source {
            move_row(source, row, dest, options)?;
        } else {
            let mut values = source.read_row(row)?;
            values.truncate(source.column_count() as usize);
            append_row(dest, &values, options)?;
        }
        report.moved += 1;
    }
    log::debug!(
        "sweep finished: {} rows moved, {} blank rows skipped",
        report.moved,
        report.skipped
    );
    Ok(report)
}
