use std::time::Duration;

use gridlog_model::{CellValue, RowStore};

use crate::digest::{compute_digest, HashAlgorithm, DEFAULT_SKIP_COLUMNS};
use crate::duplicate::{is_duplicate, DuplicateMode};
use crate::lock::{ScriptLock, DEFAULT_LOCK_TIMEOUT};
use crate::placement::{reserve_insertion_row, PlacementPolicy};
use crate::{EngineError, Result};

/// Destination span of a placed row, handed to duplicate callbacks.
///
/// `columns` is the natural column span; a trailing digest cell, when
/// written, lies one past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLocation {
    pub row: u32,
    pub columns: u32,
}

/// Result of an append or move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    pub location: RowLocation,
    pub was_duplicate: bool,
}

/// Callback invoked when a duplicate lands. May rewrite cells of the
/// destination row (e.g. flag it) but must not change its span.
pub type DuplicateCallback<'a> =
    Box<dyn Fn(&mut dyn RowStore, RowLocation) -> Result<()> + Send + 'a>;

/// Configuration for [`append_row`] / [`move_row`].
///
/// An explicit options struct with named defaults; every field has a
/// documented default so call sites never depend on parameter order.
pub struct AppendOptions<'a> {
    /// Write a trailing digest cell one past the natural column span.
    /// Default: false.
    pub add_digest: bool,
    /// When set, a duplicate check runs against the table state *before*
    /// insertion and the callback fires after the row lands. Default: none.
    pub on_duplicate: Option<DuplicateCallback<'a>>,
    /// Serialize the whole operation behind [`ScriptLock::global`].
    /// `false` is the documented unsafe mode for callers that already
    /// serialize themselves (e.g. a single-threaded sweep). Default: true.
    pub use_lock: bool,
    /// Bounded wait for lock acquisition. Default: 300 seconds.
    pub lock_timeout: Duration,
    /// Empty-row policy for choosing the destination. Default: `Append`.
    pub placement: PlacementPolicy,
    /// Treat checkbox-only rows as blank during placement and sweeps.
    /// Default: false.
    pub ignore_checkbox_columns: bool,
    /// Leading columns excluded from digests (the timestamp). Default: 1.
    pub skip_columns: u32,
    /// Matching mode for the duplicate pre-check. The append path only
    /// supports [`DuplicateMode::Digest`]; requesting `Raw` here fails with
    /// [`EngineError::UnsupportedMode`]. Default: `Digest`.
    pub duplicate_mode: DuplicateMode,
    /// Hash behind digest cells and digest-mode matching. Default: SHA-1.
    pub hash_algorithm: HashAlgorithm,
}

impl Default for AppendOptions<'_> {
    fn default() -> Self {
        Self {
            add_digest: false,
            on_duplicate: None,
            use_lock: true,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            placement: PlacementPolicy::Append,
            ignore_checkbox_columns: false,
            skip_columns: DEFAULT_SKIP_COLUMNS,
            duplicate_mode: DuplicateMode::Digest,
            hash_algorithm: HashAlgorithm::Sha1,
        }
    }
}

impl<'a> AppendOptions<'a> {
    pub fn with_digest(mut self) -> Self {
        self.add_digest = true;
        self
    }

    pub fn without_lock(mut self) -> Self {
        self.use_lock = false;
        self
    }

    pub fn placement(mut self, policy: PlacementPolicy) -> Self {
        self.placement = policy;
        self
    }

    pub fn on_duplicate(
        mut self,
        callback: impl Fn(&mut dyn RowStore, RowLocation) -> Result<()> + Send + 'a,
    ) -> Self {
        self.on_duplicate = Some(Box::new(callback));
        self
    }
}

/// Appends one row of values to `dest`.
///
/// Runs the reserve → write → digest → notify sequence of the engine's state
/// machine, behind the global lock unless `options.use_lock` is off. Errors
/// from collaborators propagate unswallowed; the lock releases on every path.
pub fn append_row(
    dest: &mut dyn RowStore,
    values: &[CellValue],
    options: &AppendOptions<'_>,
) -> Result<AppendOutcome> {
    let _guard = if options.use_lock {
        Some(ScriptLock::global().acquire(options.lock_timeout)?)
    } else {
        None
    };
    append_locked(dest, values, options)
}

/// Moves row `source_row` of `source` into `dest`.
///
/// The source row is deleted only after the whole append succeeded
/// (at-most-once: a failed transfer never deletes the source). The lock,
/// when enabled, covers the append *and* the deletion.
pub fn move_row(
    source: &mut dyn RowStore,
    source_row: u32,
    dest: &mut dyn RowStore,
    options: &AppendOptions<'_>,
) -> Result<AppendOutcome> {
    let _guard = if options.use_lock {
        Some(ScriptLock::global().acquire(options.lock_timeout)?)
    } else {
        None
    };
    let mut values = source.read_row(source_row)?;
    values.truncate(source.column_count() as usize);
    let outcome = append_locked(dest, &values, options)?;
    source.delete_row(source_row)?;
    Ok(outcome)
}

fn append_locked(
    dest: &mut dyn RowStore,
    values: &[CellValue],
    options: &AppendOptions<'_>,
) -> Result<AppendOutcome> {
    // Duplicate detection must see the table before the candidate lands.
    let was_duplicate = match &options.on_duplicate {
        Some(_) => {
            if options.duplicate_mode != DuplicateMode::Digest {
                return Err(EngineError::UnsupportedMode(options.duplicate_mode));
            }
            is_duplicate(
                dest,
                values,
                DuplicateMode::Digest,
                None,
                options.skip_columns,
                options.hash_algorithm,
            )?
        }
        None => false,
    };

    let row = reserve_insertion_row(dest, options.placement, options.ignore_checkbox_columns)?;
    dest.write_row(row, values)?;

    if options.add_digest {
        // The digest is computed over the destination's values as written,
        // not over the caller's slice.
        let mut written = dest.read_row(row)?;
        written.truncate(dest.column_count() as usize);
        let digest = compute_digest(&written, options.skip_columns, options.hash_algorithm);
        written.push(CellValue::Text(digest));
        dest.write_row(row, &written)?;
    }

    let location = RowLocation {
        row,
        columns: dest.column_count(),
    };
    if was_duplicate {
        log::debug!("duplicate landed at row {row}, invoking callback");
        if let Some(callback) = &options.on_duplicate {
            callback(dest, location)?;
        }
    }
    Ok(AppendOutcome {
        location,
        was_duplicate,
    })
}
