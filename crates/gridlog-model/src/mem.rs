use std::collections::HashSet;

use crate::{CellValue, RowStore, StoreError};

/// In-memory [`RowStore`] used by tests and by embedders that have no host
/// spreadsheet behind them.
///
/// Bounds behavior matches what a real adapter must do: 1-based indices,
/// `RowOutOfBounds` past the allocation, reads padded to the natural column
/// span.
#[derive(Debug, Clone, Default)]
pub struct MemTable {
    frozen_rows: u32,
    columns: u32,
    rows: Vec<Vec<CellValue>>,
    checkboxes: HashSet<(u32, u32)>,
}

impl MemTable {
    /// Creates a table with `frozen_rows + 8` blank allocated rows and a
    /// natural span of `columns`.
    pub fn new(frozen_rows: u32, columns: u32) -> Self {
        let allocated = (frozen_rows + 8) as usize;
        Self {
            frozen_rows,
            columns,
            rows: vec![Vec::new(); allocated],
            checkboxes: HashSet::new(),
        }
    }

    /// Builder helper: writes `values` into the first blank allocated row
    /// after the current last data row.
    pub fn push_row(mut self, values: &[CellValue]) -> Self {
        let row = self.last_data_row() + 1;
        let idx = (row - 1) as usize;
        if idx >= self.rows.len() {
            self.rows.resize(idx + 1, Vec::new());
        }
        self.rows[idx] = values.to_vec();
        self
    }

    /// Marks one cell as carrying checkbox validation.
    pub fn mark_checkbox(&mut self, row: u32, col: u32) {
        self.checkboxes.insert((row, col));
    }

    fn check_row(&self, row: u32) -> Result<usize, StoreError> {
        if row == 0 || row as usize > self.rows.len() {
            return Err(StoreError::RowOutOfBounds {
                row,
                max: self.rows.len() as u32,
            });
        }
        Ok((row - 1) as usize)
    }
}

impl RowStore for MemTable {
    fn last_data_row(&self) -> u32 {
        self.rows
            .iter()
            .rposition(|r| r.iter().any(|c| !c.is_empty()))
            .map(|i| i as u32 + 1)
            .unwrap_or(0)
    }

    fn frozen_row_count(&self) -> u32 {
        self.frozen_rows
    }

    fn max_allocated_rows(&self) -> u32 {
        self.rows.len() as u32
    }

    fn column_count(&self) -> u32 {
        self.columns
    }

    fn read_row(&self, row: u32) -> Result<Vec<CellValue>, StoreError> {
        let idx = self.check_row(row)?;
        let mut out = self.rows[idx].clone();
        if out.len() < self.columns as usize {
            out.resize(self.columns as usize, CellValue::Empty);
        }
        Ok(out)
    }

    fn read_column(
        &self,
        col: u32,
        from_row: u32,
        to_row: u32,
    ) -> Result<Vec<CellValue>, StoreError> {
        if col == 0 {
            return Err(StoreError::ColumnOutOfBounds { col });
        }
        self.check_row(from_row)?;
        self.check_row(to_row)?;
        let mut out = Vec::with_capacity((to_row - from_row + 1) as usize);
        for row in from_row..=to_row {
            let cells = &self.rows[(row - 1) as usize];
            out.push(
                cells
                    .get((col - 1) as usize)
                    .cloned()
                    .unwrap_or(CellValue::Empty),
            );
        }
        Ok(out)
    }

    fn write_row(&mut self, row: u32, values: &[CellValue]) -> Result<(), StoreError> {
        let idx = self.check_row(row)?;
        self.rows[idx] = values.to_vec();
        Ok(())
    }

    fn insert_blank_row_at(&mut self, row: u32) -> Result<(), StoreError> {
        if row == 0 || row as usize > self.rows.len() + 1 {
            return Err(StoreError::RowOutOfBounds {
                row,
                max: self.rows.len() as u32,
            });
        }
        self.rows.insert((row - 1) as usize, Vec::new());
        self.checkboxes = self
            .checkboxes
            .iter()
            .map(|&(r, c)| if r >= row { (r + 1, c) } else { (r, c) })
            .collect();
        Ok(())
    }

    fn delete_row(&mut self, row: u32) -> Result<(), StoreError> {
        let idx = self.check_row(row)?;
        self.rows.remove(idx);
        self.checkboxes = self
            .checkboxes
            .iter()
            .filter(|&&(r, _)| r != row)
            .map(|&(r, c)| if r > row { (r - 1, c) } else { (r, c) })
            .collect();
        Ok(())
    }

    fn grow_by(&mut self, n: u32) -> Result<(), StoreError> {
        self.rows
            .extend(std::iter::repeat(Vec::new()).take(n as usize));
        Ok(())
    }

    fn is_checkbox_cell(&self, row: u32, col: u32) -> Result<bool, StoreError> {
        self.check_row(row)?;
        Ok(self.checkboxes.contains(&(row, col)))
    }
}
