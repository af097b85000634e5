//! Sparse two-dimensional focus grids.
//!
//! A [`FocusGrid`] is a table of slots addressed by 1-based row and column
//! indices. A slot either names a focusable item or is absent; rows are
//! ragged and absent entries mean "no focusable widget here". The grid keeps
//! only [`ItemId`] handles, never items.
//!
//! Slot `(1, 1)` is expected to hold a valid item so a navigator never
//! starts in an unrecoverable position. Construction does not enforce this;
//! [`FocusGrid::validate`] checks it on demand.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::item::ItemId;

/// A 1-based slot address in a [`FocusGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    /// Column index, starting at 1.
    pub x: i32,
    /// Row index, starting at 1.
    pub y: i32,
}

impl GridPos {
    /// Create a new slot address.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The first slot, `(1, 1)`.
    pub const ORIGIN: Self = Self { x: 1, y: 1 };
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One row of a grid: occupied columns in ascending order.
pub type GridRow = BTreeMap<i32, ItemId>;

/// Errors reported by [`FocusGrid::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Slot `(1, 1)` does not hold an item.
    #[error("the origin slot (1, 1) is empty")]
    MissingOrigin,
    /// A row exists but has no occupied columns, so no search can land in it.
    #[error("row {y} has no occupied columns")]
    EmptyRow {
        /// The offending row index.
        y: i32,
    },
    /// A slot uses an index below 1.
    #[error("slot ({x}, {y}) is outside the 1-based index range")]
    IndexOutOfRange {
        /// The offending column index.
        x: i32,
        /// The offending row index.
        y: i32,
    },
}

/// A sparse table of focusable-item references.
///
/// Lookup is O(log n) per axis; ragged layouts cost nothing for the slots
/// they leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusGrid {
    rows: BTreeMap<i32, GridRow>,
}

impl FocusGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from row literals, top to bottom.
    ///
    /// Each `None` entry leaves its slot absent; rows that end up with no
    /// occupied column are not created at all.
    ///
    /// ```ignore
    /// // A 2x2 layout with a gap in the lower-left corner:
    /// let grid = FocusGrid::from_rows([
    ///     vec![Some(a), Some(b)],
    ///     vec![None, Some(c)],
    /// ]);
    /// ```
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<Option<ItemId>>>,
    {
        let mut grid = Self::new();
        for (row_offset, columns) in rows.into_iter().enumerate() {
            let y = row_offset as i32 + 1;
            for (col_offset, slot) in columns.into_iter().enumerate() {
                if let Some(item) = slot {
                    grid.insert(GridPos::new(col_offset as i32 + 1, y), item);
                }
            }
        }
        grid
    }

    /// Place an item at a slot, returning the previous occupant if any.
    pub fn insert(&mut self, pos: GridPos, item: ItemId) -> Option<ItemId> {
        self.rows.entry(pos.y).or_default().insert(pos.x, item)
    }

    /// Clear a slot, returning its occupant if any.
    ///
    /// The row entry is kept even when its last column is removed, so a
    /// layout emptied this way is reported as malformed by the navigator
    /// rather than silently skipped.
    pub fn remove(&mut self, pos: GridPos) -> Option<ItemId> {
        self.rows.get_mut(&pos.y)?.remove(&pos.x)
    }

    /// The item at a slot, if present.
    #[inline]
    pub fn at(&self, pos: GridPos) -> Option<ItemId> {
        self.rows.get(&pos.y)?.get(&pos.x).copied()
    }

    /// Check whether a slot is occupied.
    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.at(pos).is_some()
    }

    /// A whole row, if it exists.
    #[inline]
    pub fn row(&self, y: i32) -> Option<&GridRow> {
        self.rows.get(&y)
    }

    /// Check if the grid has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in ascending index order.
    pub fn rows(&self) -> impl Iterator<Item = (i32, &GridRow)> {
        self.rows.iter().map(|(&y, row)| (y, row))
    }

    /// The highest row index, if the grid has any rows.
    pub fn last_row_index(&self) -> Option<i32> {
        self.rows.keys().next_back().copied()
    }

    /// Check the documented layout invariants.
    ///
    /// Returns the first violation found: a missing `(1, 1)` slot, a row
    /// with no occupied columns, or an index below 1. Purely advisory; the
    /// navigator tolerates malformed grids by refusing to move.
    pub fn validate(&self) -> Result<(), GridError> {
        for (&y, row) in &self.rows {
            if y < 1 {
                let x = row.keys().next().copied().unwrap_or(1);
                return Err(GridError::IndexOutOfRange { x, y });
            }
            if row.is_empty() {
                return Err(GridError::EmptyRow { y });
            }
            if let Some(&x) = row.keys().next() {
                if x < 1 {
                    return Err(GridError::IndexOutOfRange { x, y });
                }
            }
        }
        if !self.contains(GridPos::ORIGIN) {
            return Err(GridError::MissingOrigin);
        }
        Ok(())
    }

    /// Append every row of `donor` after this grid's last row.
    ///
    /// Donor rows are renumbered consecutively; their column indices are
    /// preserved as-is.
    pub(crate) fn append_rows(&mut self, donor: FocusGrid) {
        let base = self.last_row_index().unwrap_or(0);
        for (offset, (_, row)) in donor.rows.into_iter().enumerate() {
            self.rows.insert(base + 1 + offset as i32, row);
        }
    }

    /// Append each donor row's columns to the end of the same-index row
    /// here, creating rows that do not exist yet.
    ///
    /// Relative column order within every donor row is preserved; appended
    /// columns are renumbered after the receiver row's last column.
    pub(crate) fn append_row_segments(&mut self, donor: FocusGrid) {
        for (y, columns) in donor.rows {
            let row = self.rows.entry(y).or_default();
            let mut next = row.keys().next_back().copied().unwrap_or(0);
            for (_, item) in columns {
                next += 1;
                row.insert(next, item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<ItemId> {
        let mut map: SlotMap<ItemId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn from_rows_skips_absent_slots() {
        let id = ids(3);
        let grid = FocusGrid::from_rows([
            vec![Some(id[0]), Some(id[1])],
            vec![None, Some(id[2])],
        ]);

        assert_eq!(grid.at(GridPos::new(1, 1)), Some(id[0]));
        assert_eq!(grid.at(GridPos::new(2, 1)), Some(id[1]));
        assert_eq!(grid.at(GridPos::new(1, 2)), None);
        assert_eq!(grid.at(GridPos::new(2, 2)), Some(id[2]));
    }

    #[test]
    fn from_rows_drops_fully_absent_rows() {
        let id = ids(1);
        let grid = FocusGrid::from_rows([vec![Some(id[0])], vec![None, None]]);

        assert!(grid.row(2).is_none());
        assert_eq!(grid.last_row_index(), Some(1));
    }

    #[test]
    fn remove_keeps_emptied_row() {
        let id = ids(2);
        let mut grid =
            FocusGrid::from_rows([vec![Some(id[0])], vec![Some(id[1])]]);

        assert_eq!(grid.remove(GridPos::new(1, 2)), Some(id[1]));
        assert!(grid.row(2).is_some());
        assert_eq!(grid.validate(), Err(GridError::EmptyRow { y: 2 }));
    }

    #[test]
    fn validate_requires_origin() {
        let id = ids(1);
        let mut grid = FocusGrid::new();
        grid.insert(GridPos::new(2, 1), id[0]);

        assert_eq!(grid.validate(), Err(GridError::MissingOrigin));

        grid.insert(GridPos::ORIGIN, id[0]);
        assert_eq!(grid.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_non_positive_indices() {
        let id = ids(1);
        let mut grid = FocusGrid::new();
        grid.insert(GridPos::ORIGIN, id[0]);
        grid.insert(GridPos::new(0, 1), id[0]);

        assert_eq!(
            grid.validate(),
            Err(GridError::IndexOutOfRange { x: 0, y: 1 })
        );
    }

    #[test]
    fn append_rows_renumbers_consecutively() {
        let id = ids(3);
        let mut grid = FocusGrid::from_rows([vec![Some(id[0])]]);

        // Donor rows 1 and 3: the gap does not survive the append.
        let mut donor = FocusGrid::new();
        donor.insert(GridPos::new(1, 1), id[1]);
        donor.insert(GridPos::new(1, 3), id[2]);
        grid.append_rows(donor);

        assert_eq!(grid.at(GridPos::new(1, 2)), Some(id[1]));
        assert_eq!(grid.at(GridPos::new(1, 3)), Some(id[2]));
        assert_eq!(grid.last_row_index(), Some(3));
    }

    #[test]
    fn append_row_segments_preserves_order() {
        let id = ids(2);
        let mut grid = FocusGrid::from_rows([vec![Some(id[0])]]);
        let donor = FocusGrid::from_rows([vec![Some(id[1])]]);

        grid.append_row_segments(donor);

        assert_eq!(grid.at(GridPos::new(1, 1)), Some(id[0]));
        assert_eq!(grid.at(GridPos::new(2, 1)), Some(id[1]));
    }

    #[test]
    fn append_row_segments_creates_missing_rows() {
        let id = ids(2);
        let mut grid = FocusGrid::from_rows([vec![Some(id[0])]]);
        let donor = FocusGrid::from_rows([vec![], vec![Some(id[1])]]);

        grid.append_row_segments(donor);

        assert_eq!(grid.at(GridPos::new(1, 2)), Some(id[1]));
    }
}
