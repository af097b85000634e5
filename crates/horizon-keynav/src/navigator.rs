//! Directional focus navigation over a sparse grid.
//!
//! This module provides [`FocusNavigator`], which owns a cursor into a
//! caller-supplied [`FocusGrid`] and resolves "move focus up/down/left/right"
//! intents into a new selection. Each container that manages its own focus
//! holds one navigator; a container without a grid delegates to an ancestor.
//!
//! # Move resolution
//!
//! A move is a unit displacement along one axis. When the literal target
//! slot is absent the navigator falls back, in order, to:
//!
//! 1. **Vertical wrap** - the target row does not exist at all, so the
//!    cursor reappears at the farthest row in the opposite direction.
//! 2. **Vertical step** - the target row exists but has a gap in the
//!    cursor's column, so the nearest occupied column in that row is taken
//!    (left first, then right; the bias is a fixed tie-break).
//! 3. **Horizontal wrap** - the target column is absent in the row, so the
//!    cursor reappears at the farthest occupied column on the opposite side.
//!
//! A landing whose item is the currently-selected item and marked inactive
//! is skipped and the search continues with the same displacement, which
//! lets one item span several slots without trapping the cursor.
//!
//! # Usage
//!
//! ```ignore
//! use horizon_keynav::{FocusGrid, FocusNavigator};
//!
//! let grid = FocusGrid::from_rows([
//!     vec![Some(toolbar_open), Some(toolbar_save)],
//!     vec![Some(editor)],
//! ]);
//! let mut nav = FocusNavigator::new(grid);
//!
//! // Down from the toolbar lands on the editor.
//! let handled = nav.resolve_move(&mut storage, 0, 1);
//! assert!(handled);
//! ```

use std::collections::HashSet;

use crate::events::{FocusInEvent, FocusOutEvent, FocusReason, TapGestureEvent};
use crate::grid::{FocusGrid, GridPos, GridRow};
use crate::input::{Direction, InputCapabilities};
use crate::item::{ItemAccess, ItemId};

/// Tracing target for navigator diagnostics.
const TARGET: &str = "horizon_keynav::navigator";

/// Per-axis gates for directional movement.
///
/// A gated-off axis still consumes moves along it, so the input does not
/// fall through to an ancestor, but the cursor stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementGates {
    horizontal: bool,
    vertical: bool,
}

impl Default for MovementGates {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl MovementGates {
    /// Both axes allowed.
    pub const fn allow_all() -> Self {
        Self {
            horizontal: true,
            vertical: true,
        }
    }

    /// Check if horizontal movement is allowed.
    #[inline]
    pub fn horizontal(&self) -> bool {
        self.horizontal
    }

    /// Check if vertical movement is allowed.
    #[inline]
    pub fn vertical(&self) -> bool {
        self.vertical
    }

    /// Allow or gate off horizontal movement.
    pub fn set_horizontal(&mut self, allowed: bool) {
        self.horizontal = allowed;
    }

    /// Allow or gate off vertical movement.
    pub fn set_vertical(&mut self, allowed: bool) {
        self.vertical = allowed;
    }
}

/// Resolves directional focus moves over a sparse grid of items.
///
/// The navigator holds the cursor and the grid; items themselves live in
/// host storage behind [`ItemAccess`]. On every accepted move it:
///
/// 1. Sends a [`FocusOutEvent`] to the item losing focus (when the item
///    actually changes)
/// 2. Moves the cursor
/// 3. Sends a [`FocusInEvent`] to the item gaining focus
/// 4. Requests a fast repaint of the owning region
///
/// One move completes before the next is issued; there is no suspension
/// point inside resolution.
#[derive(Debug)]
pub struct FocusNavigator {
    /// The grid, or `None` when this navigator delegates to an ancestor.
    grid: Option<FocusGrid>,
    /// Current slot address. Expected to address a present slot after any
    /// completed move.
    cursor: GridPos,
    /// Per-axis movement gates.
    gates: MovementGates,
    /// Surrogate region for repaint requests; `None` means the navigator's
    /// own region.
    repaint_target: Option<ItemId>,
}

impl Default for FocusNavigator {
    /// An inert navigator: no grid, so every move delegates upward.
    fn default() -> Self {
        Self {
            grid: None,
            cursor: GridPos::ORIGIN,
            gates: MovementGates::allow_all(),
            repaint_target: None,
        }
    }
}

impl FocusNavigator {
    /// Create a navigator over `grid` with the cursor at `(1, 1)`.
    ///
    /// Slot `(1, 1)` is expected to hold a valid item; this is not checked
    /// here (see [`FocusGrid::validate`]).
    pub fn new(grid: FocusGrid) -> Self {
        Self::with_cursor(grid, GridPos::ORIGIN)
    }

    /// Create a navigator with an explicit initial cursor.
    pub fn with_cursor(grid: FocusGrid, cursor: GridPos) -> Self {
        Self {
            grid: Some(grid),
            cursor,
            gates: MovementGates::allow_all(),
            repaint_target: None,
        }
    }

    /// Attach (or replace) the grid. The cursor defaults to `(1, 1)` when
    /// not supplied.
    pub fn initialize(&mut self, grid: FocusGrid, cursor: Option<GridPos>) {
        self.grid = Some(grid);
        self.cursor = cursor.unwrap_or(GridPos::ORIGIN);
    }

    /// Permanently turn off focus handling for this navigator.
    ///
    /// Subsequent moves report "not handled" so an ancestor can claim them,
    /// and [`current_item`](Self::current_item) returns `None`. Called
    /// automatically on the child by the merge operations.
    pub fn disable(&mut self) {
        self.grid = None;
    }

    /// Whether this navigator currently manages a grid.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.grid.is_some()
    }

    /// The managed grid, if any.
    #[inline]
    pub fn grid(&self) -> Option<&FocusGrid> {
        self.grid.as_ref()
    }

    /// The current cursor position.
    #[inline]
    pub fn cursor(&self) -> GridPos {
        self.cursor
    }

    /// The current movement gates.
    #[inline]
    pub fn movement_gates(&self) -> MovementGates {
        self.gates
    }

    /// Mutable access to the movement gates.
    pub fn movement_gates_mut(&mut self) -> &mut MovementGates {
        &mut self.gates
    }

    /// Use `region`'s item as the surrogate for repaint requests instead of
    /// the navigator's own region.
    pub fn set_repaint_target(&mut self, region: Option<ItemId>) {
        self.repaint_target = region;
    }

    /// The item at the cursor, or `None` when no grid is present.
    pub fn current_item(&self) -> Option<ItemId> {
        self.grid.as_ref()?.at(self.cursor)
    }

    /// Resolve a directional move.
    ///
    /// `(dx, dy)` is a unit displacement with at most one axis non-zero.
    ///
    /// # Returns
    ///
    /// `true` whenever a grid is present, even if no movement occurred;
    /// `false` when there is no grid, signaling that an ancestor navigator
    /// should process the input instead.
    pub fn resolve_move<S: ItemAccess>(&mut self, scene: &mut S, dx: i32, dy: i32) -> bool {
        self.resolve_with_reason(scene, dx, dy, FocusReason::Directional)
    }

    /// Resolve a move along a [`Direction`].
    pub fn resolve_direction<S: ItemAccess>(
        &mut self,
        scene: &mut S,
        direction: Direction,
    ) -> bool {
        let (dx, dy) = direction.delta();
        self.resolve_move(scene, dx, dy)
    }

    /// Establish the first visible focus.
    ///
    /// When the device's input modality uses directional (non-pointer)
    /// focus, this synthesizes a zero-displacement move so the initial slot
    /// receives exactly one [`FocusInEvent`] and no [`FocusOutEvent`],
    /// without changing the cursor. Pointer-driven devices get no initial
    /// highlight.
    pub fn focus_initial_item<S: ItemAccess>(
        &mut self,
        scene: &mut S,
        caps: &dyn InputCapabilities,
    ) {
        if caps.uses_directional_focus() {
            self.resolve_with_reason(scene, 0, 0, FocusReason::Initial);
        }
    }

    /// Request a tap gesture at the current item's visual center.
    ///
    /// Lets a confirmation key activate the focused element on devices
    /// without a pointer. Returns whether an item was available.
    pub fn synthesize_activation<S: ItemAccess>(&mut self, scene: &mut S) -> bool {
        let Some(id) = self.current_item() else {
            return false;
        };
        let Some(item) = scene.get_item(id) else {
            return false;
        };
        let center = item.bounding_box().center();
        scene.post_tap(id, TapGestureEvent::new(center));
        true
    }

    /// Append every row of the child's grid after this grid's last row,
    /// then disable the child.
    ///
    /// No-op when the child has no grid (already merged or never a
    /// navigator). A grid-less receiver starts from an empty grid.
    pub fn merge_vertical(&mut self, child: &mut FocusNavigator) {
        let Some(donor) = child.grid.take() else {
            return;
        };
        tracing::debug!(target: TARGET, rows = donor.last_row_index().unwrap_or(0), "merging child grid vertically");
        self.grid.get_or_insert_with(FocusGrid::new).append_rows(donor);
    }

    /// For each row index in the child's grid, append its columns to the
    /// end of the corresponding row here (creating the row if absent), then
    /// disable the child.
    ///
    /// Relative column order within each merged row is preserved, so an
    /// independently-authored sub-layout keeps its shape without knowing
    /// its absolute position.
    pub fn merge_horizontal(&mut self, child: &mut FocusNavigator) {
        let Some(donor) = child.grid.take() else {
            return;
        };
        tracing::debug!(target: TARGET, rows = donor.last_row_index().unwrap_or(0), "merging child grid horizontally");
        self.grid
            .get_or_insert_with(FocusGrid::new)
            .append_row_segments(donor);
    }

    // =========================================================================
    // Move resolution internals
    // =========================================================================

    fn resolve_with_reason<S: ItemAccess>(
        &mut self,
        scene: &mut S,
        dx: i32,
        dy: i32,
        reason: FocusReason,
    ) -> bool {
        debug_assert!(dx == 0 || dy == 0, "moves are along one axis");

        let Some(grid) = self.grid.as_ref() else {
            return false;
        };
        if dx != 0 && !self.gates.horizontal() {
            return true;
        }
        if dy != 0 && !self.gates.vertical() {
            return true;
        }

        let origin = self.cursor;
        let Some(origin_item) = grid.at(origin) else {
            // The cursor addresses an empty slot; the layout is the
            // caller's to fix. Consume the move.
            return true;
        };

        let Some((landing, landed_item)) =
            Self::search_landing(grid, &*scene, origin, origin_item, dx, dy)
        else {
            return true;
        };

        self.cursor = landing;
        tracing::debug!(target: TARGET, x = landing.x, y = landing.y, "focus cursor moved");

        if landed_item != origin_item {
            if let Some(item) = scene.get_item_mut(origin_item) {
                item.focus_out(&mut FocusOutEvent::new(reason));
            }
        }
        if let Some(item) = scene.get_item_mut(landed_item) {
            item.focus_in(&mut FocusInEvent::new(reason));
        }
        scene.request_fast_repaint(self.repaint_target);
        true
    }

    /// Run the displacement search from `origin` until a slot is accepted
    /// or no movement is possible.
    ///
    /// The search continues past landings that hold the origin item while
    /// it is inactive; revisiting any position ends the search, which
    /// covers both single-slot dead ends and multi-slot cycles.
    fn search_landing<S: ItemAccess>(
        grid: &FocusGrid,
        scene: &S,
        origin: GridPos,
        origin_item: ItemId,
        dx: i32,
        dy: i32,
    ) -> Option<(GridPos, ItemId)> {
        let mut visited = HashSet::from([origin]);
        let mut pos = origin;
        loop {
            let landing = Self::find_landing(grid, pos, dx, dy)?;
            let landed_item = grid.at(landing)?;
            let inactive = scene
                .get_item(landed_item)
                .map(|item| item.is_inactive())
                .unwrap_or(false);
            if landed_item != origin_item || !inactive {
                return Some((landing, landed_item));
            }
            if !visited.insert(landing) {
                return None;
            }
            pos = landing;
        }
    }

    /// One application of the displacement from `pos`: the direct target,
    /// or the wrap/step fallback the gap calls for.
    fn find_landing(grid: &FocusGrid, pos: GridPos, dx: i32, dy: i32) -> Option<GridPos> {
        let ty = pos.y + dy;
        match grid.row(ty) {
            // The row is entirely absent: wrap to the far edge.
            None => Self::vertical_wrap(grid, pos, dy),
            // A gap directly above/below in the same column: step to the
            // nearest occupied column of the target row.
            Some(row) if !row.contains_key(&pos.x) => Self::step_into_row(grid, pos.x, ty),
            // A gap to the side: wrap within the row.
            Some(row) if !row.contains_key(&(pos.x + dx)) => {
                Self::horizontal_wrap(row, pos.x, dx).map(|x| GridPos::new(x, ty))
            }
            // The direct target exists.
            Some(_) => Some(GridPos::new(pos.x + dx, ty)),
        }
    }

    /// Reappear at the farthest row against the movement direction.
    ///
    /// The scan steps row by row and stops at the first missing row, so a
    /// gap in the row sequence bounds how far the wrap reaches. Fails when
    /// no row other than the current one exists in that direction.
    fn vertical_wrap(grid: &FocusGrid, pos: GridPos, dy: i32) -> Option<GridPos> {
        let mut wy = pos.y;
        while grid.row(wy - dy).is_some() {
            wy -= dy;
        }
        if wy == pos.y {
            return None;
        }
        if grid.contains(GridPos::new(pos.x, wy)) {
            Some(GridPos::new(pos.x, wy))
        } else {
            Self::step_into_row(grid, pos.x, wy)
        }
    }

    /// Reappear at the farthest occupied column on the opposite side of
    /// `x`. Interior gaps are skipped; only the populated edge of the row
    /// stops the scan.
    fn horizontal_wrap(row: &GridRow, x: i32, dx: i32) -> Option<i32> {
        if dx > 0 {
            row.range(..x).next().map(|(&col, _)| col)
        } else {
            row.range(x + 1..).next_back().map(|(&col, _)| col)
        }
    }

    /// Land on the occupied column of row `ty` nearest to `x`, searching
    /// left first and then right. The bias is a fixed tie-break.
    ///
    /// A missing or empty destination row is a malformed layout: it is
    /// reported at error level and the whole move aborts.
    fn step_into_row(grid: &FocusGrid, x: i32, ty: i32) -> Option<GridPos> {
        let Some(row) = grid.row(ty) else {
            tracing::error!(target: TARGET, row = ty, "destination row is missing; layout is malformed");
            return None;
        };
        if row.is_empty() {
            tracing::error!(target: TARGET, row = ty, "destination row has no occupied columns; layout is malformed");
            return None;
        }
        if let Some((&col, _)) = row.range(..=x).next_back() {
            return Some(GridPos::new(col, ty));
        }
        row.range(x..).next().map(|(&col, _)| GridPos::new(col, ty))
    }
}

static_assertions::assert_impl_all!(FocusNavigator: Send, Sync);
