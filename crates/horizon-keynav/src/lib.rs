//! Directional focus navigation for sparse grids of selectable UI elements.
//!
//! This crate provides the focus-steering core a container needs to support
//! d-pad style input:
//!
//! - **Grid model**: a sparse, 1-based table of slots referencing opaque
//!   focusable items; rows are ragged and one item may span several slots
//! - **Move resolution**: a deterministic up/down/left/right resolver with
//!   wrap-around at the populated edges and nearest-column fallback when the
//!   literal next cell is empty
//! - **Composition**: merge an independently-authored child grid into a
//!   parent (vertically or horizontally); the child then delegates upward
//! - **Activation**: synthesize a tap at the focused item's center so a
//!   confirmation key can activate it without a pointer
//!
//! Rendering, widget geometry, and physical key mapping stay with the host:
//! items arrive through the [`ItemAccess`] storage trait, repaint and tap
//! requests leave through it, and device questions go through
//! [`InputCapabilities`]. Diagnostics use the `tracing` facade under the
//! `horizon_keynav` target prefix.
//!
//! # Example
//!
//! ```ignore
//! use horizon_keynav::{Direction, FocusGrid, FocusNavigator, ItemArena};
//!
//! let mut arena = ItemArena::new();
//! let open = arena.insert(Box::new(Button::new("Open")));
//! let save = arena.insert(Box::new(Button::new("Save")));
//! let quit = arena.insert(Box::new(Button::new("Quit")));
//!
//! // Two buttons on the first row, one on the second.
//! let grid = FocusGrid::from_rows([
//!     vec![Some(open), Some(save)],
//!     vec![Some(quit)],
//! ]);
//! let mut nav = FocusNavigator::new(grid);
//!
//! nav.resolve_direction(&mut arena, Direction::Right); // open -> save
//! nav.resolve_direction(&mut arena, Direction::Down);  // save -> quit
//! assert_eq!(nav.current_item(), Some(quit));
//! ```

pub mod events;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod item;
pub mod navigator;


pub use events::{EventBase, FocusInEvent, FocusOutEvent, FocusReason, TapGestureEvent};
pub use geometry::{Point, Rect, Size};
pub use grid::{FocusGrid, GridError, GridPos, GridRow};
pub use input::{directional_bindings, Direction, InputCapabilities};
pub use item::{FocusItem, ItemAccess, ItemArena, ItemId};
pub use navigator::{FocusNavigator, MovementGates};
