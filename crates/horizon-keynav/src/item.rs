//! Focusable items and the storage trait that hosts them.
//!
//! The navigator never owns the widgets it steers focus between. Items live
//! in the surrounding widget tree; the grid holds stable [`ItemId`] handles
//! and every operation reaches the real item through an [`ItemAccess`]
//! implementation supplied by the host.
//!
//! # Capability interface
//!
//! Anything selectable implements [`FocusItem`]: it can be told it gained or
//! lost focus, report whether it is inactive (a placeholder that should not
//! be re-selected), and expose the bounding box used to aim a synthesized
//! tap. The trait is object safe so heterogeneous widget sets can live
//! behind `dyn FocusItem`.
//!
//! # Usage
//!
//! ```ignore
//! use horizon_keynav::{FocusItem, ItemAccess, ItemId};
//!
//! struct MyStorage {
//!     widgets: HashMap<ItemId, Box<dyn FocusItem>>,
//! }
//!
//! impl ItemAccess for MyStorage {
//!     fn get_item(&self, id: ItemId) -> Option<&dyn FocusItem> {
//!         self.widgets.get(&id).map(|w| w.as_ref())
//!     }
//!
//!     fn get_item_mut(&mut self, id: ItemId) -> Option<&mut dyn FocusItem> {
//!         self.widgets.get_mut(&id).map(|w| w.as_mut())
//!     }
//! }
//! ```

use slotmap::{new_key_type, SlotMap};

use crate::events::{FocusInEvent, FocusOutEvent, TapGestureEvent};
use crate::geometry::Rect;

new_key_type! {
    /// A unique identifier for a focusable item.
    ///
    /// `ItemId`s are stable handles that remain valid as the grid changes.
    /// They become invalid when the owning storage drops the item.
    pub struct ItemId;
}

/// Capability interface for anything the navigator can select.
pub trait FocusItem: Send + Sync {
    /// Notification that the item gained focus.
    fn focus_in(&mut self, event: &mut FocusInEvent);

    /// Notification that the item lost focus.
    fn focus_out(&mut self, event: &mut FocusOutEvent);

    /// Whether the item occupies a slot but should be skipped when it is the
    /// currently-selected item. Used for decorative or disabled placeholders.
    fn is_inactive(&self) -> bool {
        false
    }

    /// The item's bounding box, in the host's coordinates.
    fn bounding_box(&self) -> Rect;
}

/// Trait for accessing items by their [`ItemId`], plus the host services a
/// completed move needs.
///
/// Implement this for your widget storage mechanism to drive a
/// [`FocusNavigator`]. The repaint and tap hooks have no-op defaults so a
/// minimal host only has to provide item lookup.
///
/// [`FocusNavigator`]: crate::FocusNavigator
pub trait ItemAccess {
    /// Get an immutable reference to an item by its ID.
    fn get_item(&self, id: ItemId) -> Option<&dyn FocusItem>;

    /// Get a mutable reference to an item by its ID.
    fn get_item_mut(&mut self, id: ItemId) -> Option<&mut dyn FocusItem>;

    /// Schedule a fast (non-flashing) repaint of a region.
    ///
    /// `None` means the navigator's own region; `Some` names a surrogate
    /// item whose region should be repainted instead. Fire-and-forget: the
    /// navigator never waits for the repaint to happen.
    fn request_fast_repaint(&mut self, _region: Option<ItemId>) {}

    /// Dispatch a synthesized tap gesture to the presentation layer.
    fn post_tap(&mut self, _target: ItemId, _event: TapGestureEvent) {}
}

/// A minimal boxed-item storage implementing [`ItemAccess`].
///
/// Hosts with their own widget tree implement [`ItemAccess`] directly; the
/// arena covers simple containers and tests.
pub struct ItemArena {
    items: SlotMap<ItemId, Box<dyn FocusItem>>,
}

impl Default for ItemArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
        }
    }

    /// Insert an item, returning its stable ID.
    pub fn insert(&mut self, item: Box<dyn FocusItem>) -> ItemId {
        self.items.insert(item)
    }

    /// Remove an item. Slots in any grid still naming the ID go stale and
    /// are treated as empty by hosts that look the ID up.
    pub fn remove(&mut self, id: ItemId) -> Option<Box<dyn FocusItem>> {
        self.items.remove(id)
    }

    /// Number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemAccess for ItemArena {
    fn get_item(&self, id: ItemId) -> Option<&dyn FocusItem> {
        self.items.get(id).map(|item| item.as_ref())
    }

    fn get_item_mut(&mut self, id: ItemId) -> Option<&mut dyn FocusItem> {
        match self.items.get_mut(id) {
            Some(item) => Some(item.as_mut()),
            None => None,
        }
    }
}

static_assertions::assert_obj_safe!(FocusItem);
