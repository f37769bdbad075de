//! # Reorder Operation
//!
//! Translates a drag gesture made on a *view* into a move on the *store*.
//!
//! A drag reports positions in the sequence the user sees. When a filter or search is
//! active, those positions are not store positions: applying them directly would shuffle
//! items the user cannot see. [`resolve`] maps both ends of the gesture through
//! [`ViewEntry::position`], so the dragged item lands next to the item it was dropped on
//! and hidden items keep their relative order.
//!
//! Sorted task views are a different matter: the sort decides the visual order, so a drag
//! there has no stable meaning. The command layer refuses drags while a sort is active.

use crate::view::ViewEntry;

/// End of a drag: where the item was picked up and where it was dropped, in view
/// coordinates. `destination` is `None` when the item was dropped outside the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    pub source: usize,
    pub destination: Option<usize>,
}

impl DragGesture {
    pub fn new(source: usize, destination: Option<usize>) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// A move expressed in store positions, ready for [`crate::items::ItemStore::reorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreMove {
    pub from: usize,
    pub to: usize,
}

/// Maps a gesture on `view` to a store move.
///
/// Returns `None` when there is no destination, either end falls outside the view, or the
/// item was dropped where it started.
pub fn resolve<T>(view: &[ViewEntry<'_, T>], gesture: DragGesture) -> Option<StoreMove> {
    let destination = gesture.destination?;
    let from = view.get(gesture.source)?.position;
    let to = view.get(destination)?.position;
    if from == to {
        return None;
    }
    Some(StoreMove { from, to })
}
