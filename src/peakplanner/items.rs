//! # Item Store
//!
//! [`ItemStore`] is the authoritative, ordered sequence of one collection (tasks or notes).
//! It is purely in-memory: persisting after a mutation is the job of
//! [`crate::workspace::Workspace`], which is why every mutation reports whether it changed
//! anything.
//!
//! Invalid requests are not errors. Blank drafts, unknown ids and out-of-range positions all
//! leave the store untouched and report "no change".

use crate::model::{Item, ItemId, Task};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ItemStore<T: Item> {
    items: Vec<T>,
}

impl<T: Item> Default for ItemStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Item> ItemStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already validated sequence. Ids must be unique; the loader guarantees it.
    pub fn from_items(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Appends a new item built from `draft`. Returns its id, or `None` if the draft's
    /// content was blank.
    pub fn add(&mut self, draft: T::Draft) -> Option<ItemId> {
        self.add_at(draft, Utc::now())
    }

    pub fn add_at(&mut self, draft: T::Draft, now: DateTime<Utc>) -> Option<ItemId> {
        let mut id = ItemId::generate();
        while self.position(&id).is_some() {
            id = ItemId::generate();
        }
        let item = T::from_draft(draft, id.clone(), now)?;
        self.items.push(item);
        Some(id)
    }

    pub fn update(&mut self, id: &ItemId, patch: T::Patch) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => item.apply(patch),
            None => false,
        }
    }

    /// Removes the item with `id`, returning it. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &ItemId) -> Option<T> {
        let pos = self.position(id)?;
        Some(self.items.remove(pos))
    }

    /// Moves the element at `from` to `to`, shifting the elements in between.
    ///
    /// Both positions must be in `[0, len - 1]`. Returns `false` (and does nothing) for
    /// out-of-range positions or when `from == to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.items.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let moved = self.items.remove(from);
        self.items.insert(to, moved);
        true
    }
}

impl ItemStore<Task> {
    pub fn toggle_completion(&mut self, id: &ItemId) -> bool {
        match self.items.iter_mut().find(|task| &task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }
}
