//! # Slot Storage
//!
//! Persistence is a string-keyed key-value store: each collection lives in one named
//! *slot* holding a serialized string. This module defines the [`SlotStore`] trait and the
//! two backends behind it.
//!
//! ## Design Rationale
//!
//! The slot store only knows about keys and strings. What goes into a slot, how it is
//! parsed and what happens with malformed data is decided by [`crate::persist`]. Keeping the
//! raw I/O behind a trait lets the whole planner run against [`memory::MemSlots`] in tests.
//!
//! ## Implementations
//!
//! - [`fs::FsSlots`]: Production storage, one file per slot.
//! - [`memory::MemSlots`]: In-memory storage for testing, with write-failure simulation.
//!
//! ## Storage Layout
//!
//! ```text
//! <data-dir>/
//! ├── config.json              # Planner configuration
//! ├── peakplanner_tasks.json   # Task slot (JSON array)
//! └── peakplanner_notes.json   # Note slot (JSON array)
//! ```

use crate::error::{PlannerError, Result};

pub mod fs;
pub mod memory;

/// Abstract interface for slot I/O.
///
/// All methods take `&self`; the planner is single-threaded and backends use interior
/// mutability where they need it.
pub trait SlotStore {
    /// Read the raw contents of a slot. `Ok(None)` means the slot does not exist.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the contents of a slot.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot. Removing an absent slot is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.read(key)?.is_some())
    }
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

/// Slot keys double as file names, so they are restricted to `[A-Za-z0-9_-]`.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(PlannerError::InvalidSlotKey(key.to_string()))
    }
}
