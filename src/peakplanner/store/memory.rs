use super::{validate_key, SlotStore};
use crate::error::{PlannerError, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// In-memory slot store for testing.
///
/// Uses `RefCell` for interior mutability since the planner is single-threaded.
/// Does NOT persist data.
#[derive(Default)]
pub struct MemSlots {
    slots: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    failing_keys: RefCell<HashSet<String>>,
}

impl MemSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    /// Affects both `write` and `delete`.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make writes and deletes of a single slot fail.
    pub fn fail_writes_to(&self, key: &str) {
        self.failing_keys.borrow_mut().insert(key.to_string());
    }

    /// Test helper to plant raw slot contents, bypassing validation.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn check_writable(&self, key: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() || self.failing_keys.borrow().contains(key) {
            return Err(PlannerError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl SlotStore for MemSlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.check_writable(key)?;
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.check_writable(key)?;
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
