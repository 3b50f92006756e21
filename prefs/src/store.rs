//! Persistent key-value store seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser this is `localStorage`, shared by every tab of the
//! origin with last-write-wins semantics. Off-browser, [`MemoryStore`]
//! stands in, and [`UnavailableStore`] models a restricted context where
//! every access fails.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StoreError;

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

/// Origin-scoped string store.
pub trait PreferenceStore {
    /// Read `key`. `Ok(None)` means the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be reached.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite `key` with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be reached or rejects
    /// the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Map-backed store. Clones share the same map, which is how tests model
/// several tabs of one origin.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<RefCell<usize>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write.
    #[must_use]
    pub fn with(self, key: &str, value: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        self
    }

    /// Number of `set` calls made through any clone.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    /// Current value without going through the trait.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.peek(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

/// Store for contexts where persistent storage is blocked.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}
