//! `localStorage` as a [`PreferenceStore`].
//!
//! Storage can be missing (no window) or blocked (privacy mode, sandboxed
//! frames). Either way the store still exists and reports
//! [`StoreError::Unavailable`] on every call.

use prefs::error::StoreError;
use prefs::PreferenceStore;
use web_sys::{Storage, Window};

use super::js_error;

pub struct WebStorage {
    storage: Option<Storage>,
}

impl WebStorage {
    #[must_use]
    pub fn open(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                log::warn!("localStorage not available; preferences will not persist");
                None
            }
            Err(e) => {
                log::warn!("localStorage blocked: {}", js_error(&e));
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl PreferenceStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Rejected { op: "get", key: key.to_owned(), reason: js_error(&e) })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected { op: "set", key: key.to_owned(), reason: js_error(&e) })
    }
}
