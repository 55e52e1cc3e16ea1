use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::Storage;

use crate::error::EnhanceError;
use crate::state::theme::PreferenceStore;
use crate::utils::browser::window;

pub fn local_storage() -> Result<Storage, EnhanceError> {
    window()?
        .local_storage()
        .map_err(|_| EnhanceError::StorageUnavailable)?
        .ok_or(EnhanceError::StorageUnavailable)
}

/// The browser's localStorage as a preference store.
pub struct LocalStore(Storage);

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EnhanceError> {
        self.0.set_item(key, value)?;
        Ok(())
    }
}

/// Page-lifetime store used when localStorage is denied (e.g. some private
/// browsing modes). Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EnhanceError> {
        self.0
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn preference_store() -> Box<dyn PreferenceStore> {
    match local_storage() {
        Ok(storage) => Box::new(LocalStore(storage)),
        Err(err) => {
            log::warn!("{}; theme preference will not persist", err);
            Box::new(MemoryStore::default())
        }
    }
}
