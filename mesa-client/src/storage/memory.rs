//! In-memory storage, for tests and throwaway sessions

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::Storage;
use crate::error::{ClientError, ClientResult};

/// A thread-safe in-memory storage.
///
/// `Clone` shares the underlying map, so two clones behave like two tabs
/// of the same browser profile.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates a new, empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> ClientError {
    ClientError::Internal("storage lock poisoned".into())
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.remove(key);
        Ok(())
    }
}
