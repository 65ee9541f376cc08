//! Durable key/value storage
//!
//! The client's equivalent of browser local storage: string values under
//! fixed keys that outlive the process. Only the session store and the
//! pending-payment slot write to it.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::ClientResult;

/// String key/value storage that survives a full reload
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Value stored under `key`, if any
    fn get_item(&self, key: &str) -> ClientResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> ClientResult<()>;
}
