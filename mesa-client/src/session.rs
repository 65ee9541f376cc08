//! Session store
//!
//! The persisted sign-in (token + profile) under a single storage key.
//! Owned by [`crate::api::AuthService`]; everything else only reads it
//! through the auth service, the guard or the HTTP client's bearer header.

use std::sync::Arc;

use shared::client::{AuthResponse, Profile};

use crate::error::ClientResult;
use crate::storage::Storage;

/// Storage key of the authentication record
pub const AUTH_KEY: &str = "restaurant_reservation_auth";

#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The stored sign-in, if any
    ///
    /// A record that no longer parses is treated as signed out.
    pub fn get(&self) -> ClientResult<Option<AuthResponse>> {
        let Some(raw) = self.storage.get_item(AUTH_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(auth) => Ok(Some(auth)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session record");
                Ok(None)
            }
        }
    }

    pub fn set(&self, auth: &AuthResponse) -> ClientResult<()> {
        let json = serde_json::to_string(auth)?;
        self.storage.set_item(AUTH_KEY, &json)
    }

    pub fn clear(&self) -> ClientResult<()> {
        self.storage.remove_item(AUTH_KEY)
    }

    /// Bearer token of the stored sign-in
    pub fn token(&self) -> ClientResult<Option<String>> {
        Ok(self.get()?.map(|auth| auth.token))
    }

    /// Profile of the stored sign-in
    pub fn user(&self) -> ClientResult<Option<Profile>> {
        Ok(self.get()?.map(|auth| auth.user))
    }
}
