//! Pending-payment slot
//!
//! Holds the id of the reservation being paid while the payer is away at
//! the provider. Written once right before leaving, taken (read and
//! deleted) once on return.
//!
//! Only one payment can be pending per storage: a second pay-initiation
//! overwrites the first id. With two payments started side by side the
//! confirmation shows whichever was written last.

use std::sync::Arc;

use crate::error::ClientResult;
use crate::storage::Storage;

/// Storage key of the pending reservation id
pub const RESERVATION_ID_KEY: &str = "reservationId";

#[derive(Debug, Clone)]
pub struct PendingPaymentSlot {
    storage: Arc<dyn Storage>,
}

impl PendingPaymentSlot {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn store(&self, reservation_id: i64) -> ClientResult<()> {
        if let Some(previous) = self.peek()?
            && previous != reservation_id
        {
            tracing::warn!(
                previous,
                reservation_id,
                "Overwriting a pending payment; only one can be in flight"
            );
        }
        self.storage
            .set_item(RESERVATION_ID_KEY, &reservation_id.to_string())
    }

    /// Pending id without consuming it
    pub fn peek(&self) -> ClientResult<Option<i64>> {
        Ok(self
            .storage
            .get_item(RESERVATION_ID_KEY)?
            .and_then(|raw| parse_id(&raw)))
    }

    /// Read the pending id and delete it; later calls return `None`
    pub fn take(&self) -> ClientResult<Option<i64>> {
        let raw = self.storage.get_item(RESERVATION_ID_KEY)?;
        if raw.is_some() {
            self.storage.remove_item(RESERVATION_ID_KEY)?;
        }
        Ok(raw.and_then(|raw| parse_id(&raw)))
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    match raw.trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!(value = raw, "Ignoring malformed pending reservation id");
            None
        }
    }
}
