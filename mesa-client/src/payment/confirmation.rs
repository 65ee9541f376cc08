//! Confirmation view after a payment
//!
//! Reads the pending reservation id once and shows the reservation. A
//! missing id (already consumed, storage wiped, view opened directly) or a
//! failed lookup degrades to a generic success screen; loading this view
//! never fails.

use shared::models::Reservation;

use super::slot::PendingPaymentSlot;
use crate::api::ReservationApi;
use crate::notice::Notice;

/// What the confirmation view shows
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Detailed(Reservation),
    /// No details available; `notice` says why when it was a failure
    Generic { notice: Option<Notice> },
}

impl Confirmation {
    pub fn reservation(&self) -> Option<&Reservation> {
        match self {
            Confirmation::Detailed(reservation) => Some(reservation),
            Confirmation::Generic { .. } => None,
        }
    }
}

pub struct ConfirmationView<R> {
    reservations: R,
    slot: PendingPaymentSlot,
}

impl<R: ReservationApi> ConfirmationView<R> {
    pub fn new(reservations: R, slot: PendingPaymentSlot) -> Self {
        Self { reservations, slot }
    }

    /// Take the pending id and fetch its reservation
    pub async fn load(&self) -> Confirmation {
        let reservation_id = match self.slot.take() {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::info!("No pending reservation to confirm");
                return Confirmation::Generic { notice: None };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read the pending reservation");
                return Confirmation::Generic { notice: None };
            }
        };

        match self.reservations.get(reservation_id).await {
            Ok(reservation) => Confirmation::Detailed(reservation),
            Err(e) => {
                tracing::warn!(reservation_id, error = %e, "Failed to load reservation details");
                Confirmation::Generic {
                    notice: Some(Notice::error("Failed to load reservation details!")),
                }
            }
        }
    }
}
