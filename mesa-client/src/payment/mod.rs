//! Reservation-payment flow
//!
//! Takes a reservation from "form submitted" to "payment confirmed or
//! abandoned". The flow crosses a full redirect: the in-memory state is
//! lost when the payer leaves for the provider, so the reservation id
//! rides across in the [`PendingPaymentSlot`] and the return is detected
//! from the inbound [`ReturnParams`] on the next start.

pub mod callback;
pub mod confirmation;
pub mod flow;
pub mod slot;
pub mod state;

pub use callback::{PaymentReturn, ReturnParams};
pub use confirmation::{Confirmation, ConfirmationView};
pub use flow::{PaymentRedirect, ReservationFlow, StartOutcome};
pub use slot::PendingPaymentSlot;
pub use state::FlowState;

use shared::validation::ValidationErrors;
use shared::schedule::ScheduleError;
use thiserror::Error;

use crate::error::ClientError;

#[derive(Debug, Error)]
pub enum FlowError {
    /// Form rejected before any request
    #[error("Invalid reservation: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Operation not allowed from the current state (e.g. paying twice)
    #[error("Cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    /// A previous request is still outstanding
    #[error("A request is already in progress")]
    Busy,

    #[error(transparent)]
    Client(#[from] ClientError),
}
