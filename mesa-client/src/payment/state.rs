//! States of the reservation-payment flow

use shared::models::{PaypalOrder, Reservation};

use super::callback::PaymentReturn;

/// Where a reservation stands between form submission and payment
///
/// ```text
/// Idle ── submit ──▶ ReservationCreated ── pay ──▶ PaymentInitiated ─ ─ ▶ (page left)
///
/// (fresh start with token + PayerID) ──▶ PaymentReturned ──┬─▶ PaymentConfirmed
///                                                          └─▶ PaymentFailed
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    ReservationCreated(Reservation),
    PaymentInitiated {
        reservation_id: i64,
        order: PaypalOrder,
    },
    PaymentReturned(PaymentReturn),
    PaymentConfirmed {
        order_id: String,
    },
    PaymentFailed {
        order_id: String,
        reason: String,
    },
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::ReservationCreated(_) => "reservation created",
            FlowState::PaymentInitiated { .. } => "payment initiated",
            FlowState::PaymentReturned(_) => "payment returned",
            FlowState::PaymentConfirmed { .. } => "payment confirmed",
            FlowState::PaymentFailed { .. } => "payment failed",
        }
    }

    /// No further transition happens from here in this page load
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlowState::Idle | FlowState::PaymentConfirmed { .. } | FlowState::PaymentFailed { .. }
        )
    }
}
