//! The reservation-payment coordinator

use chrono::{FixedOffset, NaiveDate};
use shared::forms::{ReservationForm, ValidReservation};
use shared::models::{PaypalCapture, Reservation, ReservationCreate};

use super::callback::{PaymentReturn, ReturnParams};
use super::slot::PendingPaymentSlot;
use super::state::FlowState;
use super::FlowError;
use crate::api::{CheckoutApi, ReservationApi};
use crate::error::ClientResult;
use crate::guard::Route;
use crate::notice::Notice;

/// Where to send the payer after [`ReservationFlow::pay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRedirect {
    pub reservation_id: i64,
    pub order_id: String,
    pub url: String,
}

/// Result of [`ReservationFlow::start`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// No payment was returning; the flow is idle
    Fresh,
    /// Capture completed; the caller navigates to `navigate_to`
    Confirmed { navigate_to: Route },
    /// Capture failed or was not completed
    Failed(Notice),
}

/// Drives one reservation through creation and payment
///
/// A flow lives for one "page load". [`pay`](Self::pay) ends with the
/// payer leaving for the provider; the next load builds a new flow and
/// calls [`start`](Self::start) with the inbound parameters before doing
/// anything else.
pub struct ReservationFlow<R, C> {
    reservations: R,
    checkout: C,
    slot: PendingPaymentSlot,
    offset: Option<FixedOffset>,
    state: FlowState,
    loading: bool,
}

impl<R: ReservationApi, C: CheckoutApi> ReservationFlow<R, C> {
    pub fn new(reservations: R, checkout: C, slot: PendingPaymentSlot) -> Self {
        Self {
            reservations,
            checkout,
            slot,
            offset: None,
            state: FlowState::Idle,
            loading: false,
        }
    }

    /// Build reservation instants in a fixed zone instead of the host's
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Set while a payment request is outstanding. After a successful
    /// [`pay`](Self::pay) it stays set: the page is about to be left.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The reservation the pay action applies to
    pub fn reservation(&self) -> Option<&Reservation> {
        match &self.state {
            FlowState::ReservationCreated(reservation) => Some(reservation),
            _ => None,
        }
    }

    // ========== Idle → ReservationCreated ==========

    /// Validate `form` and create the reservation
    ///
    /// Validation failures never reach the backend. On any failure the
    /// flow stays idle.
    pub async fn submit(
        &mut self,
        form: &ReservationForm,
        today: NaiveDate,
    ) -> Result<Reservation, FlowError> {
        self.ensure_idle("submit a reservation")?;
        let valid = form.validate(today)?;
        let request = self.build_request(valid)?;

        let reservation = self
            .reservations
            .create(&request)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to create reservation"))?;

        tracing::info!(
            reservation_id = reservation.id,
            status = %reservation.status,
            "Reservation created"
        );
        self.state = FlowState::ReservationCreated(reservation.clone());
        Ok(reservation)
    }

    /// Pick up an existing reservation so it can be paid (again)
    pub fn resume(&mut self, reservation: Reservation) -> Result<(), FlowError> {
        match self.state {
            FlowState::Idle | FlowState::PaymentFailed { .. } => {
                tracing::info!(reservation_id = reservation.id, "Resuming payment");
                self.state = FlowState::ReservationCreated(reservation);
                Ok(())
            }
            ref other => Err(FlowError::InvalidState {
                action: "resume a reservation",
                state: other.name(),
            }),
        }
    }

    // ========== ReservationCreated → PaymentInitiated ==========

    /// Create a provider order and record the reservation id for the return
    ///
    /// The caller must navigate to the returned URL; nothing else happens in
    /// this flow afterwards. A failed order leaves the reservation payable.
    pub async fn pay(&mut self) -> Result<PaymentRedirect, FlowError> {
        if self.loading {
            return Err(FlowError::Busy);
        }
        let reservation_id = match &self.state {
            FlowState::ReservationCreated(reservation) => reservation.id,
            other => {
                return Err(FlowError::InvalidState {
                    action: "pay",
                    state: other.name(),
                });
            }
        };

        self.loading = true;
        let order = match self.checkout.create_order(reservation_id).await {
            Ok(order) => order,
            Err(e) => {
                self.loading = false;
                tracing::warn!(reservation_id, error = %e, "Failed to create payment order");
                return Err(e.into());
            }
        };
        if let Err(e) = self.slot.store(reservation_id) {
            self.loading = false;
            return Err(e.into());
        }

        tracing::info!(
            reservation_id,
            order_id = %order.paypal_order_id,
            "Payment initiated, leaving for provider"
        );
        let redirect = PaymentRedirect {
            reservation_id,
            order_id: order.paypal_order_id.clone(),
            url: order.paypal_url.clone(),
        };
        self.state = FlowState::PaymentInitiated {
            reservation_id,
            order,
        };
        Ok(redirect)
    }

    // ========== (start) → PaymentReturned → Confirmed | Failed ==========

    /// Startup hook; run it before anything else that reads reservation state
    ///
    /// With both `token` and `PayerID` present the order is captured right
    /// away. A failed capture is reported, not retried, and leaves the
    /// pending id in place so the payment can be re-initiated.
    pub async fn start(&mut self, inbound: &ReturnParams) -> Result<StartOutcome, FlowError> {
        self.ensure_idle("handle a payment return")?;
        if self.loading {
            return Err(FlowError::Busy);
        }
        let Some(payment) = inbound.payment_return() else {
            return Ok(StartOutcome::Fresh);
        };

        tracing::info!(order_id = %payment.token, "Payment returned, capturing");
        self.state = FlowState::PaymentReturned(payment.clone());
        self.loading = true;
        let captured = self.checkout.capture(&payment.token).await;
        self.loading = false;

        Ok(self.finish_capture(payment, captured))
    }

    fn finish_capture(
        &mut self,
        payment: PaymentReturn,
        captured: ClientResult<PaypalCapture>,
    ) -> StartOutcome {
        let order_id = payment.token;
        let reason = match captured {
            Ok(capture) if capture.completed => {
                tracing::info!(%order_id, "Payment confirmed");
                self.state = FlowState::PaymentConfirmed { order_id };
                return StartOutcome::Confirmed {
                    navigate_to: Route::ReservationConfirmation,
                };
            }
            Ok(_) => "the payment was not completed".to_string(),
            Err(e) => e.to_string(),
        };

        tracing::warn!(%order_id, %reason, "Payment failed");
        self.state = FlowState::PaymentFailed {
            order_id,
            reason: reason.clone(),
        };
        StartOutcome::Failed(Notice::error(format!("Payment failed: {reason}")))
    }

    fn ensure_idle(&self, action: &'static str) -> Result<(), FlowError> {
        match self.state {
            FlowState::Idle => Ok(()),
            ref other => Err(FlowError::InvalidState {
                action,
                state: other.name(),
            }),
        }
    }

    fn build_request(&self, valid: ValidReservation) -> Result<ReservationCreate, FlowError> {
        match self.offset {
            Some(offset) => Ok(valid.into_request(offset)),
            None => Ok(valid.into_local_request()?),
        }
    }
}
