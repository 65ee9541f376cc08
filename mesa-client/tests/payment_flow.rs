//! Reservation and payment across the provider redirect, against a mock backend

mod common;

use chrono::{FixedOffset, NaiveDate};
use common::{MockBackend, PASSWORD, TOKEN};
use mesa_client::{
    ClientConfig, ClientError, Confirmation, FlowError, FlowState, MesaClient, ReservationApi,
    ReturnParams, Route, StartOutcome,
};
use shared::forms::{ReservationForm, SignInForm};
use tempfile::TempDir;

const RETURN_URL: &str = "http://localhost:4200/pages/reservation/form";

fn config(backend: &MockBackend, dir: &TempDir) -> ClientConfig {
    ClientConfig::new(backend.base_url())
        .with_return_url(RETURN_URL)
        .with_data_dir(dir.path())
}

/// One "page load": a client over the same data directory
fn load(backend: &MockBackend, dir: &TempDir) -> MesaClient {
    MesaClient::open(config(backend, dir)).unwrap()
}

async fn signed_in(backend: &MockBackend, dir: &TempDir) -> MesaClient {
    let client = load(backend, dir);
    let request = SignInForm {
        email: "ana@mail.pe".into(),
        password: PASSWORD.into(),
    }
    .validate()
    .unwrap();
    client.auth().sign_in(&request).await.unwrap();
    client
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
}

fn form() -> ReservationForm {
    let mut form = ReservationForm::new(42);
    form.date = NaiveDate::from_ymd_opt(2025, 6, 1);
    form.time = Some("19:00".into());
    form.set_number_of_people(3);
    form
}

fn lima() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

/// Reservation created and payment initiated; returns the provider URL
async fn reserve_and_pay(backend: &MockBackend, dir: &TempDir) -> String {
    let client = signed_in(backend, dir).await;
    let mut flow = client.reservation_flow().with_offset(lima());
    flow.submit(&form(), today()).await.unwrap();
    let redirect = flow.pay().await.unwrap();
    redirect.url
}

fn approved_return(order_id: &str) -> ReturnParams {
    ReturnParams::from_url(&format!("{RETURN_URL}?token={order_id}&PayerID=QYR5Z8XDVJNXQ"))
        .unwrap()
}

#[tokio::test]
async fn test_reserve_pay_return_confirm() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();

    // Page 1: reserve and leave for the provider
    {
        let client = signed_in(&backend, &dir).await;
        let mut flow = client.reservation_flow().with_offset(lima());

        let created = flow.submit(&form(), today()).await.unwrap();
        assert_eq!(created.id, 7);
        assert_eq!(created.status, "PENDING");

        let redirect = flow.pay().await.unwrap();
        assert_eq!(redirect.reservation_id, 7);
        assert_eq!(redirect.order_id, "ORDER-7");
        assert!(redirect.url.contains("token=ORDER-7"));
        assert!(matches!(flow.state(), FlowState::PaymentInitiated { .. }));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("reservationId")).unwrap(),
            "7"
        );
    }

    let sent = backend.requests_to("/reservations");
    assert_eq!(sent.len(), 1);
    let body = sent[0].body.as_ref().unwrap();
    assert_eq!(body["restaurantId"], 42);
    assert_eq!(body["numberOfPeople"], 3);
    assert_eq!(body["reservationDate"], "2025-06-01T19:00:00.000Z");
    assert_eq!(
        sent[0].authorization.as_deref(),
        Some(format!("Bearer {TOKEN}").as_str())
    );

    let orders = backend.requests_to("/checkout/paypal/create");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].query["reservationId"], "7");
    assert_eq!(orders[0].query["returnUrl"], RETURN_URL);
    assert_eq!(orders[0].query["cancelUrl"], RETURN_URL);

    // Page 2: back from the provider
    let client = load(&backend, &dir);
    let mut flow = client.reservation_flow();
    let outcome = flow.start(&approved_return("ORDER-7")).await.unwrap();
    assert_eq!(
        outcome,
        StartOutcome::Confirmed {
            navigate_to: Route::ReservationConfirmation
        }
    );
    let captures = backend.requests_to("/checkout/paypal/capture");
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].query["orderId"], "ORDER-7");

    // Page 3: the confirmation view
    let confirmation = client.confirmation().load().await;
    let reservation = confirmation.reservation().unwrap();
    assert_eq!(reservation.id, 7);
    assert_eq!(reservation.status, "CONFIRMED");
    assert_eq!(client.slot().peek().unwrap(), None);
    assert!(!dir.path().join("reservationId").exists());

    // Reloading the confirmation finds nothing pending
    let again = load(&backend, &dir).confirmation().load().await;
    assert_eq!(again, Confirmation::Generic { notice: None });
}

#[tokio::test]
async fn test_incomplete_capture_keeps_reservation_payable() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();
    reserve_and_pay(&backend, &dir).await;
    backend.set_capture_completed(false);

    let client = load(&backend, &dir);
    let mut flow = client.reservation_flow();
    let outcome = flow.start(&approved_return("ORDER-7")).await.unwrap();
    let StartOutcome::Failed(notice) = outcome else {
        panic!("expected a failed payment, got {outcome:?}");
    };
    assert!(notice.is_error());
    assert!(notice.message.starts_with("Payment failed"));
    assert_eq!(backend.reservation_status(7).as_deref(), Some("PENDING"));
    assert_eq!(client.slot().peek().unwrap(), Some(7));

    // Re-initiate from history
    let reservation = client.reservations().get(7).await.unwrap();
    flow.resume(reservation).unwrap();
    let redirect = flow.pay().await.unwrap();
    assert_eq!(redirect.reservation_id, 7);
    assert_eq!(backend.requests_to("/checkout/paypal/create").len(), 2);
}

#[tokio::test]
async fn test_capture_error_is_reported_not_retried() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();
    reserve_and_pay(&backend, &dir).await;
    backend.set_capture_fails(true);

    let client = load(&backend, &dir);
    let mut flow = client.reservation_flow();
    let outcome = flow.start(&approved_return("ORDER-7")).await.unwrap();
    assert!(matches!(outcome, StartOutcome::Failed(_)));
    assert!(matches!(flow.state(), FlowState::PaymentFailed { .. }));
    assert_eq!(backend.requests_to("/checkout/paypal/capture").len(), 1);

    // A finished flow does not capture twice
    let err = flow.start(&approved_return("ORDER-7")).await.unwrap_err();
    assert!(matches!(err, FlowError::InvalidState { .. }));
    assert_eq!(backend.requests_to("/checkout/paypal/capture").len(), 1);
}

#[tokio::test]
async fn test_cancelled_payment_is_a_fresh_start() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();
    reserve_and_pay(&backend, &dir).await;

    let client = load(&backend, &dir);
    let mut flow = client.reservation_flow();
    let cancelled = ReturnParams::from_url(&format!("{RETURN_URL}?token=ORDER-7")).unwrap();
    assert_eq!(flow.start(&cancelled).await.unwrap(), StartOutcome::Fresh);
    assert!(backend.requests_to("/checkout/paypal/capture").is_empty());
    assert_eq!(client.slot().peek().unwrap(), Some(7));
}

#[tokio::test]
async fn test_confirmation_degrades_when_lookup_fails() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();
    reserve_and_pay(&backend, &dir).await;
    backend.set_reservation_lookup_fails(true);

    let client = load(&backend, &dir);
    let Confirmation::Generic {
        notice: Some(notice),
    } = client.confirmation().load().await
    else {
        panic!("expected a degraded confirmation");
    };
    assert_eq!(notice.message, "Failed to load reservation details!");
    assert_eq!(client.slot().peek().unwrap(), None);
}

#[tokio::test]
async fn test_signed_out_reservation_is_rejected_by_backend() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();
    let client = load(&backend, &dir);
    let mut flow = client.reservation_flow().with_offset(lima());

    let err = flow.submit(&form(), today()).await.unwrap_err();
    assert!(matches!(
        err,
        FlowError::Client(ClientError::Unauthorized(_))
    ));
    assert_eq!(flow.state(), &FlowState::Idle);
    assert_eq!(backend.requests_to("/reservations")[0].authorization, None);
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().unwrap();
    let client = signed_in(&backend, &dir).await;
    let mut flow = client.reservation_flow().with_offset(lima());

    let mut bad = form();
    bad.time = Some("13:30".into());
    let err = flow.submit(&bad, today()).await.unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert!(backend.requests_to("/reservations").is_empty());
}
