//! In-process mock of the reservation backend
//!
//! Serves the REST endpoints on 127.0.0.1 with an ephemeral port and
//! records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::client::{AuthResponse, Profile};
use shared::models::{District, Page, PaypalCapture, PaypalOrder, Reservation, Restaurant};

pub const TOKEN: &str = "jwt-test-token";
pub const PASSWORD: &str = "secret";
pub const FIRST_RESERVATION_ID: i64 = 7;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug)]
pub struct MockState {
    requests: Mutex<Vec<Recorded>>,
    reservations: Mutex<HashMap<i64, Reservation>>,
    next_id: AtomicI64,
    capture_completed: AtomicBool,
    fail_capture: AtomicBool,
    fail_reservation_lookup: AtomicBool,
}

impl MockState {
    fn record(
        &self,
        method: Method,
        path: impl Into<String>,
        query: &HashMap<String, String>,
        headers: &HeaderMap,
        body: Option<Value>,
    ) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: path.into(),
            query: query.clone(),
            authorization,
            body,
        });
    }
}

pub struct MockBackend {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            reservations: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(FIRST_RESERVATION_ID),
            capture_completed: AtomicBool::new(true),
            fail_capture: AtomicBool::new(false),
            fail_reservation_lookup: AtomicBool::new(false),
        });

        let app = Router::new().nest("/api/v1", routes()).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests to `path`, in arrival order
    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn set_capture_completed(&self, completed: bool) {
        self.state
            .capture_completed
            .store(completed, Ordering::SeqCst);
    }

    pub fn set_capture_fails(&self, fail: bool) {
        self.state.fail_capture.store(fail, Ordering::SeqCst);
    }

    pub fn set_reservation_lookup_fails(&self, fail: bool) {
        self.state
            .fail_reservation_lookup
            .store(fail, Ordering::SeqCst);
    }

    pub fn reservation_status(&self, id: i64) -> Option<String> {
        self.state
            .reservations
            .lock()
            .unwrap()
            .get(&id)
            .map(|r| r.status.clone())
    }
}

type Shared = Arc<MockState>;

fn routes() -> Router<Shared> {
    Router::new()
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-up", post(sign_up))
        .route("/districts", get(districts))
        .route("/restaurants/page", get(restaurants_page))
        .route("/restaurants/page/district", get(restaurants_by_district))
        .route("/restaurants/page/search", get(restaurants_search))
        .route("/restaurants/{id}", get(restaurant))
        .route("/reservations", post(create_reservation))
        .route("/reservations/my-reservations", get(my_reservations))
        .route("/reservations/{id}", get(reservation))
        .route("/checkout/paypal/create", post(create_order))
        .route("/checkout/paypal/capture", post(capture_order))
}

fn profile() -> Profile {
    Profile {
        id: 1,
        first_name: "Ana".into(),
        last_name: "Quispe".into(),
        email: "ana@mail.pe".into(),
        role: Some("CUSTOMER".into()),
    }
}

fn catalog() -> Vec<Restaurant> {
    vec![
        Restaurant {
            id: 42,
            name: "Central".into(),
            address: Some("Av. Pedro de Osma 301".into()),
            description: None,
            image_url: None,
            district_name: Some("Barranco".into()),
            price_per_person: Decimal::new(3000, 2),
        },
        Restaurant {
            id: 43,
            name: "Maido".into(),
            address: Some("Calle San Martin 399".into()),
            description: Some("Nikkei".into()),
            image_url: None,
            district_name: Some("Miraflores".into()),
            price_per_person: Decimal::new(4550, 2),
        },
    ]
}

fn page_of(content: Vec<Restaurant>, query: &HashMap<String, String>) -> Page<Restaurant> {
    let number: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: u32 = query.get("size").and_then(|s| s.parse().ok()).unwrap_or(10);
    let total = content.len() as u64;
    Page {
        number_of_elements: content.len() as u32,
        empty: content.is_empty(),
        content,
        total_elements: total,
        total_pages: total.div_ceil(u64::from(size)) as u32,
        size,
        number,
        first: number == 0,
        last: true,
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "status": status.as_u16(), "message": message }))).into_response()
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn sign_in(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record(Method::POST, "/auth/sign-in", &HashMap::new(), &headers, Some(body.clone()));
    if body["password"] != PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Bad credentials");
    }
    Json(AuthResponse {
        token: TOKEN.into(),
        user: profile(),
    })
    .into_response()
}

async fn sign_up(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record(Method::POST, "/auth/sign-up", &HashMap::new(), &headers, Some(body.clone()));
    let mut user = profile();
    user.id = 2;
    user.first_name = body["firstName"].as_str().unwrap_or_default().to_string();
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn districts(State(state): State<Shared>, headers: HeaderMap) -> Json<Vec<District>> {
    state.record(Method::GET, "/districts", &HashMap::new(), &headers, None);
    Json(vec![
        District { id: 1, name: "Barranco".into() },
        District { id: 2, name: "Miraflores".into() },
    ])
}

async fn restaurants_page(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Page<Restaurant>> {
    state.record(Method::GET, "/restaurants/page", &query, &headers, None);
    Json(page_of(catalog(), &query))
}

async fn restaurants_by_district(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Page<Restaurant>> {
    state.record(Method::GET, "/restaurants/page/district", &query, &headers, None);
    let district = query.get("districtName").cloned().unwrap_or_default();
    let content = catalog()
        .into_iter()
        .filter(|r| r.district_name.as_deref() == Some(district.as_str()))
        .collect();
    Json(page_of(content, &query))
}

async fn restaurants_search(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Page<Restaurant>> {
    state.record(Method::GET, "/restaurants/page/search", &query, &headers, None);
    let name = query.get("name").cloned().unwrap_or_default().to_lowercase();
    let content = catalog()
        .into_iter()
        .filter(|r| r.name.to_lowercase().contains(&name))
        .collect();
    Json(page_of(content, &query))
}

async fn restaurant(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    state.record(Method::GET, format!("/restaurants/{id}"), &HashMap::new(), &headers, None);
    match catalog().into_iter().find(|r| r.id == id) {
        Some(r) => Json(r).into_response(),
        None => error(StatusCode::NOT_FOUND, "Restaurant not found"),
    }
}

async fn create_reservation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(Method::POST, "/reservations", &HashMap::new(), &headers, Some(body.clone()));
    if !is_authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Full authentication is required");
    }
    let restaurant_id = body["restaurantId"].as_i64().unwrap_or_default();
    let Some(restaurant) = catalog().into_iter().find(|r| r.id == restaurant_id) else {
        return error(StatusCode::NOT_FOUND, "Restaurant not found");
    };
    let people = body["numberOfPeople"].as_u64().unwrap_or_default() as u32;
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let reservation = Reservation {
        id,
        restaurant_name: restaurant.name,
        reservation_date: body["reservationDate"]
            .as_str()
            .unwrap_or_default()
            .trim_end_matches('Z')
            .to_string(),
        number_of_people: people,
        status: "PENDING".into(),
        additional_info: body["additionalInfo"].as_str().map(str::to_string),
        total_amount: restaurant.price_per_person * Decimal::from(people),
    };
    state
        .reservations
        .lock()
        .unwrap()
        .insert(id, reservation.clone());
    (StatusCode::CREATED, Json(reservation)).into_response()
}

async fn my_reservations(State(state): State<Shared>, headers: HeaderMap) -> Response {
    state.record(Method::GET, "/reservations/my-reservations", &HashMap::new(), &headers, None);
    if !is_authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Full authentication is required");
    }
    let mut all: Vec<Reservation> = state.reservations.lock().unwrap().values().cloned().collect();
    all.sort_by_key(|r| r.id);
    Json(all).into_response()
}

async fn reservation(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    state.record(Method::GET, format!("/reservations/{id}"), &HashMap::new(), &headers, None);
    if state.fail_reservation_lookup.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable").into_response();
    }
    match state.reservations.lock().unwrap().get(&id) {
        Some(r) => Json(r.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Reservation not found"),
    }
}

async fn create_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record(Method::POST, "/checkout/paypal/create", &query, &headers, None);
    let Some(id) = query.get("reservationId").and_then(|id| id.parse::<i64>().ok()) else {
        return error(StatusCode::BAD_REQUEST, "reservationId is required");
    };
    if !state.reservations.lock().unwrap().contains_key(&id) {
        return error(StatusCode::NOT_FOUND, "Reservation not found");
    }
    let order_id = format!("ORDER-{id}");
    Json(PaypalOrder {
        paypal_url: format!("https://www.sandbox.paypal.com/checkoutnow?token={order_id}"),
        paypal_order_id: order_id,
    })
    .into_response()
}

async fn capture_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record(Method::POST, "/checkout/paypal/capture", &query, &headers, None);
    if state.fail_capture.load(Ordering::SeqCst) {
        return error(StatusCode::BAD_GATEWAY, "PayPal capture failed");
    }
    let order_id = query.get("orderId").cloned().unwrap_or_default();
    let completed = state.capture_completed.load(Ordering::SeqCst);
    if completed
        && let Some(id) = order_id.strip_prefix("ORDER-").and_then(|id| id.parse::<i64>().ok())
        && let Some(r) = state.reservations.lock().unwrap().get_mut(&id)
    {
        r.status = "CONFIRMED".into();
    }
    Json(PaypalCapture {
        completed,
        paypal_order_id: Some(order_id),
    })
    .into_response()
}
