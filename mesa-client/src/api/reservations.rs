//! Reservation service

use async_trait::async_trait;
use shared::models::{Reservation, ReservationCreate};

use crate::error::ClientResult;
use crate::http::HttpClient;

/// Reservation backend, as the payment flow sees it
#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn create(&self, request: &ReservationCreate) -> ClientResult<Reservation>;
    async fn get(&self, id: i64) -> ClientResult<Reservation>;
    /// Reservations of the signed-in user
    async fn mine(&self) -> ClientResult<Vec<Reservation>>;
}

#[derive(Debug, Clone)]
pub struct ReservationService<H> {
    http: H,
}

impl<H: HttpClient> ReservationService<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }
}

#[async_trait]
impl<H: HttpClient> ReservationApi for ReservationService<H> {
    async fn create(&self, request: &ReservationCreate) -> ClientResult<Reservation> {
        self.http.post("/reservations", request).await
    }

    async fn get(&self, id: i64) -> ClientResult<Reservation> {
        self.http.get(&format!("/reservations/{id}"), &[]).await
    }

    async fn mine(&self) -> ClientResult<Vec<Reservation>> {
        self.http.get("/reservations/my-reservations", &[]).await
    }
}
