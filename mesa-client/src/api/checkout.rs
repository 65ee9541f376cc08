//! PayPal checkout service

use async_trait::async_trait;
use shared::models::{PaypalCapture, PaypalOrder};

use crate::error::ClientResult;
use crate::http::HttpClient;

/// Payment backend, as the payment flow sees it
#[async_trait]
pub trait CheckoutApi: Send + Sync {
    /// Create a provider order for `reservation_id`
    async fn create_order(&self, reservation_id: i64) -> ClientResult<PaypalOrder>;
    /// Capture an order the payer approved
    async fn capture(&self, order_id: &str) -> ClientResult<PaypalCapture>;
}

#[derive(Debug, Clone)]
pub struct CheckoutService<H> {
    http: H,
    return_url: String,
    cancel_url: String,
}

impl<H: HttpClient> CheckoutService<H> {
    pub fn new(http: H, return_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            http,
            return_url: return_url.into(),
            cancel_url: cancel_url.into(),
        }
    }
}

#[async_trait]
impl<H: HttpClient> CheckoutApi for CheckoutService<H> {
    async fn create_order(&self, reservation_id: i64) -> ClientResult<PaypalOrder> {
        self.http
            .post_query("/checkout/paypal/create", &[
                ("reservationId", reservation_id.to_string()),
                ("returnUrl", self.return_url.clone()),
                ("cancelUrl", self.cancel_url.clone()),
            ])
            .await
    }

    async fn capture(&self, order_id: &str) -> ClientResult<PaypalCapture> {
        self.http
            .post_query("/checkout/paypal/capture", &[("orderId", order_id.to_string())])
            .await
    }
}
