//! PayPal checkout Models

use serde::{Deserialize, Serialize};

/// Order created on the provider side, waiting for the payer's approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaypalOrder {
    /// Opaque order token; comes back as `token` on the return URL
    pub paypal_order_id: String,
    /// Approval page the payer is sent to
    pub paypal_url: String,
}

/// Result of capturing an approved order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaypalCapture {
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_order_id: Option<String>,
}
