//! Reservation Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Create reservation payload
///
/// Has no identifier: the backend assigns one when it accepts the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub restaurant_id: i64,
    /// Absolute instant, see [`crate::schedule::combine_with_offset`]
    pub reservation_date: String,
    pub number_of_people: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Reservation entity as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub restaurant_name: String,
    pub reservation_date: String,
    pub number_of_people: u32,
    /// Server-assigned; changes when a payment is confirmed
    pub status: String,
    #[serde(default)]
    pub additional_info: Option<String>,
    pub total_amount: Decimal,
}
