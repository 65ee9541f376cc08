//! Restaurant Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Restaurant entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub district_name: Option<String>,
    /// Price charged per guest
    pub price_per_person: Decimal,
}
