//! Displayed reservation amount
//!
//! The total shown next to the form is party size × per-person price. It is
//! recomputed locally on every party-size change; the amount actually
//! billed comes from the backend.

use rust_decimal::Decimal;

/// Party size × per-person price
pub fn total_amount(party_size: u32, price_per_person: Decimal) -> Decimal {
    price_per_person * Decimal::from(party_size)
}
