//! Data models
//!
//! Shapes of the reservation backend's REST payloads.
//! All IDs are `i64`; JSON field names are camelCase.

pub mod checkout;
pub mod district;
pub mod page;
pub mod reservation;
pub mod restaurant;

// Re-exports
pub use checkout::*;
pub use district::*;
pub use page::*;
pub use reservation::*;
pub use restaurant::*;
