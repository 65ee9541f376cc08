//! REST services
//!
//! One service per backend resource. The reservation and checkout
//! services sit behind traits so the payment flow can run against any
//! backend implementation.

pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod reservations;

pub use auth::AuthService;
pub use catalog::{CatalogFilter, DistrictService, RestaurantService};
pub use checkout::{CheckoutApi, CheckoutService};
pub use reservations::{ReservationApi, ReservationService};
