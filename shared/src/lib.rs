//! Shared types for the Mesa reservation client
//!
//! Wire DTOs exchanged with the reservation backend, plus the pure rules
//! the client applies before anything goes over the network: time slots,
//! the reservation instant, amount computation and form validation.

pub mod client;
pub mod forms;
pub mod models;
pub mod pricing;
pub mod schedule;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{AuthResponse, Profile, SignInRequest, SignUpRequest};
pub use forms::{ReservationForm, SignInForm, SignUpForm, ValidReservation};
pub use models::{
    District, Page, PaypalCapture, PaypalOrder, Reservation, ReservationCreate, Restaurant,
};
