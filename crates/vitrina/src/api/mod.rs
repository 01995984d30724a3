//! Booking REST API layer.
//!
//! Request builders ([`BookingService`], [`AuthService`]) are pure: they
//! return an [`ApiRequest`] value and perform no I/O. [`ApiClient`] sends
//! requests and times them, [`BookingClient`] combines the two and fetches
//! tokens for the token-authenticated variants, and [`schema`] checks
//! response bodies structurally.

pub mod auth;
pub mod booking;
pub mod client;
pub mod endpoints;
pub mod payloads;
pub mod request;
pub mod schema;

pub use auth::AuthService;
pub use booking::{BookingClient, BookingService};
pub use client::{ApiClient, TimedResponse};
pub use payloads::{Booking, BookingDates, CreatedBooking};
pub use request::{ApiRequest, Credentials, HeaderSet, Method};
