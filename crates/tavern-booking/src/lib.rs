//! # tavern-booking: Booking Flow for Tavern
//!
//! Takes a booking from the storefront form to the restaurant backend.
//!
//! ## Module Organization
//! ```text
//! tavern_booking/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── config.rs       ◄─── Endpoints, defaults (TOML + env)
//! ├── error.rs        ◄─── BookingError
//! ├── payload.rs      ◄─── PHP endpoint request bodies
//! ├── transport.rs    ◄─── SubmissionTransport, HttpTransport
//! ├── notify.rs       ◄─── NotificationSink implementations
//! ├── service.rs      ◄─── BookingService (preview + submit)
//! └── bin/quote.rs    ◄─── Command-line quote/submit tool
//! ```
//!
//! The booking rules themselves live in `tavern-core`; this crate only
//! consults them and acts on the result.

pub mod config;
pub mod error;
pub mod notify;
pub mod payload;
pub mod service;
pub mod transport;

pub use config::BookingConfig;
pub use error::{BookingError, BookingResult};
pub use notify::{MemorySink, NoOpSink, Notification, NotificationSink, Severity, TracingSink};
pub use payload::BookingPayload;
pub use service::{BookingOutcome, BookingService, Confirmation, LoginRedirect};
pub use transport::{HttpTransport, SubmissionResponse, SubmissionTransport};
