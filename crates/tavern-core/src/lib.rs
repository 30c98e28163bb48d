//! # tavern-core: Pure Booking Logic for Tavern
//!
//! This crate holds the booking rules of the Tavern storefront as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tavern Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront (booking form)                    │   │
//! │  │    Date/Time inputs ──► live discount badge ──► Confirm button  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tavern-booking (booking flow)                   │   │
//! │  │    preview, submit, notifications, PHP transport                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tavern-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ discount  │  │ submission │  │   clock   │  │   │
//! │  │   │  Request  │  │  Percent  │  │ canSubmit  │  │  System   │  │   │
//! │  │   │  Session  │  │   Rules   │  │  Decision  │  │  Fixed    │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NOW IS INJECTED                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (BookingRequest, BookingKind, Session, etc.)
//! - [`discount`] - Discount engine and the `Percent` type
//! - [`submission`] - Gating rule for whether a booking may be submitted
//! - [`clock`] - Clock abstraction for "now"
//! - [`validation`] - Input parsing and optional field checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use tavern_core::discount::compute_discount;
//! use tavern_core::{BookingKind, GameVariant};
//!
//! let now = NaiveDate::from_ymd_opt(2025, 7, 18)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let kind = BookingKind::Game { variant: GameVariant::TableTennis };
//!
//! // Two hours ahead, during the daytime band: 10 + 15
//! let discount = compute_discount(
//!     &kind,
//!     NaiveDate::from_ymd_opt(2025, 7, 18),
//!     NaiveTime::from_hms_opt(11, 0, 0),
//!     now,
//! );
//! assert_eq!(discount.value(), 25);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod discount;
pub mod error;
pub mod submission;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use discount::{DiscountBreakdown, DiscountEngine, Percent, TimeBand};
pub use error::{CoreError, ValidationError};
pub use submission::{can_submit, RequiredField, SessionProvider, SubmitDecision};
pub use types::*;
