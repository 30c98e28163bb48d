//! # Submission Gating
//!
//! Decides whether a booking may be sent to the backend.
//!
//! ## Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Guest clicks "Confirm Booking"                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  can_submit(session, request) ← THIS MODULE                            │
//! │       │                                                                 │
//! │       ├── not signed in?      → RequiresLogin (checked FIRST, even if  │
//! │       │                          the form is also incomplete)          │
//! │       │                                                                 │
//! │       ├── empty fields?       → MissingFields([date, time, ...])       │
//! │       │                                                                 │
//! │       └── otherwise           → Ready                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Party size is deliberately not a required field, even for tables.
//! Whether it should be is an open product question.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::BookingRequest;

// =============================================================================
// Session Provider
// =============================================================================

/// Answers whether the current visitor is signed in.
pub trait SessionProvider {
    fn is_authenticated(&self) -> bool;
}

impl<S: SessionProvider + ?Sized> SessionProvider for &S {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

// =============================================================================
// Required Fields
// =============================================================================

/// A form field that must be filled before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum RequiredField {
    Date,
    Time,
    ContactName,
    ContactEmail,
}

impl RequiredField {
    /// Field name as used by the form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RequiredField::Date => "date",
            RequiredField::Time => "time",
            RequiredField::ContactName => "contactName",
            RequiredField::ContactEmail => "contactEmail",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Submit Decision
// =============================================================================

/// Outcome of [`can_submit`]. Both non-ready outcomes are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "decision", content = "fields", rename_all = "snake_case")]
pub enum SubmitDecision {
    /// The visitor must sign in first.
    RequiresLogin,
    /// These fields are empty, in form order.
    MissingFields(Vec<RequiredField>),
    /// The booking can be submitted.
    Ready,
}

impl SubmitDecision {
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, SubmitDecision::Ready)
    }
}

/// Lists the required fields `request` leaves empty, in form order.
///
/// Presence only: a name of `" "` is present. Format checks live in
/// [`crate::validation`].
pub fn missing_fields(request: &BookingRequest) -> Vec<RequiredField> {
    let mut missing = Vec::new();

    if request.date.is_none() {
        missing.push(RequiredField::Date);
    }
    if request.time.is_none() {
        missing.push(RequiredField::Time);
    }
    if request.contact_name.is_empty() {
        missing.push(RequiredField::ContactName);
    }
    if request.contact_email.is_empty() {
        missing.push(RequiredField::ContactEmail);
    }

    missing
}

/// Decides whether `request` may be submitted by the visitor in `session`.
///
/// ## Example
/// ```rust
/// use tavern_core::{can_submit, BookingRequest, Session, SubmitDecision};
///
/// let decision = can_submit(&Session::anonymous(), &BookingRequest::table());
/// assert_eq!(decision, SubmitDecision::RequiresLogin);
/// ```
pub fn can_submit<S>(session: &S, request: &BookingRequest) -> SubmitDecision
where
    S: SessionProvider + ?Sized,
{
    if !session.is_authenticated() {
        return SubmitDecision::RequiresLogin;
    }

    let missing = missing_fields(request);
    if missing.is_empty() {
        SubmitDecision::Ready
    } else {
        SubmitDecision::MissingFields(missing)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
