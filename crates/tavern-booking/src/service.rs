//! # Booking Service
//!
//! The booking form's "Confirm Booking" flow.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit(session, request, return_to)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  can_submit ──► RequiresLogin ──► toast "Login Required"               │
//! │       │                           └─► LoginRequired(redirect)          │
//! │       │                                                                 │
//! │       ├──────► MissingFields ───► toast "Missing Information"          │
//! │       │                           └─► MissingFields(fields)            │
//! │       ▼                                                                 │
//! │  Ready: discount as of NOW (not as of the last preview)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  transport.submit(payload)                                             │
//! │       ├── success        ──► toast "Booking Confirmed!"  ──► Confirmed │
//! │       ├── success=false  ──► toast "Booking Failed"      ──► Rejected  │
//! │       └── error          ──► toast "Server Error"  ──► TransportFailed │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service holds no per-booking state, so previews may keep running
//! while a submission is in flight.

use serde::Serialize;
use tavern_core::discount::{rules_for, DiscountRule};
use tavern_core::{
    can_submit, BookingRequest, Clock, DiscountBreakdown, DiscountEngine, Percent, RequiredField,
    SessionProvider, SubmitDecision,
};
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::BookingConfig;
use crate::error::BookingError;
use crate::notify::{Notification, NotificationSink};
use crate::payload::BookingPayload;
use crate::transport::SubmissionTransport;

// =============================================================================
// Outcome Types
// =============================================================================

/// Where to send a visitor who must sign in first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRedirect {
    pub path: String,
    /// Page to come back to after signing in.
    pub return_to: String,
}

/// A booking the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub label: String,
    pub date: String,
    pub time: String,
    pub discount: Percent,
}

impl Confirmation {
    /// Message shown to the guest.
    pub fn message(&self) -> String {
        let suffix = if self.discount.is_zero() {
            "!".to_string()
        } else {
            format!(" with {} discount!", self.discount)
        };
        format!(
            "Your {} booking for {} at {} has been confirmed{}",
            self.label, self.date, self.time, suffix
        )
    }
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingOutcome {
    /// Visitor is not signed in.
    LoginRequired { redirect: LoginRedirect },
    /// Form is incomplete.
    MissingFields { fields: Vec<RequiredField> },
    /// Backend accepted the booking.
    Confirmed { confirmation: Confirmation },
    /// Backend answered `success: false`.
    Rejected { message: String },
    /// Backend could not be reached or answered garbage.
    TransportFailed { reason: String, retryable: bool },
}

impl BookingOutcome {
    /// True once the booking is in; the form should be reset.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, BookingOutcome::Confirmed { .. })
    }
}

// =============================================================================
// User-facing Messages
// =============================================================================

const LOGIN_REQUIRED_TITLE: &str = "Login Required";
const LOGIN_REQUIRED_MESSAGE: &str = "Please login first to make a booking.";
const MISSING_INFO_TITLE: &str = "Missing Information";
const MISSING_INFO_MESSAGE: &str = "Please fill in all required fields.";
const CONFIRMED_TITLE: &str = "Booking Confirmed!";
const FAILED_TITLE: &str = "Booking Failed";
const FAILED_FALLBACK_MESSAGE: &str = "Something went wrong.";
const SERVER_ERROR_TITLE: &str = "Server Error";
const SERVER_ERROR_MESSAGE: &str = "Failed to submit booking. Please try again later.";

// =============================================================================
// Booking Service
// =============================================================================

/// Runs previews and submissions for the booking form.
pub struct BookingService<T, N, C> {
    config: BookingConfig,
    transport: T,
    notifier: N,
    engine: DiscountEngine<C>,
}

impl<T, N, C> BookingService<T, N, C>
where
    T: SubmissionTransport,
    N: NotificationSink,
    C: Clock,
{
    pub fn new(config: BookingConfig, transport: T, notifier: N, clock: C) -> Self {
        BookingService {
            config,
            transport,
            notifier,
            engine: DiscountEngine::new(clock),
        }
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Live discount preview while the form is being filled.
    pub fn preview(&self, request: &BookingRequest) -> DiscountBreakdown {
        self.engine.breakdown(request)
    }

    /// Rules to display next to the form.
    pub fn rules(&self, request: &BookingRequest) -> Vec<DiscountRule> {
        rules_for(&request.kind)
    }

    /// Submits `request` on behalf of the visitor in `session`.
    ///
    /// `return_to` is the page the visitor should come back to if they are
    /// sent to sign in.
    pub async fn submit<S>(
        &self,
        session: &S,
        request: &BookingRequest,
        return_to: &str,
    ) -> BookingOutcome
    where
        S: SessionProvider + ?Sized,
    {
        let attempt_id = Uuid::new_v4();
        let span = info_span!("booking_submit", %attempt_id, kind = %request.kind.label());

        async move {
            match can_submit(session, request) {
                SubmitDecision::RequiresLogin => {
                    debug!("Visitor not signed in, redirecting to login");
                    self.notifier
                        .notify(Notification::error(LOGIN_REQUIRED_TITLE, LOGIN_REQUIRED_MESSAGE));
                    BookingOutcome::LoginRequired {
                        redirect: LoginRedirect {
                            path: self.config.auth.login_path.clone(),
                            return_to: return_to.to_string(),
                        },
                    }
                }
                SubmitDecision::MissingFields(fields) => {
                    debug!(?fields, "Booking form incomplete");
                    self.notifier
                        .notify(Notification::error(MISSING_INFO_TITLE, MISSING_INFO_MESSAGE));
                    BookingOutcome::MissingFields { fields }
                }
                SubmitDecision::Ready => self.send(request).await,
            }
        }
        .instrument(span)
        .await
    }

    async fn send(&self, request: &BookingRequest) -> BookingOutcome {
        // Lead time counts from the moment of submission
        let discount = self.engine.quote(request);

        let payload = match BookingPayload::from_request(request, discount, &self.config.booking) {
            Ok(payload) => payload,
            Err(e) => return self.transport_failed(BookingError::from(e)),
        };

        info!(
            date = payload.booking_date(),
            time = payload.booking_time(),
            %discount,
            "Submitting booking"
        );

        match self.transport.submit(&payload).await {
            Ok(response) if response.success => {
                let confirmation = Confirmation {
                    label: request.kind.label(),
                    date: payload.booking_date().to_string(),
                    time: payload.booking_time().to_string(),
                    discount,
                };
                info!("Booking confirmed");
                self.notifier
                    .notify(Notification::info(CONFIRMED_TITLE, confirmation.message()));
                BookingOutcome::Confirmed { confirmation }
            }
            Ok(response) => {
                let message = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| FAILED_FALLBACK_MESSAGE.to_string());
                info!(%message, "Booking rejected by backend");
                self.notifier
                    .notify(Notification::error(FAILED_TITLE, message.clone()));
                BookingOutcome::Rejected { message }
            }
            Err(e) => self.transport_failed(e),
        }
    }

    fn transport_failed(&self, err: BookingError) -> BookingOutcome {
        error!(error = %err, "Booking submission failed");
        self.notifier
            .notify(Notification::error(SERVER_ERROR_TITLE, SERVER_ERROR_MESSAGE));
        BookingOutcome::TransportFailed {
            retryable: err.is_retryable(),
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
