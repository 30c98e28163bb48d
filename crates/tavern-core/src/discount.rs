//! # Discount Module
//!
//! Computes the booking discount shown on the form and sent to the backend.
//!
//! ## Rule Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Booking Discount Rules                           │
//! │                                                                         │
//! │  Rule            Applies to    Condition                 Adds           │
//! │  ──────────────  ────────────  ────────────────────────  ──────         │
//! │  Lead time       all           booking >= now + 1h       10%           │
//! │  Daytime game    Game          hour in 10..=17           15%           │
//! │  Night game      Game          otherwise                  5%           │
//! │                                                                         │
//! │  Total is capped at 25%.                                               │
//! │                                                                         │
//! │  Date or time not chosen yet ──► 0% (live preview, not an error)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The time-of-day band uses the literal hour the guest entered. No
//! timezone normalisation happens anywhere.
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use tavern_core::{BookingRequest, DiscountEngine, FixedClock};
//!
//! let now = NaiveDate::from_ymd_opt(2025, 7, 18).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let engine = DiscountEngine::new(FixedClock::new(now));
//!
//! let request = BookingRequest::table();
//! assert_eq!(engine.quote(&request).value(), 0); // nothing chosen yet
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::clock::Clock;
use crate::types::{BookingKind, BookingRequest};

// =============================================================================
// Rule Constants
// =============================================================================

/// Added when the booking is at least [`MIN_LEAD_TIME_HOURS`] ahead.
pub const LEAD_TIME_DISCOUNT: u8 = 10;

/// Added to game bookings in the daytime band.
pub const DAYTIME_GAME_DISCOUNT: u8 = 15;

/// Added to game bookings outside the daytime band.
pub const NIGHT_GAME_DISCOUNT: u8 = 5;

/// Upper bound on the combined discount.
pub const MAX_DISCOUNT: u8 = 25;

/// Minimum lead time that earns [`LEAD_TIME_DISCOUNT`].
pub const MIN_LEAD_TIME_HOURS: i64 = 1;

/// First hour of the daytime band (inclusive).
pub const DAYTIME_START_HOUR: u32 = 10;

/// Last hour of the daytime band (inclusive), so 17:59 is still daytime.
pub const DAYTIME_END_HOUR: u32 = 17;

// =============================================================================
// Percent
// =============================================================================

/// A whole-number percentage.
///
/// `Display` renders the backend's wire form, e.g. `"10%"`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Percent(u8);

impl Percent {
    /// Creates a percentage.
    #[inline]
    pub const fn new(value: u8) -> Self {
        Percent(value)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Returns the numeric value.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Clamps to at most `max`.
    #[inline]
    pub fn capped_at(self, max: Percent) -> Self {
        self.min(max)
    }
}

impl std::ops::Add for Percent {
    type Output = Percent;

    fn add(self, rhs: Percent) -> Percent {
        Percent(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Time Band
// =============================================================================

/// Time-of-day band used for game bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TimeBand {
    /// 10:00 to 17:59.
    Daytime,
    /// Any other hour.
    Night,
}

impl TimeBand {
    /// Classifies an hour (0..=23).
    pub const fn for_hour(hour: u32) -> Self {
        if hour >= DAYTIME_START_HOUR && hour <= DAYTIME_END_HOUR {
            TimeBand::Daytime
        } else {
            TimeBand::Night
        }
    }

    /// Discount this band adds to game bookings.
    pub const fn game_discount(&self) -> Percent {
        match self {
            TimeBand::Daytime => Percent::new(DAYTIME_GAME_DISCOUNT),
            TimeBand::Night => Percent::new(NIGHT_GAME_DISCOUNT),
        }
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Per-rule contributions to a discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountBreakdown {
    /// Lead-time component (0 or 10).
    pub lead_time: Percent,

    /// Band the booking falls in, for game bookings with a time set.
    pub time_band: Option<TimeBand>,

    /// Time-of-day component (0 for tables).
    pub time_of_day: Percent,

    /// Capped sum of the components.
    pub total: Percent,
}

impl DiscountBreakdown {
    /// Breakdown for a booking with no date/time yet.
    pub fn none() -> Self {
        DiscountBreakdown::default()
    }
}

/// Computes the discount with each rule's contribution.
///
/// Returns an all-zero breakdown when `date` or `time` is absent. Past
/// bookings are not rejected; they simply miss the lead-time rule.
pub fn discount_breakdown(
    kind: &BookingKind,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    now: NaiveDateTime,
) -> DiscountBreakdown {
    let (Some(date), Some(time)) = (date, time) else {
        return DiscountBreakdown::none();
    };

    let booking_at = date.and_time(time);
    let lead_time = if booking_at - now >= Duration::hours(MIN_LEAD_TIME_HOURS) {
        Percent::new(LEAD_TIME_DISCOUNT)
    } else {
        Percent::zero()
    };

    let time_band = kind.is_game().then(|| TimeBand::for_hour(time.hour()));
    let time_of_day = time_band
        .map(|band| band.game_discount())
        .unwrap_or_default();

    DiscountBreakdown {
        lead_time,
        time_band,
        time_of_day,
        total: (lead_time + time_of_day).capped_at(Percent::new(MAX_DISCOUNT)),
    }
}

/// Computes the discount percentage for a proposed booking.
///
/// ## Rules
/// - Date or time missing: `0`
/// - Booking at least one hour after `now`: `+10`
/// - Game booking at hour 10..=17: `+15`, other hours: `+5`
/// - Result never exceeds `25`
pub fn compute_discount(
    kind: &BookingKind,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    now: NaiveDateTime,
) -> Percent {
    discount_breakdown(kind, date, time, now).total
}

// =============================================================================
// Booking Rules (display)
// =============================================================================

/// A discount rule as shown to guests next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRule {
    pub description: String,
    pub discount: Percent,
}

/// Rules that can apply to a booking of `kind`.
pub fn rules_for(kind: &BookingKind) -> Vec<DiscountRule> {
    let mut rules = vec![DiscountRule {
        description: format!(
            "Book {}+ hours in advance for {} off",
            MIN_LEAD_TIME_HOURS,
            Percent::new(LEAD_TIME_DISCOUNT)
        ),
        discount: Percent::new(LEAD_TIME_DISCOUNT),
    }];

    if kind.is_game() {
        rules.push(DiscountRule {
            description: format!(
                "Daytime games ({}:00 - {}:59): Extra {} off",
                DAYTIME_START_HOUR,
                DAYTIME_END_HOUR,
                TimeBand::Daytime.game_discount()
            ),
            discount: TimeBand::Daytime.game_discount(),
        });
        rules.push(DiscountRule {
            description: format!(
                "Night games: Extra {} off",
                TimeBand::Night.game_discount()
            ),
            discount: TimeBand::Night.game_discount(),
        });
    }

    rules
}

// =============================================================================
// Discount Engine
// =============================================================================

/// Quotes discounts for booking requests against a clock.
///
/// Stateless between calls; every quote reads `now` afresh, so re-quoting a
/// stored request later may give a different result.
#[derive(Debug, Clone)]
pub struct DiscountEngine<C> {
    clock: C,
}

impl<C: Clock> DiscountEngine<C> {
    pub fn new(clock: C) -> Self {
        DiscountEngine { clock }
    }

    /// Discount for `request` as of now.
    pub fn quote(&self, request: &BookingRequest) -> Percent {
        self.breakdown(request).total
    }

    /// Discount breakdown for `request` as of now.
    pub fn breakdown(&self, request: &BookingRequest) -> DiscountBreakdown {
        discount_breakdown(&request.kind, request.date, request.time, self.clock.now())
    }

    /// The clock this engine reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::types::GameVariant;

    const GAME: BookingKind = BookingKind::Game {
        variant: GameVariant::TableTennis,
    };

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 18).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn now_at(hour: u32, minute: u32) -> NaiveDateTime {
        date().and_time(at(hour, minute))
    }

    #[test]
    fn test_missing_date_or_time_is_zero() {
        let now = now_at(8, 0);
        for kind in [BookingKind::Table, GAME] {
            assert_eq!(compute_discount(&kind, None, None, now), Percent::zero());
            assert_eq!(compute_discount(&kind, Some(date()), None, now), Percent::zero());
            assert_eq!(compute_discount(&kind, None, Some(at(14, 0)), now), Percent::zero());
        }
    }

    #[test]
    fn test_table_with_lead_time() {
        let d = compute_discount(&BookingKind::Table, Some(date()), Some(at(20, 0)), now_at(12, 0));
        assert_eq!(d.value(), 10);
    }

    #[test]
    fn test_table_exactly_one_hour_ahead() {
        let d = compute_discount(&BookingKind::Table, Some(date()), Some(at(13, 0)), now_at(12, 0));
        assert_eq!(d.value(), 10);
    }

    #[test]
    fn test_table_short_notice_and_past() {
        let now = now_at(12, 30);
        // 59 minutes ahead
        assert_eq!(
            compute_discount(&BookingKind::Table, Some(date()), Some(at(13, 29)), now).value(),
            0
        );
        // In the past: no error, no lead-time discount
        assert_eq!(
            compute_discount(&BookingKind::Table, Some(date()), Some(at(9, 0)), now).value(),
            0
        );
        let yesterday = date().pred_opt().unwrap();
        assert_eq!(
            compute_discount(&BookingKind::Table, Some(yesterday), Some(at(20, 0)), now).value(),
            0
        );
    }

    #[test]
    fn test_game_daytime_with_lead_time_hits_cap() {
        let d = compute_discount(&GAME, Some(date()), Some(at(14, 0)), now_at(9, 0));
        assert_eq!(d.value(), 25);
    }

    #[test]
    fn test_game_night_with_lead_time() {
        let d = compute_discount(&GAME, Some(date()), Some(at(20, 0)), now_at(9, 0));
        assert_eq!(d.value(), 15);
    }

    #[test]
    fn test_game_daytime_short_notice() {
        let d = compute_discount(&GAME, Some(date()), Some(at(11, 0)), now_at(10, 30));
        assert_eq!(d.value(), 15);
    }

    #[test]
    fn test_daytime_band_edges() {
        assert_eq!(TimeBand::for_hour(9), TimeBand::Night);
        assert_eq!(TimeBand::for_hour(10), TimeBand::Daytime);
        assert_eq!(TimeBand::for_hour(17), TimeBand::Daytime);
        assert_eq!(TimeBand::for_hour(18), TimeBand::Night);
        assert_eq!(TimeBand::for_hour(0), TimeBand::Night);

        // 17:59 still counts as daytime
        let d = compute_discount(&GAME, Some(date()), Some(at(17, 59)), now_at(17, 30));
        assert_eq!(d.value(), 15);
    }

    #[test]
    fn test_discount_always_within_bounds() {
        let now = now_at(12, 0);
        let days = [date().pred_opt().unwrap(), date(), date().succ_opt().unwrap()];
        for kind in [BookingKind::Table, GAME] {
            for day in days {
                for hour in 0..24 {
                    for minute in [0, 30, 59] {
                        let d = compute_discount(&kind, Some(day), Some(at(hour, minute)), now);
                        assert!(d.value() <= MAX_DISCOUNT);
                    }
                }
            }
        }
    }

    #[test]
    fn test_cap_is_enforced_on_sum() {
        let sum = Percent::new(20) + Percent::new(15);
        assert_eq!(sum.capped_at(Percent::new(MAX_DISCOUNT)).value(), 25);
        assert_eq!((Percent::new(250) + Percent::new(250)).value(), u8::MAX);
    }

    #[test]
    fn test_breakdown_components() {
        let b = discount_breakdown(&GAME, Some(date()), Some(at(21, 0)), now_at(9, 0));
        assert_eq!(b.lead_time.value(), 10);
        assert_eq!(b.time_band, Some(TimeBand::Night));
        assert_eq!(b.time_of_day.value(), 5);
        assert_eq!(b.total.value(), 15);

        let b = discount_breakdown(&BookingKind::Table, Some(date()), Some(at(14, 0)), now_at(9, 0));
        assert_eq!(b.time_band, None);
        assert_eq!(b.time_of_day, Percent::zero());
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent::new(10).to_string(), "10%");
        assert_eq!(Percent::zero().to_string(), "0%");
    }

    #[test]
    fn test_rules_for_kind() {
        assert_eq!(rules_for(&BookingKind::Table).len(), 1);
        let rules = rules_for(&GAME);
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].description, "Book 1+ hours in advance for 10% off");
        assert_eq!(rules[1].discount.value(), 15);
        assert_eq!(rules[2].discount.value(), 5);
    }

    #[test]
    fn test_engine_reads_clock_at_call_time() {
        let request = BookingRequest::table()
            .with_date(date())
            .with_time(at(13, 0));

        let early = DiscountEngine::new(FixedClock::new(now_at(11, 0)));
        assert_eq!(early.quote(&request).value(), 10);

        let late = DiscountEngine::new(FixedClock::new(now_at(12, 30)));
        assert_eq!(late.quote(&request).value(), 0);
    }
}
