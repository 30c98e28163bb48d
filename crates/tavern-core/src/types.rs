//! # Domain Types
//!
//! Core domain types used throughout Tavern.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ BookingRequest  │   │   BookingKind   │   │   GameVariant   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  kind           │   │  Table          │   │  TableTennis    │       │
//! │  │  date?  time?   │   │  Game{variant}  │   │  EightBallPool  │       │
//! │  │  party_size?    │   └─────────────────┘   └─────────────────┘       │
//! │  │  contact_*      │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │     Session     │   │   UserProfile   │       │
//! │                        │  user?          │──►│  id, name, ...  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifetime of a BookingRequest
//! A request is transient: the form builds one per submission attempt and
//! drops it after submit or when the guest navigates away. Nothing here is
//! persisted; confirmation state lives in the backend's response.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::submission::SessionProvider;

// =============================================================================
// Game Variant
// =============================================================================

/// The games that can be booked at the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameVariant {
    #[serde(rename = "table-tennis")]
    TableTennis,
    #[serde(rename = "8-ball-pool")]
    EightBallPool,
}

impl GameVariant {
    /// All bookable games, in display order.
    pub const ALL: [GameVariant; 2] = [GameVariant::TableTennis, GameVariant::EightBallPool];

    /// Identifier used by the backend (`game_type` field).
    pub const fn wire_name(&self) -> &'static str {
        match self {
            GameVariant::TableTennis => "table-tennis",
            GameVariant::EightBallPool => "8-ball-pool",
        }
    }

    /// Name shown to guests.
    pub const fn display_name(&self) -> &'static str {
        match self {
            GameVariant::TableTennis => "Table Tennis",
            GameVariant::EightBallPool => "8 Ball Pool",
        }
    }
}

impl std::fmt::Display for GameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for GameVariant {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table-tennis" | "table tennis" | "tabletennis" => Ok(GameVariant::TableTennis),
            "8-ball-pool" | "8 ball pool" | "eight-ball-pool" | "pool" => {
                Ok(GameVariant::EightBallPool)
            }
            _ => Err(crate::ValidationError::NotAllowed {
                field: "gameVariant".to_string(),
                allowed: GameVariant::ALL
                    .iter()
                    .map(|g| g.wire_name().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Booking Kind
// =============================================================================

/// What is being booked.
///
/// The game variant lives inside `Game`, so a table booking can never carry
/// one and a game booking always does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingKind {
    /// A restaurant table.
    Table,
    /// A game table (table tennis, pool).
    Game { variant: GameVariant },
}

impl BookingKind {
    /// Returns true for game bookings.
    #[inline]
    pub const fn is_game(&self) -> bool {
        matches!(self, BookingKind::Game { .. })
    }

    /// Returns the game variant, if this is a game booking.
    #[inline]
    pub const fn game_variant(&self) -> Option<GameVariant> {
        match self {
            BookingKind::Table => None,
            BookingKind::Game { variant } => Some(*variant),
        }
    }

    /// Label used in confirmation messages ("Table", "Table Tennis Game").
    pub fn label(&self) -> String {
        match self {
            BookingKind::Table => "Table".to_string(),
            BookingKind::Game { variant } => format!("{} Game", variant.display_name()),
        }
    }
}

// =============================================================================
// Booking Request
// =============================================================================

/// A proposed booking, as filled in on the booking form.
///
/// `date` and `time` stay `None` until the guest picks them; the discount
/// engine treats that as "no booking yet" and quotes zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Table or game (with variant).
    pub kind: BookingKind,

    /// Calendar date, no time component.
    #[ts(as = "Option<String>")]
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Wall-clock time, 24-hour, minute resolution. Serialized as `HH:MM`.
    #[ts(as = "Option<String>")]
    #[serde(default, with = "hhmm")]
    pub time: Option<NaiveTime>,

    /// Number of guests. Only meaningful for table bookings.
    #[serde(default)]
    pub party_size: Option<u32>,

    /// Name of the person booking.
    #[serde(default)]
    pub contact_name: String,

    /// Contact email address.
    #[serde(default)]
    pub contact_email: String,
}

impl BookingRequest {
    /// Creates an empty request of the given kind.
    pub fn new(kind: BookingKind) -> Self {
        BookingRequest {
            kind,
            date: None,
            time: None,
            party_size: None,
            contact_name: String::new(),
            contact_email: String::new(),
        }
    }

    /// Creates an empty table booking.
    pub fn table() -> Self {
        Self::new(BookingKind::Table)
    }

    /// Creates an empty game booking.
    pub fn game(variant: GameVariant) -> Self {
        Self::new(BookingKind::Game { variant })
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the time, dropping seconds and below.
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(truncate_to_minute(time));
        self
    }

    pub fn with_party_size(mut self, party_size: u32) -> Self {
        self.party_size = Some(party_size);
        self
    }

    pub fn with_contact(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.contact_name = name.into();
        self.contact_email = email.into();
        self
    }

    /// Combines date and time into the booking instant.
    ///
    /// Returns `None` until both are set.
    pub fn booking_instant(&self) -> Option<NaiveDateTime> {
        Some(self.date?.and_time(self.time?))
    }
}

/// Drops seconds and sub-second precision from a time.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// `HH:MM` (de)serialization for optional booking times.
///
/// `HH:MM:SS` is accepted on input; seconds are dropped.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => crate::validation::parse_booking_time(s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// A signed-in storefront user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Authentication state of the current visitor.
///
/// Passed explicitly into [`crate::can_submit`]; there is no process-wide
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub user: Option<UserProfile>,
}

impl Session {
    /// A visitor who has not signed in.
    pub fn anonymous() -> Self {
        Session { user: None }
    }

    /// A signed-in visitor.
    pub fn signed_in(user: UserProfile) -> Self {
        Session { user: Some(user) }
    }
}

impl SessionProvider for Session {
    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_variant_names() {
        assert_eq!(GameVariant::TableTennis.wire_name(), "table-tennis");
        assert_eq!(GameVariant::EightBallPool.wire_name(), "8-ball-pool");
        assert_eq!(GameVariant::EightBallPool.to_string(), "8 Ball Pool");
        assert_eq!("8-ball-pool".parse::<GameVariant>().unwrap(), GameVariant::EightBallPool);
        assert!("darts".parse::<GameVariant>().is_err());
    }

    #[test]
    fn test_booking_kind_label() {
        assert_eq!(BookingKind::Table.label(), "Table");
        let kind = BookingKind::Game {
            variant: GameVariant::TableTennis,
        };
        assert_eq!(kind.label(), "Table Tennis Game");
        assert!(kind.is_game());
        assert_eq!(kind.game_variant(), Some(GameVariant::TableTennis));
        assert_eq!(BookingKind::Table.game_variant(), None);
    }

    #[test]
    fn test_with_time_truncates_seconds() {
        let request = BookingRequest::table().with_time(NaiveTime::from_hms_opt(14, 5, 59).unwrap());
        assert_eq!(request.time, NaiveTime::from_hms_opt(14, 5, 0));
    }

    #[test]
    fn test_booking_instant_requires_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 18).unwrap();
        let time = NaiveTime::from_hms_opt(19, 30, 0).unwrap();

        assert_eq!(BookingRequest::table().with_date(date).booking_instant(), None);
        assert_eq!(BookingRequest::table().with_time(time).booking_instant(), None);
        assert_eq!(
            BookingRequest::table().with_date(date).with_time(time).booking_instant(),
            Some(date.and_time(time))
        );
    }

    #[test]
    fn test_request_json_shape() {
        let request = BookingRequest::game(GameVariant::EightBallPool)
            .with_date(NaiveDate::from_ymd_opt(2025, 7, 18).unwrap())
            .with_time(NaiveTime::from_hms_opt(17, 30, 0).unwrap())
            .with_contact("Ana", "ana@example.com");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["kind"]["kind"], "game");
        assert_eq!(json["kind"]["variant"], "8-ball-pool");
        assert_eq!(json["date"], "2025-07-18");
        assert_eq!(json["time"], "17:30");
        assert_eq!(json["contactEmail"], "ana@example.com");
    }

    #[test]
    fn test_request_from_form_json() {
        let json = r#"{
            "kind": { "kind": "table" },
            "date": "2025-07-18",
            "time": "17:30:00",
            "partySize": 4,
            "contactName": "Ana",
            "contactEmail": "ana@example.com"
        }"#;
        let request: BookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind, BookingKind::Table);
        assert_eq!(request.time, NaiveTime::from_hms_opt(17, 30, 0));
        assert_eq!(request.party_size, Some(4));

        // Unset fields on a half-filled form
        let request: BookingRequest =
            serde_json::from_str(r#"{ "kind": { "kind": "table" }, "time": "" }"#).unwrap();
        assert_eq!(request.date, None);
        assert_eq!(request.time, None);
        assert!(request.contact_name.is_empty());
    }

    #[test]
    fn test_session_authentication() {
        assert!(!Session::anonymous().is_authenticated());
        let user = UserProfile {
            id: "1".to_string(),
            name: "ana".to_string(),
            email: "ana@example.com".to_string(),
            is_admin: false,
        };
        assert!(Session::signed_in(user).is_authenticated());
    }
}
