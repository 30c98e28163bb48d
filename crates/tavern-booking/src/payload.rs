//! # Booking Payloads
//!
//! Wire shapes of the restaurant backend's booking endpoints.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST book_table.php                POST api/game-booking.php           │
//! │  {                                  {                                   │
//! │    "booking_date": "2025-07-18",      "booking_date": "2025-07-18",     │
//! │    "booking_time": "19:30",           "booking_time": "14:00",          │
//! │    "guests": 2,                       "full_name": "Ana",               │
//! │    "full_name": "Ana",                "email": "ana@example.com",       │
//! │    "email": "ana@example.com",        "game_type": "table-tennis",      │
//! │    "discount": "10%",                 "discount": "25%"                 │
//! │    "table_id": 1                    }                                   │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tavern_core::submission::missing_fields;
use tavern_core::{BookingKind, BookingRequest, CoreError, GameVariant, Percent};

use crate::config::BookingSettings;

/// Body of a table booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBookingPayload {
    pub booking_date: String,
    pub booking_time: String,
    pub guests: u32,
    pub full_name: String,
    pub email: String,
    pub discount: String,
    pub table_id: u32,
}

/// Body of a game booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBookingPayload {
    pub booking_date: String,
    pub booking_time: String,
    pub full_name: String,
    pub email: String,
    pub game_type: GameVariant,
    pub discount: String,
}

/// A booking ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookingPayload {
    Table(TableBookingPayload),
    Game(GameBookingPayload),
}

impl BookingPayload {
    /// Builds the payload for a complete request.
    ///
    /// Party size falls back to the configured default. Fails with
    /// [`CoreError::IncompleteBooking`] if date or time is missing.
    pub fn from_request(
        request: &BookingRequest,
        discount: Percent,
        settings: &BookingSettings,
    ) -> Result<Self, CoreError> {
        let (Some(date), Some(time)) = (request.date, request.time) else {
            return Err(CoreError::IncompleteBooking {
                fields: missing_fields(request)
                    .iter()
                    .map(|f| f.to_string())
                    .collect(),
            });
        };

        let booking_date = date.format("%Y-%m-%d").to_string();
        let booking_time = time.format("%H:%M").to_string();
        let full_name = request.contact_name.clone();
        let email = request.contact_email.clone();

        Ok(match request.kind {
            BookingKind::Table => BookingPayload::Table(TableBookingPayload {
                booking_date,
                booking_time,
                guests: request
                    .party_size
                    .filter(|&n| n > 0)
                    .unwrap_or(settings.default_party_size),
                full_name,
                email,
                discount: discount.to_string(),
                table_id: settings.table_id,
            }),
            BookingKind::Game { variant } => BookingPayload::Game(GameBookingPayload {
                booking_date,
                booking_time,
                full_name,
                email,
                game_type: variant,
                discount: discount.to_string(),
            }),
        })
    }

    /// Kind of booking this payload carries.
    pub fn kind(&self) -> BookingKind {
        match self {
            BookingPayload::Table(_) => BookingKind::Table,
            BookingPayload::Game(game) => BookingKind::Game {
                variant: game.game_type,
            },
        }
    }

    pub fn booking_date(&self) -> &str {
        match self {
            BookingPayload::Table(t) => &t.booking_date,
            BookingPayload::Game(g) => &g.booking_date,
        }
    }

    pub fn booking_time(&self) -> &str {
        match self {
            BookingPayload::Table(t) => &t.booking_time,
            BookingPayload::Game(g) => &g.booking_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn request(kind: BookingKind) -> BookingRequest {
        BookingRequest::new(kind)
            .with_date(NaiveDate::from_ymd_opt(2025, 7, 18).unwrap())
            .with_time(NaiveTime::from_hms_opt(19, 30, 0).unwrap())
            .with_contact("Ana", "ana@example.com")
    }

    #[test]
    fn test_table_payload_json() {
        let payload = BookingPayload::from_request(
            &request(BookingKind::Table).with_party_size(4),
            Percent::new(10),
            &BookingSettings::default(),
        )
        .unwrap();

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "booking_date": "2025-07-18",
                "booking_time": "19:30",
                "guests": 4,
                "full_name": "Ana",
                "email": "ana@example.com",
                "discount": "10%",
                "table_id": 1
            })
        );
    }

    #[test]
    fn test_table_payload_defaults_party_size() {
        let payload = BookingPayload::from_request(
            &request(BookingKind::Table),
            Percent::zero(),
            &BookingSettings::default(),
        )
        .unwrap();

        match payload {
            BookingPayload::Table(t) => {
                assert_eq!(t.guests, 2);
                assert_eq!(t.discount, "0%");
            }
            other => panic!("expected table payload, got {:?}", other),
        }
    }

    #[test]
    fn test_game_payload_json() {
        let kind = BookingKind::Game {
            variant: GameVariant::EightBallPool,
        };
        let payload =
            BookingPayload::from_request(&request(kind), Percent::new(15), &BookingSettings::default())
                .unwrap();

        assert_eq!(payload.kind(), kind);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["game_type"], "8-ball-pool");
        assert_eq!(json["discount"], "15%");
        assert!(json.get("guests").is_none());
        assert!(json.get("table_id").is_none());
    }

    #[test]
    fn test_incomplete_request_is_rejected() {
        let err = BookingPayload::from_request(
            &BookingRequest::table(),
            Percent::zero(),
            &BookingSettings::default(),
        )
        .unwrap_err();

        match err {
            CoreError::IncompleteBooking { fields } => {
                assert_eq!(fields[..2], ["date".to_string(), "time".to_string()]);
            }
            other => panic!("expected IncompleteBooking, got {:?}", other),
        }
    }
}
