//! Booking bodies and the fixed payloads the scenarios send

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDates {
    pub checkin: String,
    pub checkout: String,
}

impl BookingDates {
    #[must_use]
    pub fn new(checkin: impl Into<String>, checkout: impl Into<String>) -> Self {
        Self {
            checkin: checkin.into(),
            checkout: checkout.into(),
        }
    }
}

/// A booking as sent and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub firstname: String,
    pub lastname: String,
    pub totalprice: f64,
    pub depositpaid: bool,
    pub bookingdates: BookingDates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additionalneeds: Option<String>,
}

/// Response of `POST /booking`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedBooking {
    pub bookingid: u64,
    pub booking: Booking,
}

/// One entry of `GET /booking`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingId {
    pub bookingid: u64,
}

/// Jim Brown, one year in 2018, breakfast included
#[must_use]
pub fn new_booking() -> Booking {
    Booking {
        firstname: "Jim".to_string(),
        lastname: "Brown".to_string(),
        totalprice: 0.0,
        depositpaid: true,
        bookingdates: BookingDates::new("2018-01-01", "2019-01-01"),
        additionalneeds: Some("Breakfast".to_string()),
    }
}

/// [`new_booking`] renamed to James at 113
#[must_use]
pub fn update_booking() -> Booking {
    Booking {
        firstname: "James".to_string(),
        totalprice: 113.0,
        ..new_booking()
    }
}
