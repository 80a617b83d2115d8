//! Booking model and status lifecycle.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Scheduled,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "Scheduled"),
            Self::Confirmed => write!(f, "Confirmed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Confirmed" => Self::Confirmed,
            "Cancelled" => Self::Cancelled,
            _ => Self::Scheduled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i64,
    pub driver_id: Option<i64>,
    pub pickup_address: String,
    pub drop_address: String,
    pub pickup_time: String,
    pub start_date: String,
    pub end_date: String,
}

/// A booking joined with the assigned driver's name, for the rider view.
#[derive(Debug, Clone, FromRow)]
pub struct BookingWithDriver {
    pub id: i64,
    pub pickup_address: String,
    pub drop_address: String,
    pub pickup_time: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub confirmed: bool,
    pub created_at: String,
    pub driver_name: Option<String>,
}

/// A booking joined with the rider's name, for the driver view.
#[derive(Debug, Clone, FromRow)]
pub struct BookingWithRider {
    pub id: i64,
    pub pickup_address: String,
    pub drop_address: String,
    pub pickup_time: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub confirmed: bool,
    pub created_at: String,
    pub user_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            BookingStatus::Scheduled,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::from(status.to_string()), status);
        }
    }

    #[test]
    fn unknown_status_defaults_to_scheduled() {
        assert_eq!(
            BookingStatus::from("Completed".to_string()),
            BookingStatus::Scheduled
        );
    }
}
