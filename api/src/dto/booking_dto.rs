use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::handlers::ApiError;
use si_core::domain::entities::{Booking, BookingStatus};
use si_core::errors::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBookingDto {
    pub item_id: i64,

    /// Start of the requested window, now or later
    pub start: DateTime<Utc>,

    /// End of the requested window, strictly in the future
    pub end: DateTime<Utc>,
}

impl NewBookingDto {
    /// Window rules, checked against the request's reference instant:
    /// start must not lie in the past, end must lie in the future and
    /// after start.
    pub fn validate_window(&self, now: DateTime<Utc>) -> Result<(), ApiError> {
        if self.start < now {
            return Err(ApiError(DomainError::validation(
                "Booking start must not be in the past",
            )));
        }
        if self.end <= now {
            return Err(ApiError(DomainError::validation(
                "Booking end must be in the future",
            )));
        }
        if self.end <= self.start {
            return Err(ApiError(DomainError::validation(
                "Booking end must be after its start",
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDto {
    pub id: i64,
    pub item_id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            item_id: booking.item_id,
            booker_id: booking.booker_id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
        }
    }
}
