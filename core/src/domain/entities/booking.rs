//! Booking entity and its temporal classification.
//!
//! A booking fixes its time window at creation and only the status moves,
//! monotonically: WAITING to APPROVED or REJECTED (by the item's owner), or
//! WAITING to CANCELED (by the booker). Listing endpoints classify bookings
//! relative to a single reference instant captured once per request; the same
//! predicates are pushed into SQL by the MySQL repository and evaluated
//! in memory by the mock, so both backends agree on every boundary case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::DomainError;

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Created by the booker, awaiting the owner's decision
    Waiting,
    /// Accepted by the item's owner
    Approved,
    /// Declined by the item's owner
    Rejected,
    /// Withdrawn by the booker before a decision
    Canceled,
}

impl BookingStatus {
    /// Storage representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELED" => Ok(Self::Canceled),
            other => Err(DomainError::database(format!(
                "Unknown booking status: {other}"
            ))),
        }
    }
}

/// A renter's reservation of an item for a date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier, assigned by the storage layer
    pub id: i64,

    /// Identifier of the booked item
    pub item_id: i64,

    /// Identifier of the renting user
    pub booker_id: i64,

    /// Start of the rental window
    pub start: DateTime<Utc>,

    /// End of the rental window, strictly after `start`
    pub end: DateTime<Utc>,

    /// Current lifecycle status
    pub status: BookingStatus,
}

impl Booking {
    /// Creates a new Booking in the WAITING state. The id is assigned when
    /// the entity is persisted.
    pub fn new(item_id: i64, booker_id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            item_id,
            booker_id,
            start,
            end,
            status: BookingStatus::Waiting,
        }
    }

    /// The window has fully elapsed
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.end < now
    }

    /// The window has not started yet
    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        self.start > now
    }

    /// `now` falls inside the window, boundaries inclusive
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }

    /// Whether this booking's window intersects `[start, end]`
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start <= end && start <= self.end
    }
}

/// State filter accepted by the booking listing endpoints.
///
/// CURRENT, PAST and FUTURE partition the bookings of a caller with respect
/// to a fixed reference instant; WAITING and REJECTED select by status, with
/// REJECTED also covering bookings the renter canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl StateFilter {
    /// Evaluate the filter predicate against a booking at `now`
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Current => booking.is_current(now),
            Self::Past => booking.is_past(now),
            Self::Future => booking.is_future(now),
            Self::Waiting => booking.status == BookingStatus::Waiting,
            Self::Rejected => matches!(
                booking.status,
                BookingStatus::Rejected | BookingStatus::Canceled
            ),
        }
    }
}

impl FromStr for StateFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "CURRENT" => Ok(Self::Current),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(DomainError::validation(format!("Unknown state: {other}"))),
        }
    }
}

/// Sort bookings by start descending, id descending as the stabilizing
/// secondary key. Matches the order the listing queries produce.
pub fn sort_newest_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.start.cmp(&a.start).then(b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn booking(id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Booking {
        Booking {
            id,
            ..Booking::new(1, 2, start, end)
        }
    }

    #[test]
    fn test_buckets_partition_bookings() {
        let now = Utc::now();
        let bookings = vec![
            booking(1, now - Duration::hours(3), now - Duration::hours(1)),
            booking(2, now - Duration::hours(1), now + Duration::hours(1)),
            booking(3, now + Duration::hours(1), now + Duration::hours(3)),
            booking(4, now, now + Duration::hours(1)),
            booking(5, now - Duration::hours(1), now),
        ];

        for b in &bookings {
            let buckets = [b.is_past(now), b.is_current(now), b.is_future(now)];
            let hits = buckets.iter().filter(|&&hit| hit).count();
            assert_eq!(hits, 1, "booking {} must land in exactly one bucket", b.id);
        }
    }

    #[test]
    fn test_current_boundaries_are_inclusive() {
        let now = Utc::now();
        let starts_now = booking(1, now, now + Duration::hours(1));
        let ends_now = booking(2, now - Duration::hours(1), now);

        assert!(starts_now.is_current(now));
        assert!(!starts_now.is_future(now));
        assert!(ends_now.is_current(now));
        assert!(!ends_now.is_past(now));
    }

    #[test]
    fn test_state_filter_parsing() {
        assert_eq!("current".parse::<StateFilter>().unwrap(), StateFilter::Current);
        assert_eq!("ALL".parse::<StateFilter>().unwrap(), StateFilter::All);
        assert_eq!("Past".parse::<StateFilter>().unwrap(), StateFilter::Past);

        let error = "SOON".parse::<StateFilter>().unwrap_err();
        assert_eq!(error, DomainError::validation("Unknown state: SOON"));
    }

    #[test]
    fn test_rejected_filter_covers_canceled() {
        let now = Utc::now();
        let mut b = booking(1, now + Duration::hours(1), now + Duration::hours(2));

        b.status = BookingStatus::Rejected;
        assert!(StateFilter::Rejected.matches(&b, now));

        b.status = BookingStatus::Canceled;
        assert!(StateFilter::Rejected.matches(&b, now));

        b.status = BookingStatus::Waiting;
        assert!(!StateFilter::Rejected.matches(&b, now));
        assert!(StateFilter::Waiting.matches(&b, now));
    }

    #[test]
    fn test_sort_newest_first_with_id_tiebreak() {
        let now = Utc::now();
        let start = now + Duration::hours(1);
        let mut bookings = vec![
            booking(1, start, start + Duration::hours(1)),
            booking(3, start, start + Duration::hours(2)),
            booking(2, start + Duration::hours(5), start + Duration::hours(6)),
        ];

        sort_newest_first(&mut bookings);

        let ids: Vec<i64> = bookings.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_overlap_boundaries_touch() {
        let now = Utc::now();
        let b = booking(1, now, now + Duration::hours(2));

        assert!(b.overlaps(now + Duration::hours(2), now + Duration::hours(3)));
        assert!(b.overlaps(now - Duration::hours(1), now));
        assert!(!b.overlaps(now + Duration::hours(3), now + Duration::hours(4)));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
            BookingStatus::Canceled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
    }
}
