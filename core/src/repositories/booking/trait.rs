//! Booking repository trait.
//!
//! The listing methods take the state filter and the reference instant as
//! parameters so the temporal predicate is evaluated at the data-access
//! boundary, against one `now` captured per request. The guarded methods
//! (`create`, `approve`) own the double-booking defence: each implementation
//! must make the overlap check and the write a single atomic step.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{Booking, BookingStatus, StateFilter};
use crate::errors::DomainResult;

/// Repository contract for Booking entities
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new WAITING booking, returning it with the storage-assigned
    /// id. Fails with a validation error when an APPROVED booking already
    /// overlaps the window; the check and the insert are atomic.
    async fn create(&self, booking: Booking) -> DomainResult<Booking>;

    /// Find a booking by id
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>>;

    /// Mark a WAITING booking APPROVED after atomically re-verifying that no
    /// other APPROVED booking overlaps its window. Fails with a validation
    /// error when the booking has already been decided.
    async fn approve(&self, booking_id: i64) -> DomainResult<Booking>;

    /// Set a WAITING booking's status without an overlap guard (REJECTED,
    /// CANCELED). Fails with a validation error when the booking has already
    /// been decided; decided statuses are never overwritten.
    async fn update_status(&self, booking_id: i64, status: BookingStatus)
        -> DomainResult<Booking>;

    /// Bookings made by a renter, filtered by state at `now`,
    /// sorted start descending with id descending as tie-break
    async fn find_for_booker(
        &self,
        booker_id: i64,
        filter: StateFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>>;

    /// Bookings on any item owned by a user, filtered by state at `now`,
    /// sorted start descending with id descending as tie-break
    async fn find_for_owner(
        &self,
        owner_id: i64,
        filter: StateFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>>;

    /// Whether the author has a completed, approved rental of the item:
    /// a booking with `end < now` and status APPROVED. Gates commenting.
    async fn has_qualifying_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<bool>;
}
