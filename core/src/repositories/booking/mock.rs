//! Mock implementation of BookingRepository for testing.
//!
//! Owner-scoped listings join against the item mock the same way the MySQL
//! implementation joins the items table, so the mock must be built over the
//! item repository instance the rest of the test wiring uses. The overlap
//! guards run entirely inside one write-lock critical section, mirroring the
//! transactional guarantee of the MySQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{booking::sort_newest_first, Booking, BookingStatus, StateFilter};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::item::{ItemRepository, MockItemRepository};

use super::trait_::BookingRepository;

/// In-memory booking repository for testing
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<i64, Booking>>>,
    next_id: AtomicI64,
    items: Arc<MockItemRepository>,
}

impl MockBookingRepository {
    /// Create a new mock repository sharing the given item repository
    pub fn new(items: Arc<MockItemRepository>) -> Self {
        Self {
            bookings: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
            items,
        }
    }

    fn overlaps_approved(
        bookings: &HashMap<i64, Booking>,
        candidate: &Booking,
        exclude_id: i64,
    ) -> bool {
        bookings.values().any(|b| {
            b.id != exclude_id
                && b.item_id == candidate.item_id
                && b.status == BookingStatus::Approved
                && b.overlaps(candidate.start, candidate.end)
        })
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn create(&self, mut booking: Booking) -> DomainResult<Booking> {
        let mut bookings = self.bookings.write().await;

        if Self::overlaps_approved(&bookings, &booking, 0) {
            return Err(DomainError::validation(format!(
                "Item {} is already booked for the requested window",
                booking.item_id
            )));
        }

        booking.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn approve(&self, booking_id: i64) -> DomainResult<Booking> {
        let mut bookings = self.bookings.write().await;

        let candidate = bookings
            .get(&booking_id)
            .cloned()
            .ok_or(DomainError::not_found("Booking", booking_id))?;

        if candidate.status != BookingStatus::Waiting {
            return Err(DomainError::validation(format!(
                "Booking {booking_id} has already been decided"
            )));
        }

        if Self::overlaps_approved(&bookings, &candidate, booking_id) {
            return Err(DomainError::validation(format!(
                "Item {} is already booked for the requested window",
                candidate.item_id
            )));
        }

        let booking = bookings
            .get_mut(&booking_id)
            .ok_or(DomainError::not_found("Booking", booking_id))?;
        booking.status = BookingStatus::Approved;
        Ok(booking.clone())
    }

    async fn update_status(
        &self,
        booking_id: i64,
        status: BookingStatus,
    ) -> DomainResult<Booking> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .get_mut(&booking_id)
            .ok_or(DomainError::not_found("Booking", booking_id))?;

        // Decisions only ever replace WAITING.
        if booking.status != BookingStatus::Waiting {
            return Err(DomainError::validation(format!(
                "Booking {booking_id} has already been decided"
            )));
        }

        booking.status = status;
        Ok(booking.clone())
    }

    async fn find_for_booker(
        &self,
        booker_id: i64,
        filter: StateFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let mut matched: Vec<Booking> = bookings
            .values()
            .filter(|b| b.booker_id == booker_id && filter.matches(b, now))
            .cloned()
            .collect();
        sort_newest_first(&mut matched);
        Ok(matched)
    }

    async fn find_for_owner(
        &self,
        owner_id: i64,
        filter: StateFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        let owned: Vec<i64> = self
            .items
            .find_by_owner(owner_id)
            .await?
            .into_iter()
            .map(|i| i.id)
            .collect();

        let bookings = self.bookings.read().await;
        let mut matched: Vec<Booking> = bookings
            .values()
            .filter(|b| owned.contains(&b.item_id) && filter.matches(b, now))
            .cloned()
            .collect();
        sort_newest_first(&mut matched);
        Ok(matched)
    }

    async fn has_qualifying_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let bookings = self.bookings.read().await;
        Ok(bookings.values().any(|b| {
            b.item_id == item_id
                && b.booker_id == booker_id
                && b.status == BookingStatus::Approved
                && b.end < now
        }))
    }
}
