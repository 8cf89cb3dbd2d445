//! Booking engine: creation, owner decisions, cancellation and listing.
//!
//! Listing endpoints thread a single `now` captured at the HTTP boundary
//! through to the repository so every booking in a response is classified
//! against the same instant.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::{Booking, BookingStatus, Item, StateFilter};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BookingRepository, ItemRepository, UserRepository};

/// Service managing the booking lifecycle
pub struct BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    booking_repository: Arc<B>,
    item_repository: Arc<I>,
    user_repository: Arc<U>,
}

impl<B, I, U> BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    /// Create a new booking service
    pub fn new(
        booking_repository: Arc<B>,
        item_repository: Arc<I>,
        user_repository: Arc<U>,
    ) -> Self {
        Self {
            booking_repository,
            item_repository,
            user_repository,
        }
    }

    /// Request a booking of an item for `[start, end]`. The new booking
    /// starts WAITING; the repository rejects windows overlapping an already
    /// APPROVED booking.
    pub async fn create(
        &self,
        booker_id: i64,
        item_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        self.require_user(booker_id).await?;
        let item = self.require_item(item_id).await?;

        if !item.available {
            return Err(DomainError::validation(format!(
                "Item {item_id} is not available for booking"
            )));
        }
        if item.owner_id == booker_id {
            return Err(DomainError::forbidden(
                "Owners cannot book their own items",
            ));
        }
        if end <= start {
            return Err(DomainError::validation(
                "Booking end must be after its start",
            ));
        }

        let booking = self
            .booking_repository
            .create(Booking::new(item_id, booker_id, start, end))
            .await?;
        tracing::debug!(booking_id = booking.id, item_id, booker_id, "created booking");
        Ok(booking)
    }

    /// Decide a WAITING booking. Only the item's owner may do this; approval
    /// re-verifies the window against other APPROVED bookings atomically and
    /// bumps the item's rental counter.
    pub async fn decide(
        &self,
        owner_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> DomainResult<Booking> {
        let booking = self.require_booking(booking_id).await?;
        let item = self.require_item(booking.item_id).await?;

        if item.owner_id != owner_id {
            return Err(DomainError::forbidden(
                "Only the item owner may approve or reject a booking",
            ));
        }
        if booking.status != BookingStatus::Waiting {
            return Err(DomainError::validation(format!(
                "Booking {booking_id} has already been decided"
            )));
        }

        if approved {
            let booking = self.booking_repository.approve(booking_id).await?;
            self.item_repository
                .increment_rental_count(booking.item_id)
                .await?;
            Ok(booking)
        } else {
            self.booking_repository
                .update_status(booking_id, BookingStatus::Rejected)
                .await
        }
    }

    /// Withdraw a WAITING booking. Only the booker may do this.
    pub async fn cancel(&self, booker_id: i64, booking_id: i64) -> DomainResult<Booking> {
        let booking = self.require_booking(booking_id).await?;

        if booking.booker_id != booker_id {
            return Err(DomainError::forbidden(
                "Only the booker may cancel a booking",
            ));
        }
        if booking.status != BookingStatus::Waiting {
            return Err(DomainError::validation(format!(
                "Booking {booking_id} can no longer be canceled"
            )));
        }

        self.booking_repository
            .update_status(booking_id, BookingStatus::Canceled)
            .await
    }

    /// Fetch a booking; visible only to the booker or the item's owner
    pub async fn find_by_id(&self, caller_id: i64, booking_id: i64) -> DomainResult<Booking> {
        let booking = self.require_booking(booking_id).await?;
        let item = self.require_item(booking.item_id).await?;

        if booking.booker_id != caller_id && item.owner_id != caller_id {
            return Err(DomainError::forbidden(format!(
                "Booking {booking_id} is not visible to user {caller_id}"
            )));
        }

        Ok(booking)
    }

    /// Bookings made by `booker_id`, classified by `filter` at `now`
    pub async fn list_for_booker(
        &self,
        booker_id: i64,
        filter: StateFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        self.require_user(booker_id).await?;
        self.booking_repository
            .find_for_booker(booker_id, filter, now)
            .await
    }

    /// Bookings on items owned by `owner_id`, classified by `filter` at `now`
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        filter: StateFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        self.require_user(owner_id).await?;
        self.booking_repository
            .find_for_owner(owner_id, filter, now)
            .await
    }

    async fn require_user(&self, user_id: i64) -> DomainResult<()> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("User", user_id))?;
        Ok(())
    }

    async fn require_item(&self, item_id: i64) -> DomainResult<Item> {
        self.item_repository
            .find_by_id(item_id)
            .await?
            .ok_or(DomainError::not_found("Item", item_id))
    }

    async fn require_booking(&self, booking_id: i64) -> DomainResult<Booking> {
        self.booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or(DomainError::not_found("Booking", booking_id))
    }
}
