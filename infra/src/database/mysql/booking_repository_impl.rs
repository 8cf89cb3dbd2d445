//! MySQL implementation of the BookingRepository trait.
//!
//! The overlap-guarded writes (`create`, `approve`) run inside a transaction
//! that locks the item row with `SELECT ... FOR UPDATE` before checking for
//! conflicting APPROVED bookings. Concurrent requests for the same item
//! serialize on that row lock, so at most one overlapping booking can pass
//! the check and commit.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use si_core::domain::entities::{Booking, BookingStatus, StateFilter};
use si_core::errors::{DomainError, DomainResult};
use si_core::repositories::BookingRepository;

const BOOKING_COLUMNS: &str = "b.id, b.item_id, b.booker_id, b.start_date, b.end_date, b.status";

/// MySQL implementation of BookingRepository
pub struct MySqlBookingRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    /// Create a new MySQL booking repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Booking entity
    fn row_to_booking(row: &sqlx::mysql::MySqlRow) -> DomainResult<Booking> {
        let status: String = row
            .try_get("status")
            .map_err(|e| DomainError::database(format!("Failed to get status: {e}")))?;

        Ok(Booking {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database(format!("Failed to get id: {e}")))?,
            item_id: row
                .try_get("item_id")
                .map_err(|e| DomainError::database(format!("Failed to get item_id: {e}")))?,
            booker_id: row
                .try_get("booker_id")
                .map_err(|e| DomainError::database(format!("Failed to get booker_id: {e}")))?,
            start: row
                .try_get::<DateTime<Utc>, _>("start_date")
                .map_err(|e| DomainError::database(format!("Failed to get start_date: {e}")))?,
            end: row
                .try_get::<DateTime<Utc>, _>("end_date")
                .map_err(|e| DomainError::database(format!("Failed to get end_date: {e}")))?,
            status: BookingStatus::from_str(&status)?,
        })
    }

    /// SQL predicate for a state filter over the `b` alias, plus the number
    /// of times the reference instant must be bound to fill its placeholders.
    fn filter_predicate(filter: StateFilter) -> (&'static str, usize) {
        match filter {
            StateFilter::All => ("TRUE", 0),
            StateFilter::Current => ("b.start_date <= ? AND ? <= b.end_date", 2),
            StateFilter::Past => ("b.end_date < ?", 1),
            StateFilter::Future => ("b.start_date > ?", 1),
            StateFilter::Waiting => ("b.status = 'WAITING'", 0),
            StateFilter::Rejected => ("b.status IN ('REJECTED', 'CANCELED')", 0),
        }
    }

    /// Run a listing query with the given owning predicate (booker or owner
    /// axis) and state filter, binding the axis id first.
    async fn list_filtered(
        &self,
        axis_predicate: &str,
        axis_id: i64,
        filter: StateFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        let (state_predicate, now_binds) = Self::filter_predicate(filter);
        let query = format!(
            r#"
            SELECT {BOOKING_COLUMNS}
            FROM bookings b
            JOIN items i ON i.id = b.item_id
            WHERE {axis_predicate}
              AND {state_predicate}
            ORDER BY b.start_date DESC, b.id DESC
            "#
        );

        let mut q = sqlx::query(&query).bind(axis_id);
        for _ in 0..now_binds {
            q = q.bind(now);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        rows.iter().map(Self::row_to_booking).collect()
    }
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn create(&self, mut booking: Booking) -> DomainResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {e}")))?;

        // Lock the item row so concurrent bookings of the same item serialize
        // before the overlap check.
        let locked = sqlx::query("SELECT id FROM items WHERE id = ? FOR UPDATE")
            .bind(booking.item_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to lock item: {e}")))?;

        if locked.is_none() {
            return Err(DomainError::not_found("Item", booking.item_id));
        }

        let conflict = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE item_id = ?
                  AND status = 'APPROVED'
                  AND start_date <= ?
                  AND end_date >= ?
            ) AS conflict
            "#,
        )
        .bind(booking.item_id)
        .bind(booking.end)
        .bind(booking.start)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Overlap check failed: {e}")))?;

        let has_conflict: bool = conflict
            .try_get::<i64, _>("conflict")
            .map(|v| v != 0)
            .map_err(|e| DomainError::database(format!("Failed to get conflict: {e}")))?;

        if has_conflict {
            return Err(DomainError::validation(
                "Item is already booked for this period",
            ));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO bookings (item_id, booker_id, start_date, end_date, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(booking.item_id)
        .bind(booking.booker_id)
        .bind(booking.start)
        .bind(booking.end)
        .bind(booking.status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create booking: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {e}")))?;

        booking.id = result.last_insert_id() as i64;
        Ok(booking)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        let query = format!("SELECT {BOOKING_COLUMNS} FROM bookings b WHERE b.id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_booking(&row)?)),
            None => Ok(None),
        }
    }

    async fn approve(&self, booking_id: i64) -> DomainResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {e}")))?;

        let query =
            format!("SELECT {BOOKING_COLUMNS} FROM bookings b WHERE b.id = ? FOR UPDATE");
        let row = sqlx::query(&query)
            .bind(booking_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))?;

        let mut booking = Self::row_to_booking(&row)?;

        // Serialize against concurrent approvals of other bookings for the
        // same item before re-checking the window.
        sqlx::query("SELECT id FROM items WHERE id = ? FOR UPDATE")
            .bind(booking.item_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to lock item: {e}")))?;

        let conflict = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE item_id = ?
                  AND id <> ?
                  AND status = 'APPROVED'
                  AND start_date <= ?
                  AND end_date >= ?
            ) AS conflict
            "#,
        )
        .bind(booking.item_id)
        .bind(booking.id)
        .bind(booking.end)
        .bind(booking.start)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Overlap check failed: {e}")))?;

        let has_conflict: bool = conflict
            .try_get::<i64, _>("conflict")
            .map(|v| v != 0)
            .map_err(|e| DomainError::database(format!("Failed to get conflict: {e}")))?;

        if has_conflict {
            return Err(DomainError::validation(
                "Item is already booked for this period",
            ));
        }

        // A decision only ever replaces WAITING; the guarded UPDATE keeps a
        // concurrent writer from overwriting a decided status.
        let updated =
            sqlx::query("UPDATE bookings SET status = 'APPROVED' WHERE id = ? AND status = 'WAITING'")
                .bind(booking.id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database(format!("Failed to approve booking: {e}")))?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::validation(format!(
                "Booking {booking_id} has already been decided"
            )));
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {e}")))?;

        booking.status = BookingStatus::Approved;
        Ok(booking)
    }

    async fn update_status(
        &self,
        booking_id: i64,
        status: BookingStatus,
    ) -> DomainResult<Booking> {
        let result = sqlx::query("UPDATE bookings SET status = ? WHERE id = ? AND status = 'WAITING'")
            .bind(status.as_str())
            .bind(booking_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update booking: {e}")))?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(booking_id).await? {
                Some(_) => Err(DomainError::validation(format!(
                    "Booking {booking_id} has already been decided"
                ))),
                None => Err(DomainError::not_found("Booking", booking_id)),
            };
        }

        self.find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))
    }

    async fn find_for_booker(
        &self,
        booker_id: i64,
        filter: StateFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        self.list_filtered("b.booker_id = ?", booker_id, filter, now)
            .await
    }

    async fn find_for_owner(
        &self,
        owner_id: i64,
        filter: StateFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        self.list_filtered("i.owner_id = ?", owner_id, filter, now)
            .await
    }

    async fn has_qualifying_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        // end_date strictly before now: a running rental does not qualify
        let row = sqlx::query(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE item_id = ?
                  AND booker_id = ?
                  AND status = 'APPROVED'
                  AND end_date < ?
            ) AS qualifies
            "#,
        )
        .bind(item_id)
        .bind(booker_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Database query failed: {e}")))?;

        row.try_get::<i64, _>("qualifies")
            .map(|v| v != 0)
            .map_err(|e| DomainError::database(format!("Failed to get qualifies: {e}")))
    }
}
