//! # Booking Repository
//!
//! Database operations for bookings.
//!
//! ## Double-Booking Protection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │           Two Layers Against the Check-Then-Insert Race                 │
//! │                                                                         │
//! │  Request A                          Request B                           │
//! │     │  overlap check: free             │  overlap check: free           │
//! │     ▼                                  ▼                                │
//! │  INSERT booking ─── commits         INSERT booking ─── REJECTED         │
//! │                                        │                                │
//! │                 idx_bookings_live_slot │ (partial UNIQUE on             │
//! │                                        │  item, date, start, end        │
//! │                                        │  WHERE status = 'booked')      │
//! │                                        ▼                                │
//! │                                  DbError::UniqueViolation               │
//! │                                  → engine maps to SlotTaken             │
//! │                                                                         │
//! │  Bookings always snap to template slots, so two conflicting            │
//! │  intervals are always byte-identical — the index catches them all.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use slotbook_core::{Booking, BookingStatus, TimeOfDay};

/// Raw booking row; times are stored as `HH:MM` text and parsed into
/// [`TimeOfDay`] on the way out.
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: String,
    item_id: String,
    date: NaiveDate,
    start_time: String,
    end_time: String,
    customer_name: Option<String>,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DbError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let start_time: TimeOfDay = row
            .start_time
            .parse()
            .map_err(|_| DbError::corrupt("Booking", &row.id, "invalid start_time"))?;
        let end_time: TimeOfDay = row
            .end_time
            .parse()
            .map_err(|_| DbError::corrupt("Booking", &row.id, "invalid end_time"))?;

        Ok(Booking {
            id: row.id,
            item_id: row.item_id,
            date: row.date,
            start_time,
            end_time,
            customer_name: row.customer_name,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Gets a booking by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, item_id, date, start_time, end_time, customer_name,
                   status, created_at
            FROM bookings
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::try_from).transpose()
    }

    /// Returns all live (non-cancelled) bookings for an item on a date.
    ///
    /// This is the conflict set for both `available_slots` and
    /// `book_slot`; cancelled bookings never block a slot.
    pub async fn find_booked(&self, item_id: &str, date: NaiveDate) -> DbResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, item_id, date, start_time, end_time, customer_name,
                   status, created_at
            FROM bookings
            WHERE item_id = ?1 AND date = ?2 AND status = 'booked'
            ORDER BY start_time
            "#,
        )
        .bind(item_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        debug!(item_id = %item_id, date = %date, count = rows.len(), "Loaded live bookings");

        rows.into_iter().map(Booking::try_from).collect()
    }

    /// Inserts a new booking.
    ///
    /// A concurrent insert for the same live slot trips the partial
    /// unique index and surfaces as [`DbError::UniqueViolation`].
    pub async fn insert(&self, booking: &Booking) -> DbResult<()> {
        debug!(
            id = %booking.id,
            item_id = %booking.item_id,
            date = %booking.date,
            slot = %booking.slot(),
            "Inserting booking"
        );

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, item_id, date, start_time, end_time, customer_name,
                status, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.item_id)
        .bind(booking.date)
        .bind(booking.start_time.to_string())
        .bind(booking.end_time.to_string())
        .bind(&booking.customer_name)
        .bind(booking.status)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates the status of a booking.
    pub async fn set_status(&self, id: &str, status: BookingStatus) -> DbResult<()> {
        debug!(id = %id, ?status, "Updating booking status");

        let result = sqlx::query("UPDATE bookings SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Booking", id));
        }
        Ok(())
    }
}
