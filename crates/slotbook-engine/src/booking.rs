//! # Availability & Booking Engine
//!
//! Slot listing, booking and cancellation against an item's weekly
//! availability template.
//!
//! ## book_slot Checklist
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    book_slot (fail-fast, in order)                      │
//! │                                                                         │
//! │  1. Input shape        times parse, start < end, date parses            │
//! │  2. Item exists        → NotFound                                       │
//! │  3. Item active        → Inactive                                       │
//! │  4. Item bookable      → NotBookable                                    │
//! │  5. Template present   → NoAvailability                                 │
//! │  6. Lineage active     → Inactive (ancestor)                            │
//! │  7. Day open           → DayNotAvailable                                │
//! │  8. Slot in template   → SlotNotInTemplate (exact match only)           │
//! │  9. No live overlap    → SlotTaken                                      │
//! │ 10. INSERT             unique index race loss → SlotTaken               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 9 uses half-open interval overlap, so back-to-back slots
//! (10:00-11:00 then 11:00-12:00) never conflict. Step 10 is the
//! concurrency backstop: when two requests pass step 9 together, the
//! database's partial unique index rejects the second insert.

use chrono::{Datelike, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::lineage::ensure_lineage_active;
use slotbook_core::validation::{parse_date, require};
use slotbook_core::{Booking, BookingStatus, Item, TimeOfDay, TimeSlot, ValidationError, Weekday};
use slotbook_db::{Database, DbError};

/// Parameters for booking a slot.
///
/// Date and times arrive as text (`YYYY-MM-DD`, `HH:MM`) and are parsed
/// here; malformed input is a [`ValidationError`], not a panic.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub item_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub customer_name: Option<String>,
}

/// Slot listing, booking and cancellation service.
#[derive(Debug, Clone)]
pub struct BookingEngine {
    db: Database,
}

impl BookingEngine {
    /// Creates a new BookingEngine.
    pub fn new(db: Database) -> Self {
        BookingEngine { db }
    }

    /// Lists the free template slots of an item on a date.
    ///
    /// A date outside the item's open days yields an empty list, not an
    /// error: "closed today" is a normal answer.
    pub async fn available_slots(&self, item_id: &str, date: &str) -> EngineResult<Vec<TimeSlot>> {
        let date = parse_date("date", date)?;
        let item = self.load_bookable(item_id).await?;
        ensure_lineage_active(&self.db, &item.parent).await?;

        // A bookable row without a template can only come from hand-edited
        // data; for listing purposes it is simply never open.
        let availability = match &item.availability {
            Some(availability) => availability,
            None => {
                debug!(item_id = %item.id, "Bookable item has no template, no slots");
                return Ok(Vec::new());
            }
        };

        if !availability.is_open_on(Weekday::from(date.weekday())) {
            debug!(item_id = %item.id, %date, "Item not open on this day");
            return Ok(Vec::new());
        }

        let booked = self.db.bookings().find_booked(&item.id, date).await?;

        let free: Vec<TimeSlot> = availability
            .time_slots
            .iter()
            .filter(|slot| !booked.iter().any(|b| b.slot().overlaps(slot)))
            .copied()
            .collect();

        debug!(
            item_id = %item.id,
            %date,
            template = availability.time_slots.len(),
            free = free.len(),
            "Computed available slots"
        );
        Ok(free)
    }

    /// Books a template slot for an item.
    ///
    /// Runs the full fail-fast checklist; see the module docs for the
    /// exact order. Returns the stored booking on success.
    pub async fn book_slot(&self, req: &BookingRequest) -> EngineResult<Booking> {
        require("item_id", &req.item_id)?;
        let start: TimeOfDay = req.start_time.parse()?;
        let end: TimeOfDay = req.end_time.parse()?;
        if start >= end {
            return Err(ValidationError::InvertedInterval { start, end }.into());
        }
        let date = parse_date("date", &req.date)?;

        let item = self.load_bookable(&req.item_id).await?;
        let availability = item.availability.clone().ok_or(EngineError::NoAvailability {
            id: item.id.clone(),
        })?;
        ensure_lineage_active(&self.db, &item.parent).await?;

        let day = Weekday::from(date.weekday());
        if !availability.is_open_on(day) {
            return Err(ValidationError::DayNotAvailable { day }.into());
        }

        let slot = TimeSlot::new(start, end);
        // Exact template membership: a request for 09:15-09:45 inside a
        // 09:00-10:00 slot is rejected, never silently widened.
        if !availability.has_slot(&slot) {
            return Err(ValidationError::SlotNotInTemplate { start, end }.into());
        }

        let booked = self.db.bookings().find_booked(&item.id, date).await?;
        if booked.iter().any(|b| b.slot().overlaps(&slot)) {
            return Err(EngineError::SlotTaken {
                item_id: item.id.clone(),
                date,
                slot,
            });
        }

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            date,
            start_time: start,
            end_time: end,
            customer_name: req.customer_name.clone(),
            status: BookingStatus::Booked,
            created_at: Utc::now(),
        };

        match self.db.bookings().insert(&booking).await {
            Ok(()) => {}
            // Lost the race: another request committed the same live slot
            // between our overlap check and this insert.
            Err(DbError::UniqueViolation { .. }) => {
                return Err(EngineError::SlotTaken {
                    item_id: item.id,
                    date,
                    slot,
                });
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            booking_id = %booking.id,
            item_id = %booking.item_id,
            %date,
            slot = %slot,
            "Slot booked"
        );
        Ok(booking)
    }

    /// Cancels a booking, freeing its slot.
    ///
    /// Cancellation is not idempotent: cancelling twice is an
    /// [`EngineError::AlreadyCancelled`] so callers notice double
    /// submissions.
    pub async fn cancel(&self, booking_id: &str) -> EngineResult<Booking> {
        let mut booking = self
            .db
            .bookings()
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Booking", booking_id))?;

        if booking.status == BookingStatus::Cancelled {
            return Err(EngineError::AlreadyCancelled {
                id: booking_id.to_string(),
            });
        }

        self.db
            .bookings()
            .set_status(booking_id, BookingStatus::Cancelled)
            .await?;
        booking.status = BookingStatus::Cancelled;

        info!(booking_id = %booking.id, item_id = %booking.item_id, "Booking cancelled");
        Ok(booking)
    }

    /// Loads an item and checks it is active and bookable.
    async fn load_bookable(&self, item_id: &str) -> EngineResult<Item> {
        let item = self
            .db
            .items()
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Item", item_id))?;

        if !item.is_active {
            return Err(EngineError::inactive("Item", item_id));
        }
        if !item.is_bookable {
            return Err(EngineError::NotBookable {
                id: item_id.to_string(),
            });
        }

        Ok(item)
    }
}
