//! # Engine Error Types
//!
//! Domain-level outcomes of the service layer. Lower layers feed in via
//! `From` impls:
//!
//! ```text
//! CoreError (missing context, no matching rule)  ──┐
//! ValidationError (bad input shape)              ──┼──► EngineError
//! DbError (storage failures)                     ──┘
//! ```
//!
//! Callers match on the variant, not on message strings.

use chrono::NaiveDate;
use thiserror::Error;

use slotbook_core::{CoreError, TimeSlot, ValidationError};
use slotbook_db::DbError;

/// Service-layer errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Entity (or one of its ancestors) is soft-deleted.
    ///
    /// Pricing and booking both require the whole lineage to be active;
    /// deactivating a category takes its entire subtree off the market.
    #[error("{entity} is inactive: {id}")]
    Inactive { entity: &'static str, id: String },

    /// Item exists but does not accept bookings.
    #[error("item is not bookable: {id}")]
    NotBookable { id: String },

    /// Bookable item has no availability template configured.
    #[error("item has no availability template: {id}")]
    NoAvailability { id: String },

    /// The requested slot conflicts with an existing live booking.
    ///
    /// Also produced when a concurrent request wins the race: the
    /// storage-level unique index rejects the second insert and the
    /// engine reports it the same way.
    #[error("slot {slot} on {date} is already booked for item {item_id}")]
    SlotTaken {
        item_id: String,
        date: NaiveDate,
        slot: TimeSlot,
    },

    /// Cancelling a booking that is already cancelled.
    #[error("booking already cancelled: {id}")]
    AlreadyCancelled { id: String },

    /// Pricing evaluation failed (missing context, no matching rule).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl EngineError {
    /// Creates a NotFound error.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates an Inactive error.
    pub fn inactive(entity: &'static str, id: impl Into<String>) -> Self {
        EngineError::Inactive {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
