//! # Error Types
//!
//! Domain-specific error types for slotbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  slotbook-core errors (this file)                                   │
//! │  ├── CoreError        - Pricing evaluation failures                 │
//! │  └── ValidationError  - Input / configuration validation failures   │
//! │                                                                     │
//! │  slotbook-db errors (separate crate)                                │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  slotbook-engine errors (separate crate)                            │
//! │  └── EngineError      - What the request handlers see               │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → EngineError → handler          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (durations, boundaries, fields)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::schedule::{TimeOfDay, Weekday};

// =============================================================================
// Core Error
// =============================================================================

/// Pricing evaluation errors.
///
/// These are the failures a well-formed pricing config can still produce
/// at evaluation time, because the *context* (duration, time of day) is
/// missing or matches no rule. Config *shape* problems are
/// [`ValidationError`]s and are caught at item creation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Tiered pricing was evaluated without a duration.
    #[error("duration is required for tiered pricing")]
    DurationRequired,

    /// Dynamic pricing was evaluated without a time of day.
    #[error("time is required for dynamic pricing")]
    TimeRequired,

    /// The requested duration exceeds every tier boundary.
    ///
    /// ## When This Occurs
    /// Tiers `[{up_to: 30}, {up_to: 60}]` asked to price a 90 minute
    /// session. The caller must either add a tier or shorten the request.
    #[error("no tier covers a duration of {duration} minutes")]
    NoTierForDuration { duration: u32 },

    /// The requested time of day falls outside every pricing window.
    #[error("item is not available at {at}")]
    NoWindowForTime { at: TimeOfDay },

    /// A validation failure (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input and configuration validation errors.
///
/// Raised when request fields are missing/malformed, or when a pricing
/// config or availability template violates its variant's shape rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., bad date or time string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A sequence that must not be empty is empty (tiers, windows, days).
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Tier boundaries must be strictly increasing once sorted.
    #[error("tier boundaries must be strictly increasing (duplicate up_to: {up_to})")]
    DuplicateTier { up_to: u32 },

    /// An interval ends before (or exactly when) it starts.
    #[error("interval must start before it ends ({start}..{end})")]
    InvertedInterval { start: TimeOfDay, end: TimeOfDay },

    /// The item's template has no slots on the requested weekday.
    #[error("item is not available on {day}")]
    DayNotAvailable { day: Weekday },

    /// Bookings snap to template slots; partial or shifted slots are rejected.
    #[error("slot {start}-{end} does not match the availability template")]
    SlotNotInTemplate { start: TimeOfDay, end: TimeOfDay },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
