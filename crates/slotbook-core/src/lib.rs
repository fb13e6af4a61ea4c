//! # slotbook-core: Pure Business Logic for Slotbook
//!
//! This crate is the **heart** of the Slotbook catalog/booking backend.
//! It contains all pricing, tax and availability logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Slotbook Architecture                          │
//! │                                                                     │
//! │  HTTP handlers (out of scope here)                                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 slotbook-engine (services)                  │   │
//! │  │   calculate_price · available_slots · book_slot             │   │
//! │  └──────────────────────────┬──────────────────────────────────┘   │
//! │                             │                                       │
//! │  ┌──────────────────────────▼──────────────────────────────────┐   │
//! │  │              ★ slotbook-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐     │   │
//! │  │   │ pricing  │ │ schedule │ │  money   │ │  types   │     │   │
//! │  │   │ variants │ │ overlap  │ │ TaxRate  │ │ entities │     │   │
//! │  │   │evaluator │ │ template │ │ rounding │ │TaxPolicy │     │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘     │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └──────────────────────────┬──────────────────────────────────┘   │
//! │                             │                                       │
//! │  ┌──────────────────────────▼──────────────────────────────────┐   │
//! │  │               slotbook-db (Database Layer)                  │   │
//! │  │        SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Category, Subcategory, Item, Addon, Booking)
//!   and the tri-state tax policy
//! - [`pricing`] - Tagged pricing variants and the pure price evaluator
//! - [`schedule`] - Time-of-day, interval overlap, weekly availability
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation helpers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use slotbook_core::money::Money;
//! use slotbook_core::types::TaxRate;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(18_000); // 180.00
//!
//! // 18% tax on the subtotal
//! let rate = TaxRate::from_bps(1800);
//! let tax = subtotal.calculate_tax(rate);
//! assert_eq!(tax.cents(), 3_240);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod schedule;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use slotbook_core::Money` instead of
// `use slotbook_core::money::Money`.

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::{AppliedRule, Discount, PriceContext, Pricing, Quote, Tier, Window};
pub use schedule::{Availability, TimeOfDay, TimeSlot, Weekday};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length for entity display names (categories, items, addons).
///
/// ## Business Reason
/// Keeps names printable on receipts and list views. Can be made
/// configurable per deployment in future versions.
pub const MAX_NAME_LEN: usize = 200;

/// Percentages (tax rates, percent discounts) are basis points;
/// anything above 100% is a data entry error.
pub const MAX_PERCENT_BPS: u32 = 10_000;
