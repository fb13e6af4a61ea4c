//! # slotbook-engine: Service Layer for Slotbook
//!
//! Orchestrates the pure logic in `slotbook-core` over the storage in
//! `slotbook-db`. This is the crate callers talk to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Slotbook Service Layer                              │
//! │                                                                         │
//! │  Caller (HTTP handler, CLI, test)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 slotbook-engine (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────────┐   │   │
//! │  │  │PricingEngine │ │BookingEngine │ │   CatalogService     │   │   │
//! │  │  │calculate_    │ │available_    │ │ create_* /           │   │   │
//! │  │  │price         │ │slots         │ │ deactivate_*         │   │   │
//! │  │  │              │ │book_slot     │ │                      │   │   │
//! │  │  │  TaxResolver │ │cancel        │ │                      │   │   │
//! │  │  └──────┬───────┘ └──────┬───────┘ └──────────┬───────────┘   │   │
//! │  │         │                │                    │               │   │
//! │  └─────────┼────────────────┼────────────────────┼───────────────┘   │
//! │            ▼                ▼                    ▼                   │
//! │     slotbook-core (pure)          slotbook-db (SQLite)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Price aggregation (item + addons + cascaded tax)
//! - [`booking`] - Slot availability, booking, cancellation
//! - [`tax`] - Tax cascade resolver (item → subcategory → category)
//! - [`catalog`] - Catalog entity creation and soft deletion
//! - [`error`] - Engine error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod catalog;
pub mod error;
mod lineage;
pub mod pricing;
pub mod tax;

// =============================================================================
// Re-exports
// =============================================================================

pub use booking::{BookingEngine, BookingRequest};
pub use catalog::{CatalogService, NewAddon, NewCategory, NewItem, NewSubcategory};
pub use error::{EngineError, EngineResult};
pub use pricing::{AddonLine, PriceBreakdown, PriceRequest, PricingEngine, TaxLine};
pub use tax::TaxResolver;
