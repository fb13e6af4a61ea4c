//! # slotbook-db: Database Layer for Slotbook
//!
//! This crate provides database access for the Slotbook catalog/booking
//! backend. It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Slotbook Data Flow                                │
//! │                                                                         │
//! │  Engine Service (calculate_price, book_slot, ...)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   slotbook-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (item, addon, │    │  (embedded)  │  │   │
//! │  │   │               │    │  booking, ...)│    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ JSON columns  │    │ 001_init.sql │  │   │
//! │  │   │ WAL mode      │    │ ↔ core types  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (slotbook.db)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (item, taxonomy, addon, booking)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use slotbook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/slotbook.db")).await?;
//!
//! let item = db.items().get_by_id("item-uuid").await?;
//! let live = db.bookings().find_booked("item-uuid", date).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::addon::AddonRepository;
pub use repository::booking::BookingRepository;
pub use repository::item::ItemRepository;
pub use repository::taxonomy::{CategoryRepository, SubcategoryRepository};
