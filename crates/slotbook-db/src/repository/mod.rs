//! # Repository Module
//!
//! Database repository implementations for Slotbook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Engine Service                                                         │
//! │       │                                                                 │
//! │       │  db.items().get_by_id("uuid")                                   │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ItemRepository                                                         │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── insert(&self, item)                                                │
//! │  └── soft_delete(&self, id)                                             │
//! │       │                                                                 │
//! │       │  SQL query + JSON column decoding                               │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test against an in-memory database                          │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Item storage with pricing/availability JSON
//! - [`taxonomy::CategoryRepository`] / [`taxonomy::SubcategoryRepository`] -
//!   Catalog hierarchy levels
//! - [`addon::AddonRepository`] - Item addons
//! - [`booking::BookingRepository`] - Bookings and slot conflicts

pub mod addon;
pub mod booking;
pub mod item;
pub mod taxonomy;
