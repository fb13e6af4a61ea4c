//! # Item Repository
//!
//! Database operations for catalog items.
//!
//! ## Storage Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Item Row ↔ Domain Mapping                            │
//! │                                                                         │
//! │  items table                          Item (slotbook-core)              │
//! │  ──────────────                       ─────────────────────             │
//! │  category_id / subcategory_id   ──►   ItemParent enum (exactly one)    │
//! │  tax_applicable + tax_rate_bps  ──►   TaxPolicy tri-state              │
//! │  pricing (JSON text)            ──►   Pricing tagged variant           │
//! │  availability (JSON text)       ──►   Availability template            │
//! │                                                                         │
//! │  A row that fails any of these decodes is reported as                  │
//! │  DbError::Corrupt, not silently skipped.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use slotbook_core::{Availability, Item, ItemParent, Pricing, TaxPolicy};

/// Raw item row as stored in SQLite.
///
/// Decoded in two steps: sqlx maps columns onto this struct, then
/// `TryFrom` assembles the domain [`Item`] (JSON parsing, parent enum,
/// tri-state tax flag).
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: String,
    name: String,
    description: Option<String>,
    category_id: Option<String>,
    subcategory_id: Option<String>,
    tax_applicable: Option<bool>,
    tax_rate_bps: Option<u32>,
    pricing: String,
    is_bookable: bool,
    availability: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = DbError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let parent = match (&row.category_id, &row.subcategory_id) {
            (Some(cat), None) => ItemParent::Category(cat.clone()),
            (None, Some(sub)) => ItemParent::Subcategory(sub.clone()),
            // Guarded by a CHECK constraint; decoding anyway for safety.
            _ => {
                return Err(DbError::corrupt(
                    "Item",
                    &row.id,
                    "expected exactly one of category_id/subcategory_id",
                ))
            }
        };

        let pricing: Pricing = serde_json::from_str(&row.pricing)
            .map_err(|e| DbError::corrupt("Item", &row.id, format!("pricing: {e}")))?;

        let availability: Option<Availability> = match &row.availability {
            Some(json) => Some(
                serde_json::from_str(json)
                    .map_err(|e| DbError::corrupt("Item", &row.id, format!("availability: {e}")))?,
            ),
            None => None,
        };

        Ok(Item {
            id: row.id,
            name: row.name,
            description: row.description,
            parent,
            tax_policy: TaxPolicy::from_columns(row.tax_applicable, row.tax_rate_bps),
            pricing,
            is_bookable: row.is_bookable,
            availability,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found (active or not)
    /// * `Ok(None)` - No such row
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT
                id, name, description,
                category_id, subcategory_id,
                tax_applicable, tax_rate_bps,
                pricing, is_bookable, availability,
                is_active, created_at, updated_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Item::try_from).transpose()
    }

    /// Lists active items under a category or subcategory.
    pub async fn list_active_by_parent(&self, parent: &ItemParent) -> DbResult<Vec<Item>> {
        let (column, parent_id) = match parent {
            ItemParent::Category(id) => ("category_id", id.as_str()),
            ItemParent::Subcategory(id) => ("subcategory_id", id.as_str()),
        };

        // `column` comes from the match above, never from input.
        let sql = format!(
            r#"
            SELECT
                id, name, description,
                category_id, subcategory_id,
                tax_applicable, tax_rate_bps,
                pricing, is_bookable, availability,
                is_active, created_at, updated_at
            FROM items
            WHERE {column} = ?1 AND is_active = 1
            ORDER BY name
            "#
        );

        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Item::try_from).collect()
    }

    /// Inserts a new item.
    ///
    /// Pricing and availability are stored as JSON text; the tri-state
    /// tax policy is split across the two nullable tax columns.
    pub async fn insert(&self, item: &Item) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting item");

        let parent_type = match item.parent {
            ItemParent::Category(_) => "CATEGORY",
            ItemParent::Subcategory(_) => "SUBCATEGORY",
        };
        let (tax_applicable, tax_rate_bps) = item.tax_policy.to_columns();

        let pricing = serde_json::to_string(&item.pricing)
            .map_err(|e| DbError::Internal(e.to_string()))?;
        let availability = item
            .availability
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO items (
                id, name, description,
                parent_type, category_id, subcategory_id,
                tax_applicable, tax_rate_bps,
                pricing, is_bookable, availability,
                is_active, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(parent_type)
        .bind(item.parent.category_id())
        .bind(item.parent.subcategory_id())
        .bind(tax_applicable)
        .bind(tax_rate_bps)
        .bind(pricing)
        .bind(item.is_bookable)
        .bind(availability)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Soft-deletes an item (sets is_active = 0).
    ///
    /// Existing bookings reference the item by id only and are unaffected.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting item");

        let result = sqlx::query(
            "UPDATE items SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }
        Ok(())
    }
}
