//! # Addon Repository
//!
//! Database operations for item addons.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use slotbook_core::Addon;

#[derive(Debug, sqlx::FromRow)]
struct AddonRow {
    id: String,
    item_id: String,
    name: String,
    price_cents: i64,
    is_mandatory: bool,
    addon_group: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AddonRow> for Addon {
    fn from(row: AddonRow) -> Self {
        Addon {
            id: row.id,
            item_id: row.item_id,
            name: row.name,
            price_cents: row.price_cents,
            is_mandatory: row.is_mandatory,
            group: row.addon_group,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for addon database operations.
#[derive(Debug, Clone)]
pub struct AddonRepository {
    pool: SqlitePool,
}

impl AddonRepository {
    /// Creates a new AddonRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AddonRepository { pool }
    }

    /// Gets an addon by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Addon>> {
        let row = sqlx::query_as::<_, AddonRow>(
            r#"
            SELECT id, item_id, name, price_cents, is_mandatory, addon_group,
                   is_active, created_at, updated_at
            FROM addons
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Addon::from))
    }

    /// Lists all active addons of an item, ordered by name.
    pub async fn list_active_for_item(&self, item_id: &str) -> DbResult<Vec<Addon>> {
        let rows = sqlx::query_as::<_, AddonRow>(
            r#"
            SELECT id, item_id, name, price_cents, is_mandatory, addon_group,
                   is_active, created_at, updated_at
            FROM addons
            WHERE item_id = ?1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Addon::from).collect())
    }

    /// Fetches the requested addons, keeping only those that are active
    /// AND belong to the given item.
    ///
    /// Addons of other items and inactive addons are silently dropped;
    /// the price aggregator charges only for what this returns.
    pub async fn get_active_for_item(&self, item_id: &str, ids: &[String]) -> DbResult<Vec<Addon>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        debug!(item_id = %item_id, requested = ids.len(), "Fetching addons for item");

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT id, item_id, name, price_cents, is_mandatory, addon_group,
                   is_active, created_at, updated_at
            FROM addons
            WHERE item_id = "#,
        );
        builder.push_bind(item_id);
        builder.push(" AND is_active = 1 AND id IN (");

        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<AddonRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Addon::from).collect())
    }

    /// Inserts a new addon.
    ///
    /// Addon names are unique per item; duplicates surface as
    /// [`DbError::UniqueViolation`].
    pub async fn insert(&self, addon: &Addon) -> DbResult<()> {
        debug!(id = %addon.id, item_id = %addon.item_id, "Inserting addon");

        sqlx::query(
            r#"
            INSERT INTO addons (
                id, item_id, name, price_cents, is_mandatory, addon_group,
                is_active, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&addon.id)
        .bind(&addon.item_id)
        .bind(&addon.name)
        .bind(addon.price_cents)
        .bind(addon.is_mandatory)
        .bind(&addon.group)
        .bind(addon.is_active)
        .bind(addon.created_at)
        .bind(addon.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Soft-deletes an addon (sets is_active = 0).
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting addon");

        let result = sqlx::query(
            "UPDATE addons SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Addon", id));
        }
        Ok(())
    }
}
