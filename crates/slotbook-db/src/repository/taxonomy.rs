//! # Taxonomy Repositories
//!
//! Database operations for the two catalog hierarchy levels:
//! categories and the subcategories nested under them.
//!
//! Both rows carry the same tri-state tax columns as items; the
//! cascade walks them in `slotbook-engine`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use slotbook_core::{Category, Subcategory, TaxPolicy};

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    description: Option<String>,
    tax_applicable: Option<bool>,
    tax_rate_bps: Option<u32>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            tax_policy: TaxPolicy::from_columns(row.tax_applicable, row.tax_rate_bps),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, tax_applicable, tax_rate_bps,
                   is_active, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    /// Lists active categories ordered by name.
    pub async fn list_active(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, tax_applicable, tax_rate_bps,
                   is_active, created_at, updated_at
            FROM categories
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Inserts a new category.
    ///
    /// Category names are globally unique; a duplicate surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn insert(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, name = %category.name, "Inserting category");

        let (tax_applicable, tax_rate_bps) = category.tax_policy.to_columns();

        sqlx::query(
            r#"
            INSERT INTO categories (
                id, name, description, tax_applicable, tax_rate_bps,
                is_active, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(tax_applicable)
        .bind(tax_rate_bps)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Soft-deletes a category (sets is_active = 0).
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting category");

        let result = sqlx::query(
            "UPDATE categories SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }
        Ok(())
    }
}

// =============================================================================
// Subcategories
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct SubcategoryRow {
    id: String,
    category_id: String,
    name: String,
    description: Option<String>,
    tax_applicable: Option<bool>,
    tax_rate_bps: Option<u32>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SubcategoryRow> for Subcategory {
    fn from(row: SubcategoryRow) -> Self {
        Subcategory {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            tax_policy: TaxPolicy::from_columns(row.tax_applicable, row.tax_rate_bps),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for subcategory database operations.
#[derive(Debug, Clone)]
pub struct SubcategoryRepository {
    pool: SqlitePool,
}

impl SubcategoryRepository {
    /// Creates a new SubcategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SubcategoryRepository { pool }
    }

    /// Gets a subcategory by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Subcategory>> {
        let row = sqlx::query_as::<_, SubcategoryRow>(
            r#"
            SELECT id, category_id, name, description, tax_applicable, tax_rate_bps,
                   is_active, created_at, updated_at
            FROM subcategories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Subcategory::from))
    }

    /// Lists active subcategories of a category, ordered by name.
    pub async fn list_active_by_category(&self, category_id: &str) -> DbResult<Vec<Subcategory>> {
        let rows = sqlx::query_as::<_, SubcategoryRow>(
            r#"
            SELECT id, category_id, name, description, tax_applicable, tax_rate_bps,
                   is_active, created_at, updated_at
            FROM subcategories
            WHERE category_id = ?1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Subcategory::from).collect())
    }

    /// Inserts a new subcategory.
    ///
    /// Names are unique within a category.
    pub async fn insert(&self, subcategory: &Subcategory) -> DbResult<()> {
        debug!(
            id = %subcategory.id,
            category_id = %subcategory.category_id,
            "Inserting subcategory"
        );

        let (tax_applicable, tax_rate_bps) = subcategory.tax_policy.to_columns();

        sqlx::query(
            r#"
            INSERT INTO subcategories (
                id, category_id, name, description, tax_applicable, tax_rate_bps,
                is_active, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&subcategory.id)
        .bind(&subcategory.category_id)
        .bind(&subcategory.name)
        .bind(&subcategory.description)
        .bind(tax_applicable)
        .bind(tax_rate_bps)
        .bind(subcategory.is_active)
        .bind(subcategory.created_at)
        .bind(subcategory.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Soft-deletes a subcategory (sets is_active = 0).
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting subcategory");

        let result = sqlx::query(
            "UPDATE subcategories SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Subcategory", id));
        }
        Ok(())
    }
}
