//! # Catalog Service
//!
//! Creation and deactivation of catalog entities with the invariants
//! enforced up front:
//!
//! - names are validated before any write
//! - parents must exist and be active at creation time
//! - item pricing configs and availability templates are shape-checked
//!   before they are stored, so readers never see a config that fails
//!   to evaluate
//!
//! Deactivation is always a soft delete; history (bookings, past
//! breakdowns) stays intact.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::lineage::ensure_lineage_active;
use slotbook_core::validation::{validate_name, validate_price_cents};
use slotbook_core::{
    Addon, Availability, Category, Item, ItemParent, Pricing, Subcategory, TaxPolicy,
};
use slotbook_db::Database;

// =============================================================================
// Input Types
// =============================================================================

/// Parameters for creating a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub tax_policy: TaxPolicy,
}

/// Parameters for creating a subcategory.
#[derive(Debug, Clone)]
pub struct NewSubcategory {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub tax_policy: TaxPolicy,
}

/// Parameters for creating an item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub parent: ItemParent,
    pub tax_policy: TaxPolicy,
    pub pricing: Pricing,
    pub is_bookable: bool,
    pub availability: Option<Availability>,
}

/// Parameters for creating an addon.
#[derive(Debug, Clone)]
pub struct NewAddon {
    pub item_id: String,
    pub name: String,
    pub price_cents: i64,
    pub is_mandatory: bool,
    pub group: Option<String>,
}

// =============================================================================
// Service
// =============================================================================

/// Catalog management service.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    /// Creates a new CatalogService.
    pub fn new(db: Database) -> Self {
        CatalogService { db }
    }

    /// Creates a category.
    pub async fn create_category(&self, new: NewCategory) -> EngineResult<Category> {
        validate_name("name", &new.name)?;

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            tax_policy: new.tax_policy,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.db.categories().insert(&category).await?;

        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Creates a subcategory under an existing, active category.
    pub async fn create_subcategory(&self, new: NewSubcategory) -> EngineResult<Subcategory> {
        validate_name("name", &new.name)?;

        let parent = self
            .db
            .categories()
            .get_by_id(&new.category_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Category", &new.category_id))?;
        if !parent.is_active {
            return Err(EngineError::inactive("Category", &new.category_id));
        }

        let now = Utc::now();
        let subcategory = Subcategory {
            id: Uuid::new_v4().to_string(),
            category_id: new.category_id,
            name: new.name,
            description: new.description,
            tax_policy: new.tax_policy,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.db.subcategories().insert(&subcategory).await?;

        info!(subcategory_id = %subcategory.id, name = %subcategory.name, "Subcategory created");
        Ok(subcategory)
    }

    /// Creates an item under an existing, active parent.
    ///
    /// The pricing config and (for bookable items) the availability
    /// template are validated here, at the write boundary.
    pub async fn create_item(&self, new: NewItem) -> EngineResult<Item> {
        validate_name("name", &new.name)?;
        ensure_lineage_active(&self.db, &new.parent).await?;

        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            parent: new.parent,
            tax_policy: new.tax_policy,
            pricing: new.pricing,
            is_bookable: new.is_bookable,
            availability: new.availability,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        item.validate()?;

        self.db.items().insert(&item).await?;

        info!(item_id = %item.id, name = %item.name, "Item created");
        Ok(item)
    }

    /// Creates an addon on an existing, active item.
    pub async fn create_addon(&self, new: NewAddon) -> EngineResult<Addon> {
        validate_name("name", &new.name)?;
        validate_price_cents("price_cents", new.price_cents)?;

        let item = self
            .db
            .items()
            .get_by_id(&new.item_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Item", &new.item_id))?;
        if !item.is_active {
            return Err(EngineError::inactive("Item", &new.item_id));
        }

        let now = Utc::now();
        let addon = Addon {
            id: Uuid::new_v4().to_string(),
            item_id: new.item_id,
            name: new.name,
            price_cents: new.price_cents,
            is_mandatory: new.is_mandatory,
            group: new.group,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.db.addons().insert(&addon).await?;

        info!(addon_id = %addon.id, item_id = %addon.item_id, "Addon created");
        Ok(addon)
    }

    /// Soft-deletes a category. Its subtree becomes ineligible for
    /// pricing and booking via the lineage check.
    pub async fn deactivate_category(&self, id: &str) -> EngineResult<()> {
        self.db.categories().soft_delete(id).await?;
        info!(category_id = %id, "Category deactivated");
        Ok(())
    }

    /// Soft-deletes a subcategory.
    pub async fn deactivate_subcategory(&self, id: &str) -> EngineResult<()> {
        self.db.subcategories().soft_delete(id).await?;
        info!(subcategory_id = %id, "Subcategory deactivated");
        Ok(())
    }

    /// Soft-deletes an item. Existing bookings are untouched.
    pub async fn deactivate_item(&self, id: &str) -> EngineResult<()> {
        self.db.items().soft_delete(id).await?;
        info!(item_id = %id, "Item deactivated");
        Ok(())
    }

    /// Soft-deletes an addon.
    pub async fn deactivate_addon(&self, id: &str) -> EngineResult<()> {
        self.db.addons().soft_delete(id).await?;
        info!(addon_id = %id, "Addon deactivated");
        Ok(())
    }
}
