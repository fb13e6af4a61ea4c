//! Catalog lineage eligibility check.
//!
//! An item is only sellable/bookable while its whole ancestry is active:
//! deactivating a category or subcategory takes everything below it off
//! the market without touching the child rows.

use crate::error::{EngineError, EngineResult};
use slotbook_core::ItemParent;
use slotbook_db::Database;

/// Ensures the item's parent (and grandparent, for subcategory-parented
/// items) exists and is active.
pub(crate) async fn ensure_lineage_active(db: &Database, parent: &ItemParent) -> EngineResult<()> {
    let category_id = match parent {
        ItemParent::Category(cat_id) => cat_id.clone(),
        ItemParent::Subcategory(sub_id) => {
            let sub = db
                .subcategories()
                .get_by_id(sub_id)
                .await?
                .ok_or_else(|| EngineError::not_found("Subcategory", sub_id))?;
            if !sub.is_active {
                return Err(EngineError::inactive("Subcategory", sub_id));
            }
            sub.category_id
        }
    };

    let category = db
        .categories()
        .get_by_id(&category_id)
        .await?
        .ok_or_else(|| EngineError::not_found("Category", &category_id))?;
    if !category.is_active {
        return Err(EngineError::inactive("Category", &category_id));
    }

    Ok(())
}
