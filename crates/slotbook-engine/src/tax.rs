//! # Tax Cascade Resolver
//!
//! Resolves the effective tax treatment of an item by walking the
//! catalog hierarchy.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tax Cascade                                       │
//! │                                                                         │
//! │  Item.tax_policy        ── Applicable/Exempt? ──► done                  │
//! │       │ Inherit                                                         │
//! │       ▼                                                                 │
//! │  Subcategory.tax_policy ── Applicable/Exempt? ──► done                  │
//! │       │ Inherit (or item hangs directly off a category)                 │
//! │       ▼                                                                 │
//! │  Category.tax_policy    ── Applicable/Exempt? ──► done                  │
//! │       │ Inherit                                                         │
//! │       ▼                                                                 │
//! │  Default: exempt, rate 0                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The walk is total: a missing or Inherit-all-the-way-up chain lands on
//! the exempt default instead of failing. Resolution is read-only and
//! does not care whether ancestors are active; eligibility is checked
//! separately before money changes hands.

use tracing::debug;

use crate::error::EngineResult;
use slotbook_core::{EffectiveTax, Item, ItemParent};
use slotbook_db::Database;

/// Resolves effective tax for items via the three-level cascade.
#[derive(Debug, Clone)]
pub struct TaxResolver {
    db: Database,
}

impl TaxResolver {
    /// Creates a new TaxResolver.
    pub fn new(db: Database) -> Self {
        TaxResolver { db }
    }

    /// Resolves the effective tax treatment for an item.
    ///
    /// Walks item → subcategory → category, taking the first level that
    /// gives a decisive answer. Never fails on gaps in the chain.
    pub async fn resolve(&self, item: &Item) -> EngineResult<EffectiveTax> {
        if let Some(tax) = item.tax_policy.decide() {
            debug!(item_id = %item.id, "Tax decided at item level");
            return Ok(tax);
        }

        let category_id = match &item.parent {
            ItemParent::Subcategory(sub_id) => {
                match self.db.subcategories().get_by_id(sub_id).await? {
                    Some(sub) => {
                        if let Some(tax) = sub.tax_policy.decide() {
                            debug!(item_id = %item.id, subcategory_id = %sub.id, "Tax decided at subcategory level");
                            return Ok(tax);
                        }
                        Some(sub.category_id)
                    }
                    None => None,
                }
            }
            ItemParent::Category(cat_id) => Some(cat_id.clone()),
        };

        if let Some(cat_id) = category_id {
            if let Some(category) = self.db.categories().get_by_id(&cat_id).await? {
                if let Some(tax) = category.tax_policy.decide() {
                    debug!(item_id = %item.id, category_id = %category.id, "Tax decided at category level");
                    return Ok(tax);
                }
            }
        }

        debug!(item_id = %item.id, "Tax cascade exhausted, defaulting to exempt");
        Ok(EffectiveTax::exempt())
    }
}
