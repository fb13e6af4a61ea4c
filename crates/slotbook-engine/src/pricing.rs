//! # Price Aggregator
//!
//! Combines the pure pricing evaluator, the addon catalog and the tax
//! cascade into a single itemized breakdown.
//!
//! ## Aggregation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      calculate_price                                    │
//! │                                                                         │
//! │  1. Load item            (NotFound / Inactive / inactive lineage)       │
//! │  2. Evaluate pricing     (Pricing::quote, pure)                         │
//! │  3. Load selected addons (only active ones belonging to this item)      │
//! │  4. Grand total          = item net + addons total                      │
//! │  5. Resolve tax cascade  (item → subcategory → category)                │
//! │  6. Tax amount           = grand total × rate (half-up, integer cents)  │
//! │  7. Final payable        = grand total + tax                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax applies to the whole grand total: addons share the item's
//! effective treatment rather than carrying their own.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::lineage::ensure_lineage_active;
use crate::tax::TaxResolver;
use slotbook_core::{AppliedRule, EffectiveTax, Money, PriceContext, TimeOfDay};
use slotbook_db::Database;

/// Parameters for a price calculation.
#[derive(Debug, Clone, Default)]
pub struct PriceRequest {
    pub item_id: String,
    /// Selected addon ids; unknown, inactive or foreign ids are ignored.
    pub addon_ids: Vec<String>,
    /// Required for TIERED pricing.
    pub duration_minutes: Option<u32>,
    /// Required for DYNAMIC pricing.
    pub at: Option<TimeOfDay>,
}

/// One charged addon in a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddonLine {
    pub addon_id: String,
    pub name: String,
    pub price: Money,
}

/// Resolved tax portion of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxLine {
    pub applicable: bool,
    /// Basis points; 0 when not applicable.
    pub rate_bps: u32,
    pub amount: Money,
}

impl TaxLine {
    fn from_effective(tax: EffectiveTax, subtotal: Money) -> Self {
        let amount = if tax.applicable {
            subtotal.calculate_tax(tax.rate)
        } else {
            Money::zero()
        };
        TaxLine {
            applicable: tax.applicable,
            rate_bps: tax.rate.bps(),
            amount,
        }
    }
}

/// Itemized result of a price calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub item_id: String,
    pub item_name: String,
    /// Which pricing variant produced the item price.
    pub rule: AppliedRule,
    pub base_price: Money,
    pub discount: Money,
    /// Item price after discount, floored at zero.
    pub item_net: Money,
    pub addons: Vec<AddonLine>,
    pub addons_total: Money,
    /// item_net + addons_total; the tax base.
    pub grand_total: Money,
    pub tax: TaxLine,
    /// grand_total + tax.amount; what the customer pays.
    pub final_payable: Money,
}

/// Price aggregation service.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    db: Database,
    tax: TaxResolver,
}

impl PricingEngine {
    /// Creates a new PricingEngine.
    pub fn new(db: Database) -> Self {
        let tax = TaxResolver::new(db.clone());
        PricingEngine { db, tax }
    }

    /// Calculates the full itemized price for an item plus selected addons.
    ///
    /// Deterministic for a fixed catalog state: same request, same
    /// breakdown.
    pub async fn calculate_price(&self, req: &PriceRequest) -> EngineResult<PriceBreakdown> {
        let item = self
            .db
            .items()
            .get_by_id(&req.item_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Item", &req.item_id))?;

        if !item.is_active {
            return Err(EngineError::inactive("Item", &item.id));
        }
        ensure_lineage_active(&self.db, &item.parent).await?;

        let ctx = PriceContext {
            duration_minutes: req.duration_minutes,
            at: req.at,
        };
        let quote = item.pricing.quote(&ctx)?;

        let addons = self
            .db
            .addons()
            .get_active_for_item(&item.id, &req.addon_ids)
            .await?;
        let addon_lines: Vec<AddonLine> = addons
            .iter()
            .map(|a| AddonLine {
                addon_id: a.id.clone(),
                name: a.name.clone(),
                price: a.price(),
            })
            .collect();
        let addons_total: Money = addon_lines.iter().map(|l| l.price).sum();

        let grand_total = quote.net() + addons_total;

        let effective = self.tax.resolve(&item).await?;
        let tax = TaxLine::from_effective(effective, grand_total);

        let final_payable = grand_total + tax.amount;

        debug!(
            item_id = %item.id,
            rule = ?quote.rule,
            grand_total = %grand_total,
            tax = %tax.amount,
            "Price aggregated"
        );
        info!(item_id = %item.id, final_payable = %final_payable, "Price calculated");

        Ok(PriceBreakdown {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            rule: quote.rule,
            base_price: quote.base_price,
            discount: quote.discount,
            item_net: quote.net(),
            addons: addon_lines,
            addons_total,
            grand_total,
            tax,
            final_payable,
        })
    }
}
