//! # Domain Types
//!
//! Core entities of the Slotbook catalog.
//!
//! ## Entity Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Entities                            │
//! │                                                                     │
//! │   Category ──────┬─────────────► Item ◄──── Addon (many per item)  │
//! │       │          │ (direct)       │                                 │
//! │       ▼          │                ▼                                 │
//! │   Subcategory ───┘           Booking (by id, weak reference)       │
//! │              (via subcategory)                                      │
//! │                                                                     │
//! │   Every level carries a tri-state TaxPolicy:                        │
//! │     Applicable(rate) │ Exempt │ Inherit                             │
//! │   and an is_active soft-delete flag.                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An item belongs to exactly ONE of category / subcategory; the
//! [`ItemParent`] enum makes that invariant structural rather than a
//! runtime check over two nullable references.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::pricing::Pricing;
use crate::schedule::{Availability, TimeOfDay, TimeSlot};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1800 bps = 18%. Integer bps keep
/// tax arithmetic exact until the single explicit rounding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Tax Policy (tri-state)
// =============================================================================

/// Tri-state tax flag carried by items, subcategories and categories.
///
/// A plain boolean cannot distinguish "explicitly untaxed" from "not
/// configured here"; the cascade needs that distinction so a level can
/// opt OUT under a taxed ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxPolicy {
    /// Taxed at this rate; stops the cascade.
    Applicable(TaxRate),
    /// Explicitly untaxed; stops the cascade even under taxed ancestors.
    Exempt,
    /// Not configured at this level; defer to the parent.
    Inherit,
}

impl TaxPolicy {
    /// The decisive answer this level gives, if any.
    ///
    /// `None` means "keep walking up the chain".
    pub fn decide(&self) -> Option<EffectiveTax> {
        match self {
            TaxPolicy::Applicable(rate) => Some(EffectiveTax {
                applicable: true,
                rate: *rate,
            }),
            TaxPolicy::Exempt => Some(EffectiveTax::exempt()),
            TaxPolicy::Inherit => None,
        }
    }

    /// Rebuilds the policy from the two nullable storage columns.
    pub fn from_columns(applicable: Option<bool>, rate_bps: Option<u32>) -> Self {
        match applicable {
            Some(true) => TaxPolicy::Applicable(TaxRate::from_bps(rate_bps.unwrap_or(0))),
            Some(false) => TaxPolicy::Exempt,
            None => TaxPolicy::Inherit,
        }
    }

    /// Splits the policy into the two nullable storage columns.
    pub fn to_columns(&self) -> (Option<bool>, Option<u32>) {
        match self {
            TaxPolicy::Applicable(rate) => (Some(true), Some(rate.bps())),
            TaxPolicy::Exempt => (Some(false), None),
            TaxPolicy::Inherit => (None, None),
        }
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy::Inherit
    }
}

/// The resolved outcome of the tax cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveTax {
    pub applicable: bool,
    pub rate: TaxRate,
}

impl EffectiveTax {
    /// The cascade default: no tax.
    pub const fn exempt() -> Self {
        EffectiveTax {
            applicable: false,
            rate: TaxRate::zero(),
        }
    }
}

// =============================================================================
// Category / Subcategory
// =============================================================================

/// Top-level catalog node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub tax_policy: TaxPolicy,
    /// Soft-delete flag.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Second-level catalog node; always belongs to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub tax_policy: TaxPolicy,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Item
// =============================================================================

/// The parent of an item: exactly one of category or subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "parent_type", content = "parent_id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemParent {
    Category(String),
    Subcategory(String),
}

impl ItemParent {
    /// The direct category id, if the item hangs off a category.
    pub fn category_id(&self) -> Option<&str> {
        match self {
            ItemParent::Category(id) => Some(id),
            ItemParent::Subcategory(_) => None,
        }
    }

    /// The subcategory id, if the item hangs off a subcategory.
    pub fn subcategory_id(&self) -> Option<&str> {
        match self {
            ItemParent::Category(_) => None,
            ItemParent::Subcategory(id) => Some(id),
        }
    }
}

/// A bookable or purchasable catalog item.
///
/// Owns its pricing config and availability template by value; bookings
/// reference items by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,

    #[serde(flatten)]
    pub parent: ItemParent,

    pub tax_policy: TaxPolicy,
    pub pricing: Pricing,

    /// Whether the item exposes time-slot bookings.
    pub is_bookable: bool,

    /// Weekly template; required iff `is_bookable`.
    pub availability: Option<Availability>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Validates the parts of an item the pricing/booking core depends on:
    /// pricing config shape and, for bookable items, the availability
    /// template.
    pub fn validate(&self) -> ValidationResult<()> {
        self.pricing.validate()?;

        match (&self.availability, self.is_bookable) {
            (Some(availability), _) => availability.validate(),
            (None, true) => Err(ValidationError::Required {
                field: "availability".to_string(),
            }),
            (None, false) => Ok(()),
        }
    }
}

// =============================================================================
// Addon
// =============================================================================

/// An optional extra belonging to exactly one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub id: String,
    pub item_id: String,
    pub name: String,
    /// Price in cents, never negative.
    pub price_cents: i64,
    /// Mandatory addons are pre-selected by the presentation layer.
    pub is_mandatory: bool,
    /// Optional grouping label ("Extras", "Equipment", ...).
    pub group: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Addon {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Booking
// =============================================================================

/// The lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Live booking; participates in conflict checks.
    Booked,
    /// Cancelled; the slot is free again.
    Cancelled,
}

/// A booked slot on a calendar day.
///
/// References the item by id only: deactivating an item never
/// retroactively invalidates its bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub item_id: String,
    /// Calendar day, no time component.
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub customer_name: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The booked interval as a half-open slot.
    #[inline]
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{TimeOfDay, Weekday};

    fn base_item(pricing: Pricing) -> Item {
        let now = Utc::now();
        Item {
            id: "item-1".to_string(),
            name: "Kayak Session".to_string(),
            description: None,
            parent: ItemParent::Category("cat-1".to_string()),
            tax_policy: TaxPolicy::Inherit,
            pricing,
            is_bookable: false,
            availability: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_tax_rate_conversions() {
        let rate = TaxRate::from_bps(1825);
        assert_eq!(rate.bps(), 1825);
        assert!((rate.percentage() - 18.25).abs() < 0.001);

        assert_eq!(TaxRate::from_percentage(18.25).bps(), 1825);
        assert!(TaxRate::default().is_zero());
    }

    #[test]
    fn test_tax_policy_decide() {
        let taxed = TaxPolicy::Applicable(TaxRate::from_bps(1800));
        assert_eq!(
            taxed.decide(),
            Some(EffectiveTax {
                applicable: true,
                rate: TaxRate::from_bps(1800)
            })
        );

        assert_eq!(TaxPolicy::Exempt.decide(), Some(EffectiveTax::exempt()));
        assert_eq!(TaxPolicy::Inherit.decide(), None);
    }

    #[test]
    fn test_tax_policy_column_round_trip() {
        for policy in [
            TaxPolicy::Applicable(TaxRate::from_bps(500)),
            TaxPolicy::Exempt,
            TaxPolicy::Inherit,
        ] {
            let (applicable, bps) = policy.to_columns();
            assert_eq!(TaxPolicy::from_columns(applicable, bps), policy);
        }

        // Applicable with a missing rate defaults to 0%
        assert_eq!(
            TaxPolicy::from_columns(Some(true), None),
            TaxPolicy::Applicable(TaxRate::zero())
        );
    }

    #[test]
    fn test_item_parent_accessors() {
        let by_category = ItemParent::Category("cat-1".to_string());
        assert_eq!(by_category.category_id(), Some("cat-1"));
        assert_eq!(by_category.subcategory_id(), None);

        let by_subcategory = ItemParent::Subcategory("sub-1".to_string());
        assert_eq!(by_subcategory.category_id(), None);
        assert_eq!(by_subcategory.subcategory_id(), Some("sub-1"));
    }

    #[test]
    fn test_bookable_item_requires_template() {
        let mut item = base_item(Pricing::Static {
            price: Money::from_cents(1000),
        });
        assert!(item.validate().is_ok());

        item.is_bookable = true;
        assert!(item.validate().is_err());

        item.availability = Some(Availability {
            days: vec![Weekday::Mon],
            time_slots: vec![TimeSlot::new(
                TimeOfDay::new(9, 0).unwrap(),
                TimeOfDay::new(10, 0).unwrap(),
            )],
        });
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_item_validate_checks_pricing_shape() {
        let item = base_item(Pricing::Tiered { tiers: vec![] });
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_addon_price() {
        let now = Utc::now();
        let addon = Addon {
            id: "addon-1".to_string(),
            item_id: "item-1".to_string(),
            name: "Photo Package".to_string(),
            price_cents: 2500,
            is_mandatory: false,
            group: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(addon.price(), Money::from_cents(2500));
    }

    #[test]
    fn test_booking_slot() {
        let booking = Booking {
            id: "b-1".to_string(),
            item_id: "item-1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            start_time: TimeOfDay::new(9, 0).unwrap(),
            end_time: TimeOfDay::new(10, 0).unwrap(),
            customer_name: Some("Ada".to_string()),
            status: BookingStatus::Booked,
            created_at: Utc::now(),
        };

        let other = TimeSlot::new(TimeOfDay::new(9, 30).unwrap(), TimeOfDay::new(10, 30).unwrap());
        assert!(booking.slot().overlaps(&other));
    }
}
