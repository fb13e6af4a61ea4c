//! # Pricing Module
//!
//! Tagged pricing variants and the pure price evaluator.
//!
//! ## The Five Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  STATIC        fixed price                                          │
//! │  COMPLIMENTARY always zero (must carry no parameters)               │
//! │  DISCOUNTED    base price minus a flat or percentage discount       │
//! │  TIERED        price by duration bracket (needs ctx.duration)       │
//! │  DYNAMIC       price by time-of-day window (needs ctx.at)           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validate Once, Evaluate Many
//! Config shape is validated at item creation via [`Pricing::validate`];
//! the evaluator [`Pricing::quote`] only applies arithmetic and reports
//! context failures (missing duration/time, no matching rule).
//!
//! Serde does the shape enforcement the tag demands: an unknown `kind`
//! fails to parse, and `COMPLIMENTARY` is a unit variant so any pricing
//! parameters attached to it are rejected at the boundary.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::money::Money;
use crate::schedule::TimeOfDay;
use crate::MAX_PERCENT_BPS;

// =============================================================================
// Discount
// =============================================================================

/// A discount applied by the DISCOUNTED variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Discount {
    /// Fixed amount off, in cents.
    Flat(Money),
    /// Percentage off, in basis points (1000 = 10%).
    Percent(u32),
}

// =============================================================================
// Tiers & Windows
// =============================================================================

/// One duration bracket of a TIERED config: any duration up to and
/// including `up_to` minutes is charged `price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub up_to: u32,
    pub price: Money,
}

/// One time-of-day window of a DYNAMIC config.
///
/// Window bounds are inclusive on BOTH ends, unlike booking slots which
/// are half-open. The asymmetry is intentional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub price: Money,
}

impl Window {
    /// Inclusive containment check: `start <= at <= end`.
    #[inline]
    pub fn contains(&self, at: TimeOfDay) -> bool {
        self.start <= at && at <= self.end
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// A pricing strategy, serialized as `{"kind": ..., "config": ...}`.
///
/// ## Example
/// ```rust
/// use slotbook_core::pricing::Pricing;
///
/// let json = r#"{"kind": "STATIC", "config": {"price": 10000}}"#;
/// let pricing: Pricing = serde_json::from_str(json).unwrap();
/// assert!(pricing.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pricing {
    /// Fixed price.
    Static { price: Money },

    /// Always free. Unit variant: a complimentary item must not carry
    /// pricing parameters, so any `config` payload fails deserialization.
    Complimentary,

    /// Base price minus a flat or percentage discount, floored at zero.
    Discounted {
        base_price: Money,
        discount: Discount,
    },

    /// Price by duration bracket.
    Tiered { tiers: Vec<Tier> },

    /// Price by time-of-day window.
    Dynamic { windows: Vec<Window> },
}

// =============================================================================
// Evaluation
// =============================================================================

/// Which variant produced a quote. Reported in price breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppliedRule {
    Static,
    Complimentary,
    Discounted,
    Tiered,
    Dynamic,
}

/// Contextual parameters some variants require.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceContext {
    /// Requested duration in minutes (TIERED).
    pub duration_minutes: Option<u32>,
    /// Requested time of day (DYNAMIC).
    pub at: Option<TimeOfDay>,
}

/// The evaluator's result: the pre-discount base price and the discount
/// taken off it. For every variant except DISCOUNTED the discount is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub rule: AppliedRule,
    pub base_price: Money,
    pub discount: Money,
}

impl Quote {
    fn flat(rule: AppliedRule, base_price: Money) -> Self {
        Quote {
            rule,
            base_price,
            discount: Money::zero(),
        }
    }

    /// The price after discount, floored at zero. This is the value
    /// downstream aggregation works with.
    #[inline]
    pub fn net(&self) -> Money {
        self.base_price.saturating_sub(self.discount)
    }
}

impl Pricing {
    /// Evaluates the strategy against the given context.
    ///
    /// Pure: no lookups, no side effects. Fails only on missing context
    /// (TIERED without duration, DYNAMIC without time) or when no rule
    /// matches the context.
    pub fn quote(&self, ctx: &PriceContext) -> CoreResult<Quote> {
        match self {
            Pricing::Static { price } => Ok(Quote::flat(AppliedRule::Static, *price)),

            Pricing::Complimentary => Ok(Quote::flat(AppliedRule::Complimentary, Money::zero())),

            Pricing::Discounted {
                base_price,
                discount,
            } => {
                let amount = match discount {
                    Discount::Flat(amount) => *amount,
                    Discount::Percent(bps) => base_price.percentage_of(*bps),
                };
                Ok(Quote {
                    rule: AppliedRule::Discounted,
                    base_price: *base_price,
                    discount: amount,
                })
            }

            Pricing::Tiered { tiers } => {
                let duration = ctx.duration_minutes.ok_or(CoreError::DurationRequired)?;

                // Smallest bracket that still covers the duration.
                // min_by_key keeps this correct even if stored unsorted.
                let tier = tiers
                    .iter()
                    .filter(|t| duration <= t.up_to)
                    .min_by_key(|t| t.up_to)
                    .ok_or(CoreError::NoTierForDuration { duration })?;

                Ok(Quote::flat(AppliedRule::Tiered, tier.price))
            }

            Pricing::Dynamic { windows } => {
                let at = ctx.at.ok_or(CoreError::TimeRequired)?;

                let window = windows
                    .iter()
                    .find(|w| w.contains(at))
                    .ok_or(CoreError::NoWindowForTime { at })?;

                Ok(Quote::flat(AppliedRule::Dynamic, window.price))
            }
        }
    }

    /// Construction-time shape validation.
    ///
    /// ## Rules
    /// - STATIC: price must be non-negative
    /// - DISCOUNTED: base price positive; percent discount at most 100%;
    ///   flat discount non-negative
    /// - TIERED: at least one tier; boundaries strictly increasing
    /// - DYNAMIC: at least one window; each window start <= end
    pub fn validate(&self) -> ValidationResult<()> {
        match self {
            Pricing::Static { price } => {
                if price.is_negative() {
                    return Err(ValidationError::MustBePositive {
                        field: "pricing.price".to_string(),
                    });
                }
                Ok(())
            }

            Pricing::Complimentary => Ok(()),

            Pricing::Discounted {
                base_price,
                discount,
            } => {
                if base_price.cents() <= 0 {
                    return Err(ValidationError::MustBePositive {
                        field: "pricing.base_price".to_string(),
                    });
                }
                match discount {
                    Discount::Percent(bps) if *bps > MAX_PERCENT_BPS => {
                        Err(ValidationError::OutOfRange {
                            field: "pricing.discount".to_string(),
                            min: 0,
                            max: MAX_PERCENT_BPS as i64,
                        })
                    }
                    Discount::Flat(amount) if amount.is_negative() => {
                        Err(ValidationError::MustBePositive {
                            field: "pricing.discount".to_string(),
                        })
                    }
                    _ => Ok(()),
                }
            }

            Pricing::Tiered { tiers } => {
                if tiers.is_empty() {
                    return Err(ValidationError::Empty {
                        field: "pricing.tiers".to_string(),
                    });
                }

                let mut boundaries: Vec<u32> = tiers.iter().map(|t| t.up_to).collect();
                boundaries.sort_unstable();
                for pair in boundaries.windows(2) {
                    if pair[1] <= pair[0] {
                        return Err(ValidationError::DuplicateTier { up_to: pair[1] });
                    }
                }
                Ok(())
            }

            Pricing::Dynamic { windows } => {
                if windows.is_empty() {
                    return Err(ValidationError::Empty {
                        field: "pricing.windows".to_string(),
                    });
                }
                for w in windows {
                    if w.start > w.end {
                        return Err(ValidationError::InvertedInterval {
                            start: w.start,
                            end: w.end,
                        });
                    }
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
