//! # Plan Catalog
//!
//! The storefront's published subscription tiers (CAD).
//!
//! ```text
//! ┌──────────┬──────────────┬──────────────┬──────────────────────────┐
//! │ Plan     │ Monthly bill │ Yearly bill  │ Online rate              │
//! │          │ (per month)  │ (per month)  │                          │
//! ├──────────┼──────────────┼──────────────┼──────────────────────────┤
//! │ basic    │   $51.00     │   $38.00     │ 2.8% + 30¢ per order     │
//! │ shopify  │  $132.00     │   $99.00     │ 2.6% + 30¢ per order     │
//! │ advanced │  $517.00     │  $389.00     │ 2.4% + 30¢ per order     │
//! └──────────┴──────────────┴──────────────┴──────────────────────────┘
//! ```
//!
//! The table is fixed at build time and never mutated. Lookups are an
//! exhaustive match over [`PlanId`]; unknown ids fail with
//! [`CoreError::PlanNotFound`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{BillingPeriod, Rate};
use crate::MONTHS_PER_YEAR;

// =============================================================================
// Plan Id
// =============================================================================

/// Catalog key for a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    #[default]
    Basic,
    Shopify,
    Advanced,
}

impl PlanId {
    /// All tiers in display order.
    pub const ALL: [PlanId; 3] = [PlanId::Basic, PlanId::Shopify, PlanId::Advanced];

    /// Returns the stable identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlanId::Basic => "basic",
            PlanId::Shopify => "shopify",
            PlanId::Advanced => "advanced",
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(PlanId::Basic),
            "shopify" => Ok(PlanId::Shopify),
            "advanced" => Ok(PlanId::Advanced),
            _ => Err(CoreError::PlanNotFound(s.to_string())),
        }
    }
}

// =============================================================================
// Plan Tier
// =============================================================================

/// One immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PlanTier {
    pub id: PlanId,

    /// Name shown in the plan selector.
    #[ts(as = "String")]
    pub display_name: &'static str,

    /// One-line audience description.
    #[ts(as = "String")]
    pub description: &'static str,

    /// Price per month when billed monthly.
    pub monthly_cost: Money,

    /// Price per month when billed annually.
    pub yearly_cost: Money,

    /// Percentage charged on online revenue.
    pub transaction_rate: Rate,
}

impl PlanTier {
    /// Returns the monthly fixed charge for the given billing period.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::catalog::{plan, PlanId};
    /// use shopcalc_core::types::BillingPeriod;
    ///
    /// let basic = plan(PlanId::Basic);
    /// assert_eq!(basic.cost_for(BillingPeriod::Monthly).cents(), 5100);
    /// assert_eq!(basic.cost_for(BillingPeriod::Yearly).cents(), 3800);
    /// ```
    pub const fn cost_for(&self, period: BillingPeriod) -> Money {
        match period {
            BillingPeriod::Monthly => self.monthly_cost,
            BillingPeriod::Yearly => self.yearly_cost,
        }
    }

    /// Returns what annual billing saves per month.
    pub fn yearly_savings_per_month(&self) -> Money {
        self.monthly_cost - self.yearly_cost
    }

    /// Returns what annual billing saves over a full year.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::catalog::{plan, PlanId};
    /// use shopcalc_core::money::Money;
    ///
    /// // ($132 - $99) × 12
    /// assert_eq!(plan(PlanId::Shopify).yearly_savings_per_year(), Money::from_units(396));
    /// ```
    pub fn yearly_savings_per_year(&self) -> Money {
        self.yearly_savings_per_month() * MONTHS_PER_YEAR as i64
    }
}

const BASIC: PlanTier = PlanTier {
    id: PlanId::Basic,
    display_name: "Basic",
    description: "For solo entrepreneurs",
    monthly_cost: Money::from_units(51),
    yearly_cost: Money::from_units(38),
    transaction_rate: Rate::from_bps(280),
};

const SHOPIFY: PlanTier = PlanTier {
    id: PlanId::Shopify,
    display_name: "Shopify",
    description: "For small teams",
    monthly_cost: Money::from_units(132),
    yearly_cost: Money::from_units(99),
    transaction_rate: Rate::from_bps(260),
};

const ADVANCED: PlanTier = PlanTier {
    id: PlanId::Advanced,
    display_name: "Advanced",
    description: "As your business scales",
    monthly_cost: Money::from_units(517),
    yearly_cost: Money::from_units(389),
    transaction_rate: Rate::from_bps(240),
};

// =============================================================================
// Lookups
// =============================================================================

/// Returns the catalog entry for a tier.
pub const fn plan(id: PlanId) -> PlanTier {
    match id {
        PlanId::Basic => BASIC,
        PlanId::Shopify => SHOPIFY,
        PlanId::Advanced => ADVANCED,
    }
}

/// Looks up a plan by its string id.
///
/// ## Example
/// ```rust
/// use shopcalc_core::catalog::lookup_plan;
///
/// assert_eq!(lookup_plan("shopify").unwrap().display_name, "Shopify");
/// assert!(lookup_plan("platinum").is_err());
/// ```
pub fn lookup_plan(id: &str) -> CoreResult<PlanTier> {
    Ok(plan(id.parse()?))
}

/// Returns every tier in display order.
pub fn all_plans() -> [PlanTier; 3] {
    PlanId::ALL.map(plan)
}

// =============================================================================
// Unit Tests
// =============================================================================
