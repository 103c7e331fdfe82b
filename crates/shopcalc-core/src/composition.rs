//! # Cost Composition
//!
//! Groups the current month's costs the way the charts present them.
//!
//! ```text
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ Fixed                     │   │ Variable                  │
//! │  Plan                     │   │  Product Costs            │
//! │  Marketing                │   │  Shipping                 │
//! │  Apps                     │   │  Transaction Fees         │
//! │  Staff                    │   │                           │
//! └─────────────┬─────────────┘   └─────────────┬─────────────┘
//!               └──────────── total_costs ──────┘
//! ```
//!
//! Shares are percentages with one decimal. A group whose total is zero
//! reports every share as zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::breakdown::{compute_breakdown, CostBreakdown};
use crate::catalog::PlanTier;
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{BillingPeriod, Percentage, StoreInputs};

const SHARE_DECIMALS: u32 = 1;

// =============================================================================
// Categories
// =============================================================================

/// One slice of the cost charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Plan,
    Marketing,
    Apps,
    Staff,
    ProductCosts,
    Shipping,
    TransactionFees,
}

impl CostCategory {
    pub const FIXED: [CostCategory; 4] = [
        CostCategory::Plan,
        CostCategory::Marketing,
        CostCategory::Apps,
        CostCategory::Staff,
    ];

    pub const VARIABLE: [CostCategory; 3] = [
        CostCategory::ProductCosts,
        CostCategory::Shipping,
        CostCategory::TransactionFees,
    ];

    /// Chart legend label.
    pub const fn label(&self) -> &'static str {
        match self {
            CostCategory::Plan => "Plan",
            CostCategory::Marketing => "Marketing",
            CostCategory::Apps => "Apps",
            CostCategory::Staff => "Staff",
            CostCategory::ProductCosts => "Product Costs",
            CostCategory::Shipping => "Shipping",
            CostCategory::TransactionFees => "Transaction Fees",
        }
    }

    pub const fn is_fixed(&self) -> bool {
        matches!(
            self,
            CostCategory::Plan | CostCategory::Marketing | CostCategory::Apps | CostCategory::Staff
        )
    }

    fn amount(&self, inputs: &StoreInputs, breakdown: &CostBreakdown) -> Money {
        match self {
            CostCategory::Plan => breakdown.plan_cost,
            CostCategory::Marketing => inputs.marketing_budget.to_money(),
            CostCategory::Apps => inputs.app_subscription_cost.to_money(),
            CostCategory::Staff => inputs.staff_cost.to_money(),
            CostCategory::ProductCosts => breakdown.product_costs,
            CostCategory::Shipping => breakdown.shipping_costs,
            CostCategory::TransactionFees => breakdown.transaction_fees,
        }
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// One labelled cost with its shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CostItem {
    pub category: CostCategory,

    #[ts(as = "String")]
    pub label: &'static str,

    pub amount: Money,

    /// Share of the item's own group (fixed or variable).
    pub share_of_group: Percentage,

    /// Share of all costs.
    pub share_of_total: Percentage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CostGroup {
    pub items: Vec<CostItem>,
    pub total: Money,
}

impl CostGroup {
    fn build(
        categories: &[CostCategory],
        inputs: &StoreInputs,
        breakdown: &CostBreakdown,
    ) -> Self {
        let amounts: Vec<(CostCategory, Money)> = categories
            .iter()
            .map(|category| (*category, category.amount(inputs, breakdown)))
            .collect();
        let total: Money = amounts.iter().map(|(_, amount)| *amount).sum();

        let items = amounts
            .into_iter()
            .map(|(category, amount)| CostItem {
                category,
                label: category.label(),
                amount,
                share_of_group: Percentage::ratio(amount, total, SHARE_DECIMALS),
                share_of_total: Percentage::ratio(amount, breakdown.total_costs, SHARE_DECIMALS),
            })
            .collect();

        CostGroup { items, total }
    }

    /// Finds the item for a category.
    pub fn item(&self, category: CostCategory) -> Option<&CostItem> {
        self.items.iter().find(|item| item.category == category)
    }

    /// The largest item, if any cost is non-zero.
    pub fn largest(&self) -> Option<&CostItem> {
        self.items
            .iter()
            .filter(|item| item.amount.is_positive())
            .max_by_key(|item| item.amount)
    }
}

/// Fixed and variable cost groups for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CostComposition {
    pub fixed: CostGroup,
    pub variable: CostGroup,
    pub total: Money,
}

impl CostComposition {
    /// Groups an already computed breakdown.
    ///
    /// `inputs` must be the snapshot the breakdown was computed from.
    pub fn from_breakdown(inputs: &StoreInputs, breakdown: &CostBreakdown) -> Self {
        let fixed = CostGroup::build(&CostCategory::FIXED, inputs, breakdown);
        let variable = CostGroup::build(&CostCategory::VARIABLE, inputs, breakdown);
        let total = fixed.total + variable.total;

        debug_assert_eq!(total, breakdown.total_costs);

        CostComposition {
            fixed,
            variable,
            total,
        }
    }
}

/// Computes the breakdown and groups its costs.
///
/// ## Example
/// ```rust
/// use shopcalc_core::catalog::{plan, PlanId};
/// use shopcalc_core::composition::compute_composition;
/// use shopcalc_core::types::{BillingPeriod, StoreInputs};
///
/// let inputs = StoreInputs::industry_averages();
/// let composition =
///     compute_composition(&inputs, &plan(PlanId::Basic), BillingPeriod::Monthly).unwrap();
///
/// assert_eq!(composition.fixed.total.cents(), 261_400);
/// assert_eq!(composition.variable.total.cents(), 306_897);
/// assert_eq!(composition.total.cents(), 568_297);
/// ```
pub fn compute_composition(
    inputs: &StoreInputs,
    plan: &PlanTier,
    period: BillingPeriod,
) -> CoreResult<CostComposition> {
    let breakdown = compute_breakdown(inputs, plan, period)?;
    Ok(CostComposition::from_breakdown(inputs, &breakdown))
}

// =============================================================================
// Revenue Split
// =============================================================================

/// How revenue divides into costs and profit.
///
/// `profit_share` uses the magnitude of the profit, so a loss-making month
/// still reports how large the loss is relative to revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RevenueSplit {
    pub revenue: Money,
    pub costs: Money,
    pub profit: Money,
    pub cost_share: Percentage,
    pub profit_share: Percentage,
}

pub fn revenue_split(breakdown: &CostBreakdown) -> RevenueSplit {
    let revenue = breakdown.revenue;

    RevenueSplit {
        revenue,
        costs: breakdown.total_costs,
        profit: breakdown.net_profit,
        cost_share: Percentage::ratio(breakdown.total_costs, revenue, SHARE_DECIMALS),
        profit_share: Percentage::ratio(breakdown.net_profit.abs(), revenue, SHARE_DECIMALS),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{plan, PlanId};
    use crate::quantity::Quantity;

    fn example() -> (StoreInputs, CostBreakdown) {
        let inputs = StoreInputs::industry_averages();
        let breakdown =
            compute_breakdown(&inputs, &plan(PlanId::Basic), BillingPeriod::Monthly).unwrap();
        (inputs, breakdown)
    }

    #[test]
    fn test_groups_add_up_to_total_costs() {
        let (inputs, breakdown) = example();
        let composition = CostComposition::from_breakdown(&inputs, &breakdown);

        assert_eq!(composition.fixed.total, breakdown.fixed_costs);
        assert_eq!(composition.variable.total, breakdown.variable_costs());
        assert_eq!(composition.total, breakdown.total_costs);
    }

    #[test]
    fn test_item_order_and_labels() {
        let (inputs, breakdown) = example();
        let composition = CostComposition::from_breakdown(&inputs, &breakdown);

        let fixed: Vec<&str> = composition.fixed.items.iter().map(|i| i.label).collect();
        assert_eq!(fixed, vec!["Plan", "Marketing", "Apps", "Staff"]);

        let variable: Vec<&str> = composition.variable.items.iter().map(|i| i.label).collect();
        assert_eq!(variable, vec!["Product Costs", "Shipping", "Transaction Fees"]);
        assert!(composition.variable.items.iter().all(|i| !i.category.is_fixed()));
    }

    #[test]
    fn test_shares_one_decimal() {
        let (inputs, breakdown) = example();
        let composition = CostComposition::from_breakdown(&inputs, &breakdown);

        // Staff: 2000 / 2614 = 76.51% → 76.5
        let staff = composition.fixed.item(CostCategory::Staff).unwrap();
        assert_eq!(staff.share_of_group.hundredths(), 7650);
        // Staff: 2000 / 5682.97 = 35.19% → 35.2
        assert_eq!(staff.share_of_total.hundredths(), 3520);

        // Product: 2000 / 3068.97 = 65.17% → 65.2
        let product = composition.variable.item(CostCategory::ProductCosts).unwrap();
        assert_eq!(product.share_of_group.hundredths(), 6520);

        assert_eq!(composition.fixed.largest().unwrap().category, CostCategory::Staff);
    }

    #[test]
    fn test_empty_group_has_zero_shares() {
        let inputs = StoreInputs {
            monthly_orders: Quantity::zero(),
            ..StoreInputs::industry_averages()
        };
        let composition =
            compute_composition(&inputs, &plan(PlanId::Basic), BillingPeriod::Monthly).unwrap();

        assert!(composition.variable.total.is_zero());
        assert!(composition.variable.largest().is_none());
        for item in &composition.variable.items {
            assert_eq!(item.share_of_group, Percentage::zero());
            assert_eq!(item.share_of_total, Percentage::zero());
        }
    }

    #[test]
    fn test_revenue_split_uses_profit_magnitude() {
        let (_, breakdown) = example();
        let split = revenue_split(&breakdown);

        // 5682.97 / 4999 = 113.68% → 113.7
        assert_eq!(split.cost_share.hundredths(), 11_370);
        // |−683.97| / 4999 = 13.68% → 13.7
        assert_eq!(split.profit_share.hundredths(), 1370);
        assert!(split.profit.is_negative());
    }

    #[test]
    fn test_revenue_split_without_revenue() {
        let inputs = StoreInputs::default();
        let breakdown =
            compute_breakdown(&inputs, &plan(PlanId::Shopify), BillingPeriod::Yearly).unwrap();
        let split = revenue_split(&breakdown);

        assert_eq!(split.cost_share, Percentage::zero());
        assert_eq!(split.profit_share, Percentage::zero());
        assert_eq!(split.costs.cents(), 9900);
    }
}
