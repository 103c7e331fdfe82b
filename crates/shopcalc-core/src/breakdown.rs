//! # Cost Breakdown
//!
//! Current-month revenue, costs and margin for one store on one plan.
//!
//! ## Formula
//! ```text
//! revenue          = selling_price × orders
//! product_costs    = product_cost × orders
//! shipping_costs   = shipping_cost_per_order × orders
//! transaction_fees = revenue × plan rate + orders × 30¢
//! fixed_costs      = marketing + apps + staff + plan cost (billing period)
//!
//! total_costs      = product + shipping + transaction_fees + fixed
//! net_profit       = revenue − total_costs
//! margin           = net_profit / revenue × 100   (2 decimals, 0 if no revenue)
//! ```
//!
//! Per-order products are computed exactly from the six-decimal inputs in
//! `i128`, then rounded once to the cent. Every figure after that is integer
//! cents, so the totals identity holds to the cent for any accepted input.

use serde::Serialize;
use ts_rs::TS;

use crate::catalog::PlanTier;
use crate::error::{CoreResult, ValidationError};
use crate::money::{div_round_half_away, Money, CENTS_PER_UNIT};
use crate::quantity::{Quantity, MICROS_PER_UNIT};
use crate::types::{BillingPeriod, Percentage, Rate, StoreInputs};
use crate::validation::{validate_store_inputs, ValidationResult};
use crate::{MAX_TOTAL_CENTS, PER_ORDER_FIXED_FEE};

/// Decimal places of the current-month margin.
const MARGIN_DECIMALS: u32 = 2;

/// Units of `micros × micros` in one cent.
const PRODUCT_SCALE: i128 =
    (MICROS_PER_UNIT as i128) * (MICROS_PER_UNIT as i128) / (CENTS_PER_UNIT as i128);

/// Units of `micros × micros × bps` in one cent.
const FEE_SCALE: i128 = PRODUCT_SCALE * Rate::BPS_PER_UNIT as i128;

/// Derived current-month figures.
///
/// Recomputed on every input change; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CostBreakdown {
    pub revenue: Money,
    pub product_costs: Money,
    pub shipping_costs: Money,
    pub transaction_fees: Money,

    /// Plan charge for the active billing period (already in `fixed_costs`).
    pub plan_cost: Money,

    pub fixed_costs: Money,
    pub total_costs: Money,
    pub net_profit: Money,
    pub profit_margin_percent: Percentage,
}

impl CostBreakdown {
    /// Costs that scale with order volume.
    pub fn variable_costs(&self) -> Money {
        self.product_costs + self.shipping_costs + self.transaction_fees
    }

    /// What the storefront platform itself charges: plan plus transaction fees.
    pub fn platform_costs(&self) -> Money {
        self.plan_cost + self.transaction_fees
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit.is_positive()
    }
}

/// Computes the current-month breakdown.
///
/// Inputs are re-validated first; a snapshot with a negative field fails
/// with `CoreError::InvalidInput` and nothing is computed. So does a snapshot
/// whose revenue or costs exceed [`MAX_TOTAL_CENTS`](crate::MAX_TOTAL_CENTS).
///
/// ## Example
/// ```rust
/// use shopcalc_core::breakdown::compute_breakdown;
/// use shopcalc_core::catalog::{plan, PlanId};
/// use shopcalc_core::types::{BillingPeriod, StoreInputs};
///
/// let inputs = StoreInputs::industry_averages();
/// let b = compute_breakdown(&inputs, &plan(PlanId::Basic), BillingPeriod::Monthly).unwrap();
///
/// assert_eq!(b.revenue.cents(), 499_900);
/// assert_eq!(b.transaction_fees.cents(), 16_997);
/// assert_eq!(b.total_costs.cents(), 568_297);
/// assert_eq!(b.net_profit.cents(), -68_397);
/// assert_eq!(b.profit_margin_percent.to_string(), "-13.68%");
/// ```
pub fn compute_breakdown(
    inputs: &StoreInputs,
    plan: &PlanTier,
    period: BillingPeriod,
) -> CoreResult<CostBreakdown> {
    validate_store_inputs(inputs)?;

    let orders = inputs.monthly_orders;
    let revenue = per_order_total(inputs.selling_price, orders, "revenue")?;
    let product_costs = per_order_total(inputs.product_cost, orders, "product_costs")?;
    let shipping_costs = per_order_total(inputs.shipping_cost_per_order, orders, "shipping_costs")?;
    let transaction_fees = transaction_fees(inputs.selling_price, orders, plan.transaction_rate)?;

    let plan_cost = plan.cost_for(period);
    let fixed_costs = inputs.marketing_budget.to_money()
        + inputs.app_subscription_cost.to_money()
        + inputs.staff_cost.to_money()
        + plan_cost;

    let total_costs = product_costs + shipping_costs + transaction_fees + fixed_costs;
    if total_costs.cents() > MAX_TOTAL_CENTS {
        return Err(unrepresentable("total_costs").into());
    }
    let net_profit = revenue - total_costs;

    Ok(CostBreakdown {
        revenue,
        product_costs,
        shipping_costs,
        transaction_fees,
        plan_cost,
        fixed_costs,
        total_costs,
        net_profit,
        profit_margin_percent: Percentage::ratio(net_profit, revenue, MARGIN_DECIMALS),
    })
}

/// Percentage fee on exact revenue plus the fixed fee per order, rounded
/// once to the cent.
///
/// ## Example
/// ```rust
/// use shopcalc_core::breakdown::transaction_fees;
/// use shopcalc_core::quantity::Quantity;
/// use shopcalc_core::types::Rate;
///
/// let price = Quantity::from_cents(4999);
/// let orders = Quantity::from_units(100);
///
/// // $4,999.00 × 2.8% + 100 × 30¢ = $169.972 → $169.97
/// let fees = transaction_fees(price, orders, Rate::from_bps(280)).unwrap();
/// assert_eq!(fees.cents(), 16_997);
/// ```
pub fn transaction_fees(
    selling_price: Quantity,
    orders: Quantity,
    rate: Rate,
) -> ValidationResult<Money> {
    let orders = i128::from(orders.micros());
    let fixed_per_order =
        i128::from(PER_ORDER_FIXED_FEE.cents()) * (FEE_SCALE / i128::from(MICROS_PER_UNIT));

    let fees = (i128::from(selling_price.micros()) * orders)
        .checked_mul(i128::from(rate.bps()))
        .and_then(|percent| percent.checked_add(orders.checked_mul(fixed_per_order)?))
        .ok_or_else(|| unrepresentable("transaction_fees"))?;

    to_cents(fees, FEE_SCALE, "transaction_fees")
}

/// `per_unit × orders`, rounded to the cent.
fn per_order_total(
    per_unit: Quantity,
    orders: Quantity,
    figure: &str,
) -> ValidationResult<Money> {
    // |micros × micros| < 2^126
    let exact = i128::from(per_unit.micros()) * i128::from(orders.micros());
    to_cents(exact, PRODUCT_SCALE, figure)
}

fn to_cents(value: i128, scale: i128, figure: &str) -> ValidationResult<Money> {
    let cents = div_round_half_away(value, scale);
    if cents.abs() > i128::from(MAX_TOTAL_CENTS) {
        return Err(unrepresentable(figure));
    }
    Ok(Money::from_cents(cents as i64))
}

fn unrepresentable(figure: &str) -> ValidationError {
    ValidationError::Unrepresentable {
        field: figure.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
