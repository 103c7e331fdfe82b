//! # Calculator Report
//!
//! Everything the presentation layer renders for one input snapshot, in a
//! single call.
//!
//! ```text
//! StoreInputs + plan id + billing period
//!        │
//!        ▼
//!  lookup_plan ──► compute_breakdown ──┬──► CostComposition
//!                                      ├──► RevenueSplit
//!                                      └──► project_year(revenue, total_costs)
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::breakdown::{compute_breakdown, CostBreakdown};
use crate::catalog::{lookup_plan, PlanTier};
use crate::composition::{revenue_split, CostComposition, RevenueSplit};
use crate::error::CoreResult;
use crate::projection::{project_year, AnnualProjection};
use crate::types::{BillingPeriod, StoreInputs};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CalculatorReport {
    pub plan: PlanTier,
    pub billing: BillingPeriod,
    pub breakdown: CostBreakdown,
    pub composition: CostComposition,
    pub revenue_split: RevenueSplit,
    pub projection: AnnualProjection,
}

/// Builds the full report from string ids as the selectors send them.
///
/// Fails with `PlanNotFound` / `BillingPeriodNotFound` for unknown ids and
/// `InvalidInput` for a bad snapshot. No partial report is returned.
pub fn build_report(
    inputs: &StoreInputs,
    plan_id: &str,
    billing: &str,
) -> CoreResult<CalculatorReport> {
    let plan = lookup_plan(plan_id)?;
    let billing: BillingPeriod = billing.parse()?;
    build_report_for(inputs, plan, billing)
}

/// Builds the full report for an already resolved plan and billing period.
pub fn build_report_for(
    inputs: &StoreInputs,
    plan: PlanTier,
    billing: BillingPeriod,
) -> CoreResult<CalculatorReport> {
    let breakdown = compute_breakdown(inputs, &plan, billing)?;

    Ok(CalculatorReport {
        plan,
        billing,
        composition: CostComposition::from_breakdown(inputs, &breakdown),
        revenue_split: revenue_split(&breakdown),
        projection: project_year(breakdown.revenue, breakdown.total_costs),
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlanId;
    use crate::error::CoreError;
    use crate::money::Money;
    use crate::quantity::Quantity;
    use crate::seasonality::CalendarMonth;

    #[test]
    fn test_report_for_industry_averages() {
        let report = build_report(&StoreInputs::industry_averages(), "basic", "monthly").unwrap();

        assert_eq!(report.plan.id, PlanId::Basic);
        assert_eq!(report.billing, BillingPeriod::Monthly);
        assert_eq!(report.breakdown.total_costs.cents(), 568_297);
        assert_eq!(report.composition.total, report.breakdown.total_costs);
        assert_eq!(
            report.projection.month(CalendarMonth::November).revenue,
            Money::from_units(5249)
        );
        assert_eq!(report.projection.totals.revenue, Money::from_units(52_738));
    }

    #[test]
    fn test_projection_follows_billing_period() {
        let inputs = StoreInputs::industry_averages();
        let monthly = build_report(&inputs, "advanced", "monthly").unwrap();
        let yearly = build_report(&inputs, "advanced", "yearly").unwrap();

        assert!(yearly.breakdown.total_costs < monthly.breakdown.total_costs);
        assert!(yearly.projection.totals.costs < monthly.projection.totals.costs);
        assert_eq!(yearly.projection.totals.revenue, monthly.projection.totals.revenue);
    }

    #[test]
    fn test_unknown_ids_fail() {
        let inputs = StoreInputs::industry_averages();
        assert_eq!(
            build_report(&inputs, "enterprise", "monthly").unwrap_err(),
            CoreError::PlanNotFound("enterprise".to_string())
        );
        assert_eq!(
            build_report(&inputs, "basic", "weekly").unwrap_err(),
            CoreError::BillingPeriodNotFound("weekly".to_string())
        );
    }

    #[test]
    fn test_invalid_inputs_fail_atomically() {
        let inputs = StoreInputs {
            product_cost: Quantity::from_micros(-1_000_000),
            ..StoreInputs::industry_averages()
        };
        assert!(build_report(&inputs, "basic", "monthly")
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_report_serializes() {
        let report = build_report(&StoreInputs::industry_averages(), "shopify", "yearly").unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["billing"], "yearly");
        assert_eq!(json["plan"]["id"], "shopify");
        assert_eq!(json["projection"]["months"].as_array().unwrap().len(), 12);
        assert_eq!(json["projection"]["months"][10]["month"], "november");
    }
}
