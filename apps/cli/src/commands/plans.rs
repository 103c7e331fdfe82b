//! # Plan Commands
//!
//! Plan selector data.

use serde::Serialize;
use tracing::debug;

use shopcalc_core::{all_plans, BillingPeriod, Money, PlanId, PlanTier};

use crate::state::CalculatorState;

/// One card of the plan selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOption {
    pub tier: PlanTier,

    /// Monthly charge under the session's billing period.
    pub price: Money,

    /// Monthly saving of annual billing.
    pub yearly_savings: Money,

    /// Saving of annual billing over twelve months.
    pub annual_savings: Money,

    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansResponse {
    pub billing: BillingPeriod,
    pub plans: Vec<PlanOption>,
}

/// Lists every plan priced for the session's billing period.
pub fn list_plans(state: &CalculatorState) -> PlansResponse {
    debug!("list_plans command");

    let (selected, billing): (PlanId, BillingPeriod) = state.with_session(|s| (s.plan, s.billing));

    PlansResponse {
        billing,
        plans: all_plans()
            .into_iter()
            .map(|tier| PlanOption {
                price: tier.cost_for(billing),
                yearly_savings: tier.yearly_savings_per_month(),
                annual_savings: tier.yearly_savings_per_year(),
                selected: tier.id == selected,
                tier,
            })
            .collect(),
    }
}
