//! # Calculator Commands
//!
//! Session mutations and the engine calls behind each output panel.
//!
//! ## Recompute Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Input Change → Re-render                            │
//! │                                                                         │
//! │  update_input / select_plan / set_billing / use_industry_averages      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Session (mutex) ── snapshot ──► get_breakdown   ──► summary cards     │
//! │                                  get_composition ──► pie charts        │
//! │                                  get_projection  ──► line chart, table │
//! │                                  get_report      ──► everything        │
//! │                                                                         │
//! │  Nothing is cached: every read recomputes from the current snapshot.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use shopcalc_core::{
    build_report_for, compute_breakdown, project_year, revenue_split, AnnualProjection,
    AppSubscription, BillingPeriod, CalculatorReport, CostBreakdown, CostComposition, InputField,
    Money, PlanId, RevenueSplit, StaffingLevel, StoreInputs, ESSENTIAL_APPS,
};

use crate::error::ApiError;
use crate::state::{CalculatorState, Session};

// =============================================================================
// Responses
// =============================================================================

/// Cost charts payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionResponse {
    pub composition: CostComposition,
    pub revenue_split: RevenueSplit,
}

/// Staffing preset with its monthly cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingOption {
    pub level: StaffingLevel,
    pub monthly_cost: Money,
}

/// Form metadata for one input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub id: InputField,
    pub label: &'static str,
    pub help_text: &'static str,
    /// Order count rather than a currency amount.
    pub is_count: bool,
}

impl From<InputField> for FieldInfo {
    fn from(field: InputField) -> Self {
        FieldInfo {
            id: field,
            label: field.label(),
            help_text: field.help_text(),
            is_count: field.is_count(),
        }
    }
}

/// The industry averages preset and the lists it is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragesResponse {
    pub inputs: StoreInputs,
    pub essential_apps: Vec<AppSubscription>,
    pub staffing: Vec<StaffingOption>,
}

// =============================================================================
// Session Commands
// =============================================================================

/// Gets the current session (inputs, plan, billing period).
pub fn get_session(state: &CalculatorState) -> Session {
    debug!("get_session command");
    state.with_session(Session::clone)
}

/// Validates and stores one input field.
///
/// ## Arguments
/// * `field` - Field name, e.g. `selling_price` or `monthly-orders`
/// * `value` - Number as parsed by the form widget
///
/// ## Errors
/// `NOT_FOUND` for an unknown field, `VALIDATION_ERROR` for NaN, infinity,
/// negatives or values too large to hold exactly. Fractional order counts
/// are accepted. The session is unchanged on error.
pub fn update_input(
    state: &CalculatorState,
    field: &str,
    value: f64,
) -> Result<Session, ApiError> {
    debug!(field = %field, value = %value, "update_input command");

    let field: InputField = field.parse()?;
    let result = state.with_session_mut(|s| s.update_input(field, value).map(|()| s.clone()));

    result.map_err(|e| {
        warn!(field = %field, error = %e, "Rejected input update");
        ApiError::from(e)
    })
}

/// Replaces every input with the industry averages preset.
pub fn use_industry_averages(state: &CalculatorState, staffing: StaffingLevel) -> Session {
    debug!(?staffing, "use_industry_averages command");

    state.with_session_mut(|s| {
        s.use_industry_averages(staffing);
        s.clone()
    })
}

/// Selects a plan by id.
pub fn select_plan(state: &CalculatorState, plan_id: &str) -> Result<Session, ApiError> {
    debug!(plan_id = %plan_id, "select_plan command");

    let plan: PlanId = plan_id.parse()?;
    Ok(state.with_session_mut(|s| {
        s.select_plan(plan);
        s.clone()
    }))
}

/// Sets the billing period by id (`monthly` or `yearly`).
pub fn set_billing(state: &CalculatorState, billing: &str) -> Result<Session, ApiError> {
    debug!(billing = %billing, "set_billing command");

    let billing: BillingPeriod = billing.parse()?;
    Ok(state.with_session_mut(|s| {
        s.set_billing(billing);
        s.clone()
    }))
}

// =============================================================================
// Output Commands
// =============================================================================

/// Current-month breakdown for the session.
pub fn get_breakdown(state: &CalculatorState) -> Result<CostBreakdown, ApiError> {
    debug!("get_breakdown command");

    let (inputs, plan, billing) = state.with_session(Session::snapshot);
    Ok(compute_breakdown(&inputs, &plan, billing)?)
}

/// Twelve-month projection from the session's current breakdown.
pub fn get_projection(state: &CalculatorState) -> Result<AnnualProjection, ApiError> {
    debug!("get_projection command");

    let breakdown = get_breakdown(state)?;
    Ok(project_year(breakdown.revenue, breakdown.total_costs))
}

/// Fixed/variable cost groups and the revenue split.
pub fn get_composition(state: &CalculatorState) -> Result<CompositionResponse, ApiError> {
    debug!("get_composition command");

    let (inputs, plan, billing) = state.with_session(Session::snapshot);
    let breakdown = compute_breakdown(&inputs, &plan, billing)?;

    Ok(CompositionResponse {
        composition: CostComposition::from_breakdown(&inputs, &breakdown),
        revenue_split: revenue_split(&breakdown),
    })
}

/// Everything at once.
pub fn get_report(state: &CalculatorState) -> Result<CalculatorReport, ApiError> {
    debug!("get_report command");

    let (inputs, plan, billing) = state.with_session(Session::snapshot);
    Ok(build_report_for(&inputs, plan, billing)?)
}

/// Labels and help text for every input field, in form order.
pub fn list_fields() -> Vec<FieldInfo> {
    debug!("list_fields command");
    InputField::ALL.into_iter().map(FieldInfo::from).collect()
}

/// The industry averages preset, without touching the session.
pub fn get_industry_averages() -> AveragesResponse {
    debug!("get_industry_averages command");

    AveragesResponse {
        inputs: StoreInputs::industry_averages(),
        essential_apps: ESSENTIAL_APPS.to_vec(),
        staffing: [StaffingLevel::PartTime, StaffingLevel::FullTime]
            .into_iter()
            .map(|level| StaffingOption {
                level,
                monthly_cost: level.monthly_cost(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shopcalc_core::{CalendarMonth, Quantity};

    fn averages_state() -> CalculatorState {
        let state = CalculatorState::default();
        use_industry_averages(&state, StaffingLevel::PartTime);
        state
    }

    #[test]
    fn test_update_input_by_name() {
        let state = CalculatorState::default();
        let session = update_input(&state, "selling-price", 49.99).unwrap();
        assert_eq!(session.inputs.selling_price, Quantity::from_cents(4999));
    }

    #[test]
    fn test_fractional_orders_are_accepted() {
        let state = averages_state();
        let session = update_input(&state, "monthly_orders", 99.5).unwrap();
        assert_eq!(session.inputs.monthly_orders, Quantity::from_micros(99_500_000));

        // 49.99 × 99.5 = 4974.005 → 4974.01
        assert_eq!(get_breakdown(&state).unwrap().revenue.cents(), 497_401);
    }

    #[test]
    fn test_update_input_errors() {
        let state = averages_state();
        let before = get_session(&state);

        let err = update_input(&state, "tax_rate", 5.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = update_input(&state, "monthly_orders", f64::NAN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Invalid input: monthly_orders must be a finite number");

        let err = update_input(&state, "marketing_budget", -1.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(get_session(&state).inputs, before.inputs);
    }

    #[test]
    fn test_breakdown_follows_session() {
        let state = averages_state();
        assert_eq!(get_breakdown(&state).unwrap().total_costs.cents(), 568_297);

        set_billing(&state, "yearly").unwrap();
        assert_eq!(get_breakdown(&state).unwrap().total_costs.cents(), 566_997);

        select_plan(&state, "advanced").unwrap();
        let breakdown = get_breakdown(&state).unwrap();
        assert_eq!(breakdown.plan_cost, Money::from_units(389));
    }

    #[test]
    fn test_select_unknown_plan() {
        let state = CalculatorState::default();
        let err = select_plan(&state, "platinum").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(get_session(&state).plan, PlanId::Basic);

        let err = set_billing(&state, "weekly").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_projection_and_report_agree() {
        let state = averages_state();
        let projection = get_projection(&state).unwrap();
        let report = get_report(&state).unwrap();

        assert_eq!(projection, report.projection);
        assert_eq!(
            projection.month(CalendarMonth::November).costs,
            Money::from_units(8524)
        );
    }

    #[test]
    fn test_composition_totals() {
        let state = averages_state();
        let response = get_composition(&state).unwrap();
        assert_eq!(response.composition.total.cents(), 568_297);
        assert_eq!(response.revenue_split.revenue.cents(), 499_900);
    }

    #[test]
    fn test_industry_averages_response() {
        let response = get_industry_averages();
        assert_eq!(response.essential_apps.len(), 3);
        assert_eq!(response.staffing[1].monthly_cost, Money::from_units(4000));
        assert_eq!(response.inputs.app_subscription_cost, Quantity::from_units(63));
    }

    #[test]
    fn test_list_fields() {
        let fields = list_fields();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0].id, InputField::ProductCost);

        let orders = fields.iter().find(|f| f.is_count).unwrap();
        assert_eq!(orders.id, InputField::MonthlyOrders);
        assert_eq!(orders.label, "Expected Monthly Orders");
        assert_eq!(fields.iter().filter(|f| f.is_count).count(), 1);

        let json = serde_json::to_value(&fields[1]).unwrap();
        assert_eq!(json["id"], "selling_price");
        assert_eq!(json["label"], "Selling Price");
        assert_eq!(json["helpText"], "The price you'll charge customers for one unit");
        assert_eq!(json["isCount"], false);
    }
}
