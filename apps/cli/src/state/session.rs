//! # Calculator Session
//!
//! The mutable side of the calculator: current inputs, the selected plan and
//! the billing period. The engine only ever sees immutable snapshots.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐   update_input    ┌──────────┐   snapshot()   ┌────────┐ │
//! │  │  Config  │──────────────────►│ Session  │───────────────►│ Engine │ │
//! │  │ defaults │   select_plan     │ (Mutex)  │  StoreInputs,  │ (pure) │ │
//! │  └──────────┘   set_billing     └──────────┘  PlanTier,     └────────┘ │
//! │                 use_averages                  BillingPeriod            │
//! │                                                                         │
//! │  A rejected update leaves the session exactly as it was.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

use shopcalc_core::catalog::plan;
use shopcalc_core::{
    BillingPeriod, CoreResult, InputField, PlanId, PlanTier, StaffingLevel, StoreInputs,
};

// =============================================================================
// Session
// =============================================================================

/// Current calculator selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub inputs: StoreInputs,
    pub plan: PlanId,
    pub billing: BillingPeriod,

    /// When the session was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Creates an empty session on the given plan.
    pub fn new(plan: PlanId, billing: BillingPeriod) -> Self {
        Session {
            inputs: StoreInputs::default(),
            plan,
            billing,
            updated_at: Utc::now(),
        }
    }

    /// Validates and assigns one input field.
    pub fn update_input(&mut self, field: InputField, value: f64) -> CoreResult<()> {
        self.inputs.set(field, value)?;
        self.touch();
        Ok(())
    }

    /// Replaces all inputs with the industry averages preset.
    pub fn use_industry_averages(&mut self, staffing: StaffingLevel) {
        self.inputs = StoreInputs::industry_averages_with(staffing);
        self.touch();
    }

    pub fn select_plan(&mut self, plan: PlanId) {
        self.plan = plan;
        self.touch();
    }

    pub fn set_billing(&mut self, billing: BillingPeriod) {
        self.billing = billing;
        self.touch();
    }

    /// Returns the catalog entry of the selected plan.
    pub fn plan_tier(&self) -> PlanTier {
        plan(self.plan)
    }

    /// Immutable snapshot handed to the engine.
    pub fn snapshot(&self) -> (StoreInputs, PlanTier, BillingPeriod) {
        (self.inputs, self.plan_tier(), self.billing)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(PlanId::default(), BillingPeriod::default())
    }
}

// =============================================================================
// Calculator State
// =============================================================================

/// Shared, lock-protected session.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Session>>`: the session is small and almost every
/// operation either mutates it or takes a copy, so a plain mutex suffices.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    session: Arc<Mutex<Session>>,
}

impl CalculatorState {
    pub fn new(session: Session) -> Self {
        CalculatorState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let (inputs, plan, billing) = state.with_session(|s| s.snapshot());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        // Mutations validate before assigning, so a poisoned session is still whole.
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcalc_core::Quantity;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new(PlanId::Shopify, BillingPeriod::Yearly);
        assert_eq!(session.inputs, StoreInputs::default());
        assert_eq!(session.plan_tier().id, PlanId::Shopify);
        assert_eq!(session.billing, BillingPeriod::Yearly);
    }

    #[test]
    fn test_update_input() {
        let mut session = Session::default();
        let before = session.updated_at;

        session.update_input(InputField::SellingPrice, 49.99).unwrap();
        assert_eq!(session.inputs.selling_price, Quantity::from_cents(4999));
        assert!(session.updated_at >= before);
    }

    #[test]
    fn test_rejected_update_leaves_session_unchanged() {
        let mut session = Session::default();
        session.update_input(InputField::MonthlyOrders, 100.0).unwrap();
        let before = session.clone();

        assert!(session.update_input(InputField::MonthlyOrders, -12.5).is_err());
        assert!(session.update_input(InputField::StaffCost, f64::NAN).is_err());
        assert!(session.update_input(InputField::SellingPrice, f64::INFINITY).is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn test_use_industry_averages() {
        let mut session = Session::default();
        session.use_industry_averages(StaffingLevel::FullTime);
        assert_eq!(session.inputs.monthly_orders, Quantity::from_units(100));
        assert_eq!(session.inputs.staff_cost, Quantity::from_units(4000));
    }

    #[test]
    fn test_state_shares_session() {
        let state = CalculatorState::default();
        let handle = state.clone();

        handle.with_session_mut(|s| s.select_plan(PlanId::Advanced));
        let (_, tier, billing) = state.with_session(|s| s.snapshot());
        assert_eq!(tier.id, PlanId::Advanced);
        assert_eq!(billing, BillingPeriod::Monthly);
    }
}
