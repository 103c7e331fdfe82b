//! # Industry Averages
//!
//! A preset of typical small-store economics, used to pre-fill the
//! calculator (CAD).

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::StoreInputs;

/// A recurring app subscription included in the preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AppSubscription {
    #[ts(as = "String")]
    pub name: &'static str,
    pub monthly_cost: Money,
}

/// Apps most stores run from day one.
pub const ESSENTIAL_APPS: [AppSubscription; 3] = [
    AppSubscription {
        name: "Email Marketing",
        monthly_cost: Money::from_units(29),
    },
    AppSubscription {
        name: "Reviews App",
        monthly_cost: Money::from_units(15),
    },
    AppSubscription {
        name: "Inventory Management",
        monthly_cost: Money::from_units(19),
    },
];

/// Monthly cost of every essential app.
pub fn essential_apps_total() -> Money {
    ESSENTIAL_APPS.iter().map(|app| app.monthly_cost).sum()
}

/// Staffing presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StaffingLevel {
    #[default]
    PartTime,
    FullTime,
}

impl StaffingLevel {
    pub const fn monthly_cost(&self) -> Money {
        match self {
            StaffingLevel::PartTime => Money::from_units(2000),
            StaffingLevel::FullTime => Money::from_units(4000),
        }
    }
}

impl StoreInputs {
    /// Typical small-store inputs with part-time staffing.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::quantity::Quantity;
    /// use shopcalc_core::types::StoreInputs;
    ///
    /// let inputs = StoreInputs::industry_averages();
    /// assert_eq!(inputs.selling_price, Quantity::from_cents(4999));
    /// assert_eq!(inputs.app_subscription_cost.to_money().cents(), 6300);
    /// ```
    pub fn industry_averages() -> Self {
        Self::industry_averages_with(StaffingLevel::default())
    }

    /// Typical small-store inputs with the given staffing level.
    pub fn industry_averages_with(staffing: StaffingLevel) -> Self {
        StoreInputs {
            product_cost: Quantity::from_units(20),
            selling_price: Quantity::from_cents(4999),
            monthly_orders: Quantity::from_units(100),
            shipping_cost_per_order: Quantity::from_cents(899),
            marketing_budget: Quantity::from_units(500),
            app_subscription_cost: Quantity::from_money(essential_apps_total()),
            staff_cost: Quantity::from_money(staffing.monthly_cost()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_store_inputs;

    #[test]
    fn test_essential_apps_total() {
        assert_eq!(essential_apps_total(), Money::from_units(63));
    }

    #[test]
    fn test_industry_averages() {
        let inputs = StoreInputs::industry_averages();
        assert_eq!(inputs.product_cost, Quantity::from_units(20));
        assert_eq!(inputs.monthly_orders, Quantity::from_units(100));
        assert_eq!(inputs.shipping_cost_per_order.to_money().cents(), 899);
        assert_eq!(inputs.marketing_budget.to_money().cents(), 50_000);
        assert_eq!(inputs.staff_cost.to_money().cents(), 200_000);
        assert!(validate_store_inputs(&inputs).is_ok());
    }

    #[test]
    fn test_full_time_staffing() {
        let inputs = StoreInputs::industry_averages_with(StaffingLevel::FullTime);
        assert_eq!(inputs.staff_cost, Quantity::from_units(4000));
        assert_eq!(inputs.selling_price, StoreInputs::industry_averages().selling_price);
    }
}
