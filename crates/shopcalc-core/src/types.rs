//! # Domain Types
//!
//! Core value types shared by every calculation in ShopCalc.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Rate       │   │   Percentage    │   │  BillingPeriod  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  hundredths     │   │  Monthly        │       │
//! │  │  280 = 2.8%     │   │  -1368 = -13.68%│   │  Yearly         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌───────────────────────────────┐   ┌───────────────────────────┐     │
//! │  │         StoreInputs           │   │       InputFields         │     │
//! │  │  ───────────────────────────  │   │  ───────────────────────  │     │
//! │  │  Quantity per field (exact)   │◄──│  raw f64 per field        │     │
//! │  │  (validated snapshot)         │   │  (as typed by the user)   │     │
//! │  └───────────────────────────────┘   └───────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::money::{div_round_half_away, Money};
use crate::quantity::Quantity;
use crate::validation::{self, ValidationResult};

// =============================================================================
// Rate
// =============================================================================

/// A multiplicative rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// - 280 bps = 2.8% (transaction rate)
/// - 15000 bps = 1.5× (seasonal modifier)
/// - 3000 bps = 30% (seasonal discount)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Basis points in a rate of exactly 1.0.
    pub const BPS_PER_UNIT: u32 = 10_000;

    /// A rate of exactly 1.0 (100%).
    pub const ONE: Rate = Rate(Self::BPS_PER_UNIT);

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns `1 - rate`, saturating at zero.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::types::Rate;
    ///
    /// // 30% discount keeps 70% of revenue
    /// assert_eq!(Rate::from_bps(3000).complement(), Rate::from_bps(7000));
    /// ```
    #[inline]
    pub const fn complement(&self) -> Self {
        Rate(Self::BPS_PER_UNIT.saturating_sub(self.0))
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A signed percentage in hundredths of a percent.
///
/// `-1368` is -13.68%. Margins can be negative (loss-making stores) and
/// can exceed 100% in magnitude, so the value is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(i64);

impl Percentage {
    /// Creates a percentage from hundredths of a percent.
    #[inline]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Percentage(hundredths)
    }

    /// Creates a whole-number percentage.
    #[inline]
    pub const fn from_whole(percent: i64) -> Self {
        Percentage(percent * 100)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// Returns the value in hundredths of a percent.
    #[inline]
    pub const fn hundredths(&self) -> i64 {
        self.0
    }

    /// Computes `part / whole × 100`, rounded half away from zero to
    /// `decimals` places (0, 1 or 2).
    ///
    /// Returns zero when `whole` is zero; division by zero is a convention,
    /// not an error. Results beyond the `i64` range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::money::Money;
    /// use shopcalc_core::types::Percentage;
    ///
    /// let profit = Money::from_cents(-68_397);
    /// let revenue = Money::from_cents(499_900);
    ///
    /// assert_eq!(Percentage::ratio(profit, revenue, 2).hundredths(), -1368);
    /// assert_eq!(Percentage::ratio(profit, revenue, 0).hundredths(), -1400);
    /// assert_eq!(Percentage::ratio(profit, Money::zero(), 2), Percentage::zero());
    /// ```
    pub fn ratio(part: Money, whole: Money, decimals: u32) -> Self {
        if whole.is_zero() {
            return Percentage::zero();
        }

        let decimals = decimals.min(2);
        let scale = 10_i128.pow(decimals);
        let (mut numerator, mut denominator) = (part.cents() as i128, whole.cents() as i128);
        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }

        let rounded = div_round_half_away(numerator * 100 * scale, denominator);
        let hundredths = rounded * (100 / scale);
        Percentage(i64::try_from(hundredths).unwrap_or(if hundredths < 0 {
            i64::MIN
        } else {
            i64::MAX
        }))
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}%", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Billing Period
// =============================================================================

/// How the storefront plan is billed.
///
/// Yearly billing is cheaper per month; both prices are charged into the
/// monthly fixed costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    /// Billed month to month.
    #[default]
    Monthly,
    /// Billed annually, quoted per month.
    Yearly,
}

impl BillingPeriod {
    /// Returns the period for the UI's "billed yearly" switch.
    #[inline]
    pub const fn from_yearly_flag(is_yearly: bool) -> Self {
        if is_yearly {
            BillingPeriod::Yearly
        } else {
            BillingPeriod::Monthly
        }
    }

    /// Returns the stable identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "monthly",
            BillingPeriod::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(BillingPeriod::Monthly),
            "yearly" => Ok(BillingPeriod::Yearly),
            _ => Err(CoreError::BillingPeriodNotFound(s.to_string())),
        }
    }
}

// =============================================================================
// Input Field
// =============================================================================

/// Names one user-editable field of [`StoreInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    ProductCost,
    SellingPrice,
    MonthlyOrders,
    ShippingCostPerOrder,
    MarketingBudget,
    AppSubscriptionCost,
    StaffCost,
}

impl InputField {
    /// All fields in form order.
    pub const ALL: [InputField; 7] = [
        InputField::ProductCost,
        InputField::SellingPrice,
        InputField::MonthlyOrders,
        InputField::ShippingCostPerOrder,
        InputField::MarketingBudget,
        InputField::AppSubscriptionCost,
        InputField::StaffCost,
    ];

    /// Returns the stable identifier (also used in error messages).
    pub const fn as_str(&self) -> &'static str {
        match self {
            InputField::ProductCost => "product_cost",
            InputField::SellingPrice => "selling_price",
            InputField::MonthlyOrders => "monthly_orders",
            InputField::ShippingCostPerOrder => "shipping_cost_per_order",
            InputField::MarketingBudget => "marketing_budget",
            InputField::AppSubscriptionCost => "app_subscription_cost",
            InputField::StaffCost => "staff_cost",
        }
    }

    /// Returns true for the order count (every other field is currency).
    #[inline]
    pub const fn is_count(&self) -> bool {
        matches!(self, InputField::MonthlyOrders)
    }

    /// Form label.
    pub const fn label(&self) -> &'static str {
        match self {
            InputField::ProductCost => "Product Cost",
            InputField::SellingPrice => "Selling Price",
            InputField::MonthlyOrders => "Expected Monthly Orders",
            InputField::ShippingCostPerOrder => "Shipping Cost per Order",
            InputField::MarketingBudget => "Monthly Marketing Budget",
            InputField::AppSubscriptionCost => "Monthly App Subscriptions",
            InputField::StaffCost => "Monthly Staff Costs",
        }
    }

    /// Help text shown next to the form field.
    pub const fn help_text(&self) -> &'static str {
        match self {
            InputField::ProductCost => {
                "The amount you pay to acquire or manufacture one unit of your product"
            }
            InputField::SellingPrice => "The price you'll charge customers for one unit",
            InputField::MonthlyOrders => "Estimated number of orders you expect per month",
            InputField::ShippingCostPerOrder => "Average cost to ship one order",
            InputField::MarketingBudget => "Monthly spending on advertising and marketing",
            InputField::AppSubscriptionCost => "Essential storefront apps for your store operations",
            InputField::StaffCost => "Monthly costs for store management and customer service",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        InputField::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| CoreError::InputFieldNotFound(s.to_string()))
    }
}

// =============================================================================
// Store Inputs
// =============================================================================

/// The user's store economics for one month.
///
/// An immutable snapshot passed into every calculation. The caller owns
/// mutation through [`StoreInputs::set`]; the engine never keeps a copy.
///
/// Every field is an exact non-negative decimal after validation. Order
/// counts may be fractional (an average of 10.5 orders a month is valid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoreInputs {
    /// Cost to acquire or manufacture one unit.
    #[ts(as = "f64")]
    pub product_cost: Quantity,

    /// Price charged to the customer for one unit.
    #[ts(as = "f64")]
    pub selling_price: Quantity,

    /// Expected orders per month.
    #[ts(as = "f64")]
    pub monthly_orders: Quantity,

    /// Average cost to ship one order.
    #[ts(as = "f64")]
    pub shipping_cost_per_order: Quantity,

    /// Monthly advertising spend.
    #[ts(as = "f64")]
    pub marketing_budget: Quantity,

    /// Monthly spend on storefront apps.
    #[ts(as = "f64")]
    pub app_subscription_cost: Quantity,

    /// Monthly staff cost.
    #[ts(as = "f64")]
    pub staff_cost: Quantity,
}

impl StoreInputs {
    /// Returns the value of a field.
    pub fn get(&self, field: InputField) -> Quantity {
        match field {
            InputField::ProductCost => self.product_cost,
            InputField::SellingPrice => self.selling_price,
            InputField::MonthlyOrders => self.monthly_orders,
            InputField::ShippingCostPerOrder => self.shipping_cost_per_order,
            InputField::MarketingBudget => self.marketing_budget,
            InputField::AppSubscriptionCost => self.app_subscription_cost,
            InputField::StaffCost => self.staff_cost,
        }
    }

    /// Validates and assigns one field from a user-entered number.
    ///
    /// On error the inputs are left untouched.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::quantity::Quantity;
    /// use shopcalc_core::types::{InputField, StoreInputs};
    ///
    /// let mut inputs = StoreInputs::default();
    /// inputs.set(InputField::SellingPrice, 49.99).unwrap();
    /// assert_eq!(inputs.selling_price, Quantity::from_cents(4999));
    ///
    /// assert!(inputs.set(InputField::SellingPrice, f64::NAN).is_err());
    /// assert_eq!(inputs.selling_price, Quantity::from_cents(4999));
    /// ```
    pub fn set(&mut self, field: InputField, value: f64) -> ValidationResult<()> {
        *self.get_mut(field) = validation::validate_quantity(field, value)?;
        Ok(())
    }

    fn get_mut(&mut self, field: InputField) -> &mut Quantity {
        match field {
            InputField::ProductCost => &mut self.product_cost,
            InputField::SellingPrice => &mut self.selling_price,
            InputField::MonthlyOrders => &mut self.monthly_orders,
            InputField::ShippingCostPerOrder => &mut self.shipping_cost_per_order,
            InputField::MarketingBudget => &mut self.marketing_budget,
            InputField::AppSubscriptionCost => &mut self.app_subscription_cost,
            InputField::StaffCost => &mut self.staff_cost,
        }
    }
}

// =============================================================================
// Input Fields (raw)
// =============================================================================

/// Raw numbers as parsed by the presentation layer's form widgets.
///
/// Converted into [`StoreInputs`] with `TryFrom`, which rejects NaN,
/// infinity and negatives.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InputFields {
    pub product_cost: f64,
    pub selling_price: f64,
    pub monthly_orders: f64,
    pub shipping_cost_per_order: f64,
    pub marketing_budget: f64,
    pub app_subscription_cost: f64,
    pub staff_cost: f64,
}

impl InputFields {
    /// Returns the raw value for a field.
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::ProductCost => self.product_cost,
            InputField::SellingPrice => self.selling_price,
            InputField::MonthlyOrders => self.monthly_orders,
            InputField::ShippingCostPerOrder => self.shipping_cost_per_order,
            InputField::MarketingBudget => self.marketing_budget,
            InputField::AppSubscriptionCost => self.app_subscription_cost,
            InputField::StaffCost => self.staff_cost,
        }
    }
}

impl TryFrom<InputFields> for StoreInputs {
    type Error = ValidationError;

    fn try_from(fields: InputFields) -> Result<Self, Self::Error> {
        let mut inputs = StoreInputs::default();
        for field in InputField::ALL {
            inputs.set(field, fields.get(field))?;
        }
        Ok(inputs)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_complement() {
        assert_eq!(Rate::from_bps(1500).complement().bps(), 8500);
        assert_eq!(Rate::ONE.complement(), Rate::zero());
        assert_eq!(Rate::from_bps(12_000).complement(), Rate::zero());
    }

    #[test]
    fn test_percentage_ratio_decimals() {
        let part = Money::from_cents(1);
        let whole = Money::from_cents(3);
        assert_eq!(Percentage::ratio(part, whole, 2).hundredths(), 3333);
        assert_eq!(Percentage::ratio(part, whole, 1).hundredths(), 3330);
        assert_eq!(Percentage::ratio(part, whole, 0).hundredths(), 3300);
    }

    #[test]
    fn test_percentage_ratio_saturates() {
        let huge = Money::from_cents(i64::MAX);
        let tiny = Money::from_cents(1);
        assert_eq!(Percentage::ratio(huge, tiny, 2).hundredths(), i64::MAX);
        assert_eq!(
            Percentage::ratio(Money::from_cents(-i64::MAX), tiny, 2).hundredths(),
            i64::MIN
        );
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::from_hundredths(-1368).to_string(), "-13.68%");
        assert_eq!(Percentage::from_whole(30).to_string(), "30.00%");
        assert_eq!(Percentage::from_hundredths(5).to_string(), "0.05%");
    }

    #[test]
    fn test_billing_period_parsing() {
        assert_eq!("monthly".parse::<BillingPeriod>().unwrap(), BillingPeriod::Monthly);
        assert_eq!(" Yearly ".parse::<BillingPeriod>().unwrap(), BillingPeriod::Yearly);
        assert_eq!(
            "weekly".parse::<BillingPeriod>(),
            Err(CoreError::BillingPeriodNotFound("weekly".to_string()))
        );
        assert_eq!(BillingPeriod::from_yearly_flag(true), BillingPeriod::Yearly);
        assert_eq!(BillingPeriod::default(), BillingPeriod::Monthly);
    }

    #[test]
    fn test_input_field_parsing() {
        assert_eq!("selling_price".parse::<InputField>().unwrap(), InputField::SellingPrice);
        assert_eq!("monthly-orders".parse::<InputField>().unwrap(), InputField::MonthlyOrders);
        assert!("tax_rate".parse::<InputField>().unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_is_atomic_on_error() {
        let mut inputs = StoreInputs::default();
        inputs.set(InputField::MonthlyOrders, 100.0).unwrap();

        assert!(inputs.set(InputField::MonthlyOrders, f64::NAN).is_err());
        assert!(inputs.set(InputField::MonthlyOrders, -1.0).is_err());
        assert_eq!(inputs.monthly_orders, Quantity::from_units(100));
    }

    #[test]
    fn test_set_accepts_fractional_orders() {
        let mut inputs = StoreInputs::industry_averages();
        inputs.set(InputField::MonthlyOrders, 10.5).unwrap();
        assert_eq!(inputs.monthly_orders.micros(), 10_500_000);

        inputs.set(InputField::MonthlyOrders, 2_000_000.0).unwrap();
        assert_eq!(inputs.get(InputField::MonthlyOrders), Quantity::from_units(2_000_000));
    }

    #[test]
    fn test_field_metadata() {
        assert_eq!(InputField::MonthlyOrders.label(), "Expected Monthly Orders");
        assert!(InputField::MonthlyOrders.is_count());
        assert!(InputField::ALL.iter().filter(|f| f.is_count()).count() == 1);
        assert!(InputField::ALL.iter().all(|f| !f.help_text().is_empty()));
    }

    #[test]
    fn test_try_from_input_fields() {
        let fields = InputFields {
            product_cost: 20.0,
            selling_price: 49.99,
            monthly_orders: 100.0,
            shipping_cost_per_order: 8.99,
            marketing_budget: 500.0,
            app_subscription_cost: 63.0,
            staff_cost: 2000.0,
        };
        let inputs = StoreInputs::try_from(fields).unwrap();
        assert_eq!(inputs.selling_price, Quantity::from_cents(4999));
        assert_eq!(inputs.shipping_cost_per_order, Quantity::from_cents(899));
        assert_eq!(inputs.monthly_orders, Quantity::from_units(100));
        assert_eq!(inputs.get(InputField::StaffCost), Quantity::from_units(2000));
        assert_eq!(inputs, StoreInputs::industry_averages());
    }

    #[test]
    fn test_try_from_rejects_infinite() {
        let fields = InputFields {
            marketing_budget: f64::INFINITY,
            ..InputFields::default()
        };
        let err = StoreInputs::try_from(fields).unwrap_err();
        assert_eq!(err.field(), "marketing_budget");
    }
}
