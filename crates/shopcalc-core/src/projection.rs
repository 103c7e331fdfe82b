//! # Seasonal Projection
//!
//! Projects a baseline month across the calendar year.
//!
//! ## Per-Month Rule
//! ```text
//!   revenue = round$(baseline_revenue × modifier × (1 − discount[season]))
//!   costs   = round$(baseline_costs   × modifier)
//!   profit  = revenue − costs
//!   margin  = round(profit / revenue × 100)        (0 if revenue is 0)
//! ```
//!
//! `round$` rounds to the nearest whole currency unit, half away from zero.
//!
//! ## Accumulation Order
//! Annual totals are sums of the already-rounded months; the annual margin is
//! recomputed from those totals, never averaged across months. Summing exact
//! values first gives different totals than the monthly table shows.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::seasonality::{seasonal_month, CalendarMonth, Season, SeasonalMonth};
use crate::types::Percentage;
use crate::MONTHS_PER_YEAR;

/// Projection margins are whole percents.
const MARGIN_DECIMALS: u32 = 0;

// =============================================================================
// Output Types
// =============================================================================

/// One projected calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct MonthlyProjection {
    pub month: CalendarMonth,

    #[ts(as = "String")]
    pub name: &'static str,

    pub season: Season,
    pub revenue: Money,
    pub costs: Money,
    pub profit: Money,
    pub profit_margin_percent: Percentage,
}

/// Sums across the twelve projected months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
pub struct AnnualTotals {
    pub revenue: Money,
    pub costs: Money,
    pub profit: Money,
    pub profit_margin_percent: Percentage,
}

/// Twelve months in calendar order plus the annual totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AnnualProjection {
    #[ts(as = "Vec<MonthlyProjection>")]
    pub months: [MonthlyProjection; MONTHS_PER_YEAR],
    pub totals: AnnualTotals,
}

impl AnnualProjection {
    /// Returns the projection for one month.
    pub fn month(&self, month: CalendarMonth) -> &MonthlyProjection {
        &self.months[month as usize]
    }

    /// Months that lose money.
    pub fn loss_months(&self) -> impl Iterator<Item = &MonthlyProjection> {
        self.months.iter().filter(|m| m.profit.is_negative())
    }

    /// The month with the highest profit (earliest on ties).
    pub fn best_month(&self) -> &MonthlyProjection {
        self.months
            .iter()
            .reduce(|best, m| if m.profit > best.profit { m } else { best })
            .unwrap_or(&self.months[0])
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Projects one month from the baseline figures.
pub fn project_month(
    slot: &SeasonalMonth,
    baseline_revenue: Money,
    baseline_costs: Money,
) -> MonthlyProjection {
    let revenue = baseline_revenue.scale_to_units(&[slot.modifier, slot.revenue_retention()]);
    let costs = baseline_costs.scale_to_units(&[slot.modifier]);
    let profit = revenue - costs;

    MonthlyProjection {
        month: slot.month,
        name: slot.name,
        season: slot.season,
        revenue,
        costs,
        profit,
        profit_margin_percent: Percentage::ratio(profit, revenue, MARGIN_DECIMALS),
    }
}

/// Projects the baseline month across all twelve calendar months.
///
/// Baselines are normally `CostBreakdown::revenue` and
/// `CostBreakdown::total_costs`, whose magnitude never exceeds
/// [`MAX_TOTAL_CENTS`](crate::MAX_TOTAL_CENTS); within that range the table
/// is total and this cannot fail or overflow.
///
/// ## Example
/// ```rust
/// use shopcalc_core::money::Money;
/// use shopcalc_core::projection::project_year;
/// use shopcalc_core::seasonality::CalendarMonth;
///
/// let projection = project_year(Money::from_cents(499_900), Money::from_cents(568_297));
/// let november = projection.month(CalendarMonth::November);
///
/// assert_eq!(november.revenue, Money::from_units(5249));
/// assert_eq!(november.costs, Money::from_units(8524));
/// assert_eq!(november.profit, Money::from_units(-3275));
/// ```
pub fn project_year(baseline_revenue: Money, baseline_costs: Money) -> AnnualProjection {
    let months = CalendarMonth::ALL
        .map(|month| project_month(&seasonal_month(month), baseline_revenue, baseline_costs));

    AnnualProjection {
        totals: sum_months(&months),
        months,
    }
}

fn sum_months(months: &[MonthlyProjection]) -> AnnualTotals {
    let revenue: Money = months.iter().map(|m| m.revenue).sum();
    let costs: Money = months.iter().map(|m| m.costs).sum();
    let profit: Money = months.iter().map(|m| m.profit).sum();

    AnnualTotals {
        revenue,
        costs,
        profit,
        profit_margin_percent: Percentage::ratio(profit, revenue, MARGIN_DECIMALS),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
