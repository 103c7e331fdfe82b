//! # shopcalc-core: Pricing & Projection Engine
//!
//! This crate is the calculation engine behind the ShopCalc storefront cost
//! calculator. It contains every formula as a pure function with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShopCalc Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation Layer (charts, tables)            │   │
//! │  │    Input form ──► Cost breakdown ──► Annual projection          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ StoreInputs + plan id + billing       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopcalc-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │ breakdown │  │ projection │  │ validation│  │   │
//! │  │   │  PlanTier │  │ Revenue   │  │ 12 months  │  │  finite   │  │   │
//! │  │   │  Rates    │  │ Costs     │  │ Totals     │  │  >= 0     │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RETAINED STATE • PURE FUNCTIONS                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`quantity`] - Exact six-decimal values for user-entered numbers
//! - [`types`] - Rates, percentages, billing period, store inputs
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation for user-entered numbers
//! - [`catalog`] - Subscription plan tiers
//! - [`seasonality`] - Seasonal modifiers and discount rates
//! - [`breakdown`] - Current-month revenue, costs, profit and margin
//! - [`projection`] - Twelve-month seasonal projection
//! - [`composition`] - Fixed vs. variable cost grouping
//! - [`averages`] - Industry-average preset inputs
//! - [`report`] - One-call facade for the presentation layer
//!
//! ## Example Usage
//!
//! ```rust
//! use shopcalc_core::{build_report, StoreInputs};
//!
//! let inputs = StoreInputs::industry_averages();
//! let report = build_report(&inputs, "basic", "monthly").unwrap();
//!
//! assert_eq!(report.breakdown.revenue.cents(), 499_900);
//! assert_eq!(report.breakdown.total_costs.cents(), 568_297);
//! assert_eq!(report.projection.months.len(), 12);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod averages;
pub mod breakdown;
pub mod catalog;
pub mod composition;
pub mod error;
pub mod money;
pub mod projection;
pub mod quantity;
pub mod report;
pub mod seasonality;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use averages::{essential_apps_total, AppSubscription, StaffingLevel, ESSENTIAL_APPS};
pub use breakdown::{compute_breakdown, CostBreakdown};
pub use catalog::{all_plans, lookup_plan, PlanId, PlanTier};
pub use composition::{compute_composition, revenue_split, CostComposition, RevenueSplit};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use projection::{project_year, AnnualProjection, AnnualTotals, MonthlyProjection};
pub use quantity::{Quantity, QuantityError};
pub use report::{build_report, build_report_for, CalculatorReport};
pub use seasonality::{seasonal_calendar, CalendarMonth, Season, SeasonalMonth};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed fee charged per order on top of the plan's percentage rate (30¢).
///
/// Independent of plan tier.
pub const PER_ORDER_FIXED_FEE: Money = Money::from_cents(30);

/// Largest magnitude of any derived monthly figure, in cents.
///
/// Inputs themselves are only limited by [`Quantity`]'s range. Monthly
/// figures above this limit fail with `Unrepresentable`, so that scaling a
/// month by the peak seasonal modifier and summing twelve of them still fits
/// in `i64` cents.
pub const MAX_TOTAL_CENTS: i64 = i64::MAX / 32;

/// Number of calendar slots in an annual projection.
pub const MONTHS_PER_YEAR: usize = 12;
