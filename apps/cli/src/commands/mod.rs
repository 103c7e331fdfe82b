//! # Commands Module
//!
//! Every operation the presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── plans.rs       ◄─── Plan selector data
//! └── calculator.rs  ◄─── Session updates, breakdown, projection, report
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  shopcalc --averages --plan shopify projection                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn get_projection(                                                     │
//! │      state: &CalculatorState,   ◄── Session seeded from config + flags │
//! │  ) -> Result<AnnualProjection, ApiError>                                │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  stdout: { "months": [...], "totals": {...} }                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod calculator;
pub mod plans;
