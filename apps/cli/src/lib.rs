//! # ShopCalc CLI Library
//!
//! Command-line host for the ShopCalc engine. It stands where the charting
//! frontend would: it owns the session, applies user input, and prints the
//! engine's output as JSON.
//!
//! ## Module Organization
//! ```text
//! shopcalc_cli_lib/
//! ├── lib.rs          ◄─── You are here (CLI definition & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Session (inputs, plan, billing) behind a mutex
//! │   └── config.rs   ◄─── shopcalc.toml + SHOPCALC_* overrides
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── plans.rs    ◄─── Plan selector data
//! │   └── calculator.rs ◄─ Input updates, breakdown, projection, report
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Output Channels
//! - stdout: exactly one JSON document (the response or an `ApiError`)
//! - stderr: tracing logs

pub mod commands;
pub mod error;
pub mod state;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shopcalc_core::{InputField, StaffingLevel};

use commands::{calculator, plans};
use error::ApiError;
use state::{CalculatorConfig, CalculatorState};

// =============================================================================
// CLI Definition
// =============================================================================

/// Storefront subscription cost calculator.
#[derive(Debug, Parser)]
#[command(name = "shopcalc", version, about, allow_negative_numbers = true)]
pub struct Cli {
    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Plan id: basic, shopify or advanced
    #[arg(long)]
    pub plan: Option<String>,

    /// Billing period: monthly or yearly
    #[arg(long)]
    pub billing: Option<String>,

    /// Start from the industry averages preset
    #[arg(long)]
    pub averages: bool,

    /// Use full-time staffing in the industry averages preset
    #[arg(long, requires = "averages")]
    pub full_time_staff: bool,

    /// Pretty-print the JSON response
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub inputs: InputArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// One flag per store input; each overrides the preset or config value.
#[derive(Debug, Default, Args)]
pub struct InputArgs {
    #[arg(long, value_name = "AMOUNT")]
    pub product_cost: Option<f64>,

    #[arg(long, value_name = "AMOUNT")]
    pub selling_price: Option<f64>,

    #[arg(long, value_name = "COUNT")]
    pub monthly_orders: Option<f64>,

    #[arg(long, value_name = "AMOUNT")]
    pub shipping_cost_per_order: Option<f64>,

    #[arg(long, value_name = "AMOUNT")]
    pub marketing_budget: Option<f64>,

    #[arg(long, value_name = "AMOUNT")]
    pub app_subscription_cost: Option<f64>,

    #[arg(long, value_name = "AMOUNT")]
    pub staff_cost: Option<f64>,
}

impl InputArgs {
    /// Returns the flags that were given, in form order.
    pub fn provided(&self) -> Vec<(InputField, f64)> {
        InputField::ALL
            .into_iter()
            .filter_map(|field| self.value(field).map(|value| (field, value)))
            .collect()
    }

    fn value(&self, field: InputField) -> Option<f64> {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List plans priced for the selected billing period
    Plans,
    /// Current-month revenue, costs, profit and margin
    Breakdown,
    /// Twelve-month seasonal projection
    Projection,
    /// Fixed vs. variable cost groups and revenue split
    Composition,
    /// Breakdown, composition and projection together
    Report,
    /// Show the industry averages preset
    Averages,
    /// Labels and help text for every input field
    Fields,
}

// =============================================================================
// Entry Point
// =============================================================================

/// Runs the CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (stderr, RUST_LOG or info,shopcalc=debug)       │
/// │  2. Parse arguments                                                     │
/// │  3. Load configuration (file → SHOPCALC_* env → validate)               │
/// │  4. Seed the session: preset → plan → billing → input flags             │
/// │  5. Run the command and print one JSON document on stdout               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    info!(command = ?cli.command, "Starting ShopCalc");

    let result = load_config(&cli).and_then(|config| {
        let pretty = cli.pretty || config.output.pretty;
        execute(&cli, &config).map(|response| (response, pretty))
    });

    match result {
        Ok((response, pretty)) => match render(&response, pretty) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(err) => report_error(err),
        },
        Err(err) => report_error(err),
    }
}

/// An explicit `--config` path must exist and load; the default location may
/// be absent or broken, in which case defaults apply.
fn load_config(cli: &Cli) -> Result<CalculatorConfig, ApiError> {
    match &cli.config {
        Some(path) => Ok(CalculatorConfig::load(Some(path.clone()))?),
        None => Ok(CalculatorConfig::load_or_default(None)),
    }
}

/// Seeds a session from config and flags, then runs the command.
pub fn execute(cli: &Cli, config: &CalculatorConfig) -> Result<serde_json::Value, ApiError> {
    let state = CalculatorState::default();

    if cli.averages || config.defaults.use_industry_averages {
        let staffing = if cli.full_time_staff {
            StaffingLevel::FullTime
        } else {
            StaffingLevel::PartTime
        };
        calculator::use_industry_averages(&state, staffing);
    }

    calculator::select_plan(&state, cli.plan.as_deref().unwrap_or(&config.defaults.plan))?;
    calculator::set_billing(
        &state,
        cli.billing.as_deref().unwrap_or(&config.defaults.billing),
    )?;

    for (field, value) in cli.inputs.provided() {
        calculator::update_input(&state, field.as_str(), value)?;
    }

    match cli.command {
        Command::Plans => to_json(plans::list_plans(&state)),
        Command::Breakdown => to_json(calculator::get_breakdown(&state)?),
        Command::Projection => to_json(calculator::get_projection(&state)?),
        Command::Composition => to_json(calculator::get_composition(&state)?),
        Command::Report => to_json(calculator::get_report(&state)?),
        Command::Averages => to_json(calculator::get_industry_averages()),
        Command::Fields => to_json(calculator::list_fields()),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, ApiError> {
    Ok(serde_json::to_value(value)?)
}

fn render(value: &serde_json::Value, pretty: bool) -> Result<String, ApiError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

fn report_error(err: ApiError) -> ExitCode {
    warn!(code = ?err.code, "{}", err.message);

    match serde_json::to_string(&err) {
        Ok(json) => println!("{}", json),
        Err(_) => println!(r#"{{"code":"INTERNAL","message":"Failed to serialize error"}}"#),
    }

    ExitCode::from(err.code.exit_code() as u8)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopcalc=trace` - Show trace for shopcalc crates only
/// - Default: `info,shopcalc=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopcalc=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn run_args(args: &[&str]) -> Result<serde_json::Value, ApiError> {
        let cli = Cli::try_parse_from(std::iter::once("shopcalc").chain(args.iter().copied()))
            .unwrap();
        execute(&cli, &CalculatorConfig::default())
    }

    #[test]
    fn test_breakdown_with_averages() {
        let json = run_args(&["--averages", "breakdown"]).unwrap();
        assert_eq!(json["revenue"], 499_900);
        assert_eq!(json["total_costs"], 568_297);
        assert_eq!(json["profit_margin_percent"], -1368);
    }

    #[test]
    fn test_flags_override_preset() {
        let json = run_args(&[
            "--averages",
            "--plan",
            "advanced",
            "--billing",
            "yearly",
            "--monthly-orders",
            "200",
            "breakdown",
        ])
        .unwrap();
        assert_eq!(json["revenue"], 999_800);
        assert_eq!(json["plan_cost"], 38_900);
    }

    #[test]
    fn test_config_defaults_apply() {
        let config = CalculatorConfig::from_toml_str(
            "[defaults]\nplan = \"shopify\"\nuse_industry_averages = true\n",
        )
        .unwrap();
        let cli = Cli::try_parse_from(["shopcalc", "report"]).unwrap();
        let json = execute(&cli, &config).unwrap();

        assert_eq!(json["plan"]["id"], "shopify");
        assert_eq!(json["breakdown"]["revenue"], 499_900);
    }

    #[test]
    fn test_fractional_orders_flag() {
        let json = run_args(&["--averages", "--monthly-orders", "12.5", "breakdown"]).unwrap();
        // 49.99 × 12.5 = 624.875 → 624.88
        assert_eq!(json["revenue"], 62_488);
    }

    #[test]
    fn test_sub_cent_price_times_volume() {
        let json = run_args(&[
            "--selling-price",
            "0.125",
            "--monthly-orders",
            "1000",
            "breakdown",
        ])
        .unwrap();
        assert_eq!(json["revenue"], 12_500);
    }

    #[test]
    fn test_invalid_flag_value_is_rejected() {
        let err = run_args(&["--monthly-orders", "-12.5", "breakdown"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = run_args(&["--staff-cost", "-10", "breakdown"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = run_args(&["--plan", "platinum", "plans"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_projection_command() {
        let json = run_args(&["--averages", "projection"]).unwrap();
        assert_eq!(json["months"].as_array().unwrap().len(), 12);
        assert_eq!(json["months"][10]["revenue"], 524_900);
        assert_eq!(json["totals"]["revenue"], 5_273_800);
    }

    #[test]
    fn test_full_time_staff_requires_averages() {
        assert!(Cli::try_parse_from(["shopcalc", "--full-time-staff", "breakdown"]).is_err());

        let json = run_args(&["--averages", "--full-time-staff", "breakdown"]).unwrap();
        // 500 + 63 + 4000 + 51
        assert_eq!(json["fixed_costs"], 461_400);
    }

    #[test]
    fn test_fields_command() {
        let json = run_args(&["fields"]).unwrap();
        let fields = json.as_array().unwrap();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[2]["id"], "monthly_orders");
        assert_eq!(fields[2]["isCount"], true);
        assert_eq!(
            fields[2]["helpText"],
            "Estimated number of orders you expect per month"
        );
    }

    #[test]
    fn test_missing_explicit_config_is_config_error() {
        let path = std::env::temp_dir().join("shopcalc-missing-dir/shopcalc.toml");
        let cli = Cli::try_parse_from([
            "shopcalc",
            "--config",
            path.to_str().unwrap(),
            "breakdown",
        ])
        .unwrap();
        let err = load_config(&cli).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert_eq!(err.code.exit_code(), 3);
    }

    #[test]
    fn test_render() {
        let value = serde_json::json!({ "a": 1 });
        assert_eq!(render(&value, false).unwrap(), "{\"a\":1}");
        assert!(render(&value, true).unwrap().contains('\n'));
    }
}
