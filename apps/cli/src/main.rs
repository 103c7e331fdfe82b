//! # ShopCalc CLI
//!
//! Binary entry point. All logic lives in `shopcalc_cli_lib`.

use std::process::ExitCode;

fn main() -> ExitCode {
    shopcalc_cli_lib::run()
}
