//! # State Module
//!
//! Host-side state for the calculator.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │    CalculatorState       │        │    CalculatorConfig      │      │
//! │  │                          │        │                          │      │
//! │  │  Arc<Mutex<Session>>     │◄───────│  defaults.plan           │      │
//! │  │  inputs, plan, billing   │ seeds  │  defaults.billing        │      │
//! │  │                          │        │  output.pretty           │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │                                                                         │
//! │  CalculatorState: mutated by commands, copied out as snapshots         │
//! │  CalculatorConfig: read-only after startup                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{CalculatorConfig, ConfigError, ConfigResult, DefaultsConfig, OutputConfig};
pub use session::{CalculatorState, Session};
