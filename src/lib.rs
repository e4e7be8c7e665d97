//! Costwatch: Billing Cost-Threshold Monitor
//!
//! A long-running HTTP service that receives billing cost push notifications,
//! tracks the last observed cumulative cost, and runs a configured shell
//! command once each time the cost crosses a threshold.
//!
//! # Behavior
//!
//! - **Thresholds**: a JSON array supplied at startup, each element a number
//!   or a `[threshold, action]` pair, validated and sorted ascending
//! - **Notifications**: `POST` with a `{"message": {"data": "<base64>"}}`
//!   envelope whose payload carries `costAmount` and `currencyCode`
//! - **Crossing**: a threshold fires when the cost moves from strictly below
//!   it to at or above it since the last committed observation
//! - **Commit**: the tracked cost only advances after every triggered action
//!   succeeded, so a failed action is retried on the next delivery
//!
//! # Example
//!
//! ```no_run
//! use costwatch::exec::ShellRunner;
//! use costwatch::monitor::CostMonitor;
//! use costwatch::thresholds::ThresholdTable;
//! use std::sync::Arc;
//!
//! let table = ThresholdTable::from_json(r#"[[100, "notify-billing-team"]]"#).unwrap();
//! let monitor = CostMonitor::new(table, Arc::new(ShellRunner));
//!
//! let outcome = monitor.process(150.0, "USD").unwrap();
//! assert_eq!(outcome.crossed, vec![100.0]);
//! ```

pub mod api;
pub mod exec;
pub mod monitor;
pub mod notification;
pub mod thresholds;

// Re-export commonly used types
pub use monitor::{CostMonitor, MonitorError};
pub use notification::{CostNotification, DecodeError};
pub use thresholds::{ConfigError, ThresholdTable};
