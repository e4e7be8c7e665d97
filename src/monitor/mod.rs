//! Cost tracking and threshold crossing
//!
//! [`CostMonitor`] owns the one piece of process state: the last cost value
//! that was fully processed. Evaluation, action execution, and the commit of
//! the new cost all happen under a single lock so concurrent notifications
//! cannot double-trigger or skip a threshold.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::exec::{ActionRunner, ExecError};
use crate::thresholds::ThresholdTable;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("action for threshold {threshold} failed: {source}")]
    ActionFailed {
        threshold: f64,
        #[source]
        source: ExecError,
    },
}

/// Result of one successfully processed notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    /// Thresholds crossed by this notification, ascending.
    pub crossed: Vec<f64>,
    pub cost: f64,
}

pub struct CostMonitor {
    table: ThresholdTable,
    runner: Arc<dyn ActionRunner>,
    // None until the first notification commits; treated as 0 for comparison.
    last_cost: Mutex<Option<f64>>,
}

impl CostMonitor {
    pub fn new(table: ThresholdTable, runner: Arc<dyn ActionRunner>) -> Self {
        Self {
            table,
            runner,
            last_cost: Mutex::new(None),
        }
    }

    /// The last committed cost, if any notification has been processed.
    pub fn last_cost(&self) -> Option<f64> {
        *self.last_cost.lock()
    }

    /// Process one notification: evaluate crossings against the last committed
    /// cost, run each crossed threshold's action in ascending order, then
    /// commit the new cost.
    ///
    /// The first failing action aborts the pass and leaves the tracked cost
    /// untouched, so every threshold from this pass is re-evaluated on the
    /// next successful notification.
    pub fn process(&self, cost: f64, currency: &str) -> Result<ProcessOutcome, MonitorError> {
        let mut last_cost = self.last_cost.lock();
        let last = last_cost.unwrap_or(0.0);

        let mut crossed = Vec::new();
        for entry in self.table.crossed(last, cost) {
            tracing::warn!(
                threshold = entry.threshold,
                cost,
                currency,
                "cost threshold crossed"
            );

            if entry.action.is_empty() {
                crossed.push(entry.threshold);
                continue;
            }

            if let Err(source) = self.runner.run(&entry.action) {
                tracing::error!(
                    threshold = entry.threshold,
                    action = %entry.action,
                    error = %source,
                    "threshold action failed, cost not committed"
                );
                return Err(MonitorError::ActionFailed {
                    threshold: entry.threshold,
                    source,
                });
            }
            crossed.push(entry.threshold);
        }

        *last_cost = Some(cost);
        tracing::info!(cost, currency, crossed = crossed.len(), "cost updated");

        Ok(ProcessOutcome { crossed, cost })
    }
}
