//! Threshold table configuration
//!
//! Parsed once at startup from a JSON array and immutable afterwards. Each
//! element is either a bare number, `[threshold]`, or `[threshold, action]`.

use serde_json::Value;
use thiserror::Error;

/// A single configured threshold and the command to run when it is crossed.
///
/// An empty action means the crossing is recorded but no command is spawned.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdEntry {
    pub threshold: f64,
    pub action: String,
}

/// Ordered collection of thresholds, sorted ascending by value.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    entries: Vec<ThresholdEntry>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threshold configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("threshold configuration must be a JSON array")]
    NotArray,

    #[error("invalid threshold entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("duplicate threshold {0} in configuration")]
    DuplicateThreshold(f64),
}

impl ThresholdTable {
    /// Parse and validate the startup configuration string.
    ///
    /// Entries are normalized to `(threshold, action)` with a missing action
    /// becoming the empty string, then stably sorted ascending by threshold.
    /// Duplicate threshold values are rejected.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(raw)?;
        let items = value.as_array().ok_or(ConfigError::NotArray)?;

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            entries.push(parse_entry(index, item)?);
        }

        // JSON numbers are always finite, so total_cmp matches numeric order.
        entries.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

        for pair in entries.windows(2) {
            if pair[0].threshold == pair[1].threshold {
                return Err(ConfigError::DuplicateThreshold(pair[1].threshold));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ThresholdEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Thresholds newly crossed when the tracked cost moves from `last` to
    /// `cost`: those with `last < threshold <= cost`, in ascending order.
    pub fn crossed(&self, last: f64, cost: f64) -> impl Iterator<Item = &ThresholdEntry> {
        self.entries
            .iter()
            .filter(move |e| last < e.threshold && e.threshold <= cost)
    }
}

fn parse_entry(index: usize, item: &Value) -> Result<ThresholdEntry, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEntry {
        index,
        reason: reason.to_string(),
    };

    match item {
        Value::Number(n) => {
            let threshold = n.as_f64().ok_or_else(|| invalid("number out of range"))?;
            Ok(ThresholdEntry {
                threshold,
                action: String::new(),
            })
        }
        Value::Array(parts) => {
            if parts.is_empty() || parts.len() > 2 {
                return Err(invalid("array must have 1 or 2 elements"));
            }
            let threshold = parts[0]
                .as_f64()
                .ok_or_else(|| invalid("first element must be a number"))?;
            let action = match parts.get(1) {
                None => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(_) => return Err(invalid("second element must be a string")),
            };
            Ok(ThresholdEntry { threshold, action })
        }
        _ => Err(invalid("expected a number or a [threshold, action] array")),
    }
}
