//! Token usage records and their per-day aggregation.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

// ============================================================================
// Token Count
// ============================================================================

/// A token count the API may encode either as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenCount {
    /// JSON number.
    Number(f64),
    /// Numeric string (64-bit integers are sent this way).
    Text(String),
}

impl TokenCount {
    /// Numeric value, if finite.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for TokenCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

fn count(value: Option<&TokenCount>) -> f64 {
    value.and_then(TokenCount::value).unwrap_or(0.0)
}

// ============================================================================
// Raw Usage
// ============================================================================

/// One usage record as returned by the usages endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUsage {
    /// RFC 3339 timestamp of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Prompt tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<TokenCount>,
    /// Completion tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<TokenCount>,
    /// Total tokens, when the API computed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<TokenCount>,
}

// ============================================================================
// Aggregated Usage
// ============================================================================

/// Usage totals for one local calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedUsage {
    /// Day as `YYYY-MM-DD` in local time.
    pub day: String,
    /// Prompt tokens.
    pub input_tokens: f64,
    /// Completion tokens.
    pub output_tokens: f64,
    /// Total tokens.
    pub total_tokens: f64,
    /// Number of records.
    pub requests: u64,
}

/// Groups usage records by local day, newest day first, keeping at most
/// `max_days` days.
///
/// Records without a parsable `createdAt` are skipped. A missing or
/// non-positive total falls back to input plus output.
pub fn aggregate_usages(usages: &[RawUsage], max_days: usize) -> Vec<AggregatedUsage> {
    let mut totals: BTreeMap<String, AggregatedUsage> = BTreeMap::new();

    for usage in usages {
        let Some(created_at) = usage
            .created_at
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        else {
            continue;
        };
        let day = created_at.with_timezone(&Local).format("%Y-%m-%d").to_string();

        let input = count(usage.input_tokens.as_ref());
        let output = count(usage.output_tokens.as_ref());
        let total = usage
            .total_tokens
            .as_ref()
            .and_then(TokenCount::value)
            .filter(|total| *total > 0.0)
            .unwrap_or(input + output);

        let entry = totals.entry(day.clone()).or_insert_with(|| AggregatedUsage {
            day,
            ..AggregatedUsage::default()
        });
        entry.input_tokens += input;
        entry.output_tokens += output;
        entry.total_tokens += total;
        entry.requests += 1;
    }

    totals.into_values().rev().take(max_days).collect()
}
