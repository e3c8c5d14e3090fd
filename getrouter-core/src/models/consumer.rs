//! API keys ("consumers") and the models they can reach.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Consumer
// ============================================================================

/// An API key as returned by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumer {
    /// Key id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether requests with this key are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// The secret key itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Last time the key was used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Label used for keys without a name.
pub const UNNAMED_CONSUMER: &str = "(unnamed)";

impl Consumer {
    /// Trimmed name, or `(unnamed)`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_CONSUMER)
    }

    /// `updatedAt`, else `createdAt`, else `-`.
    pub fn display_timestamp(&self) -> &str {
        self.updated_at
            .as_deref()
            .or(self.created_at.as_deref())
            .unwrap_or("-")
    }

    /// Milliseconds since the epoch of the last change (0 when unknown).
    pub fn updated_at_millis(&self) -> i64 {
        let parse = |value: Option<&str>| {
            value
                .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
                .map_or(0, |dt| dt.timestamp_millis())
        };
        match parse(self.updated_at.as_deref()) {
            0 => parse(self.created_at.as_deref()),
            millis => millis,
        }
    }
}

/// Sorts keys by last change, newest first. Keys without timestamps go last.
pub fn sort_consumers_by_updated_at_desc(consumers: &mut [Consumer]) {
    consumers.sort_by_key(|consumer| std::cmp::Reverse(consumer.updated_at_millis()));
}

// ============================================================================
// Model
// ============================================================================

/// A model listed by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Model id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Whether the model can be used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
