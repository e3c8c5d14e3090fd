//! Text output: tables, the usage chart and the status sections.

use getrouter_core::{AggregatedUsage, AuthStatus, Subscription};

// ============================================================================
// Tables
// ============================================================================

/// Column cap used when a command does not pick one.
pub const DEFAULT_MAX_COL_WIDTH: usize = 32;

const COLUMN_GAP: &str = "  ";

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return value.chars().take(max).collect();
    }
    let head: String = value.chars().take(max - 3).collect();
    format!("{head}...")
}

/// Renders rows under `headers` as aligned columns.
///
/// Empty cells print as `-`; columns are as wide as their widest cell up to
/// `max_col_width`, longer cells end in `...`.
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_col_width: usize) -> String {
    let normalized: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| {
            (0..headers.len())
                .map(|index| match row.get(index) {
                    Some(cell) if !cell.is_empty() => cell.as_str(),
                    _ => "-",
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            normalized
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
                .min(max_col_width)
        })
        .collect();

    let render_row = |cells: &[&str]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", truncate(cell, width)))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
    };

    let header = render_row(headers);
    let body = normalized
        .iter()
        .map(|row| render_row(row))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{header}\n{body}")
}

// ============================================================================
// Usage Chart
// ============================================================================

/// Bar width of [`render_usage_chart`].
pub const DEFAULT_CHART_WIDTH: usize = 24;

const CHART_HEADER: &str = "📊 Usage (last 7 days) · Tokens";
const BAR_BLOCK: char = '█';

/// Short token count: `950`, `1.5K`, `12M`, `3B`.
#[allow(clippy::cast_possible_truncation)]
pub fn format_tokens(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    let abs = value.abs();
    for (threshold, suffix) in UNITS {
        if abs >= threshold {
            let scaled = value / threshold;
            let decimals = usize::from(scaled.abs() < 10.0);
            let mut output = format!("{scaled:.decimals$}");
            if let Some(stripped) = output.strip_suffix(".0") {
                output = stripped.to_string();
            }
            return format!("{output}{suffix}");
        }
    }
    format!("{}", value.round() as i64)
}

/// Horizontal bar chart of daily token totals, bars scaled to the busiest
/// day.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_usage_chart(rows: &[AggregatedUsage], width: usize) -> String {
    if rows.is_empty() {
        return format!("{CHART_HEADER}\n\nNo usage data available.");
    }

    let total = |row: &AggregatedUsage| {
        if row.total_tokens.is_finite() {
            row.total_tokens
        } else {
            0.0
        }
    };
    let max_total = rows.iter().map(total).fold(0.0_f64, f64::max);

    let mut lines = vec![CHART_HEADER.to_string(), String::new()];
    for row in rows {
        let value = total(row);
        if max_total == 0.0 || value == 0.0 {
            lines.push(format!("{} {} 0", row.day, " ".repeat(width)));
            continue;
        }
        let scaled = ((value / max_total) * width as f64).round().max(1.0) as usize;
        let bar: String = std::iter::repeat_n(BAR_BLOCK, scaled).collect();
        lines.push(format!("{} {bar:<width$} {}", row.day, format_tokens(value)));
    }
    lines.join("\n")
}

// ============================================================================
// Status Sections
// ============================================================================

const LABEL_WIDTH: usize = 10;

fn format_line(label: &str, value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| format!("  {label:<LABEL_WIDTH$}: {value}"))
}

/// Token preview: short tokens whole, longer ones as `abcd...wxyz`.
fn format_token(token: &str) -> String {
    let trimmed = token.trim();
    let count = trimmed.chars().count();
    if count <= 12 {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(4).collect();
    let tail: String = trimmed.chars().skip(count - 4).collect();
    format!("{head}...{tail}")
}

fn format_window(start_at: Option<&str>, end_at: Option<&str>) -> Option<String> {
    let start_at = start_at.filter(|s| !s.is_empty());
    let end_at = end_at.filter(|s| !s.is_empty());
    match (start_at, end_at) {
        (Some(start), Some(end)) => Some(format!("{start} → {end}")),
        (Some(start), None) => Some(format!("{start} →")),
        (None, Some(end)) => Some(format!("→ {end}")),
        (None, None) => None,
    }
}

fn format_limits(subscription: &Subscription) -> Option<String> {
    let plan = subscription.plan.as_ref()?;
    let mut parts = Vec::new();
    if let Some(requests) = plan.request_per_minute {
        parts.push(format!("{requests} req/min"));
    }
    if let Some(tokens) = &plan.token_per_minute {
        let tokens = tokens.to_string();
        if !tokens.is_empty() && tokens != "0" {
            parts.push(format!("{tokens} tok/min"));
        }
    }
    (!parts.is_empty()).then(|| parts.join(" · "))
}

/// The `🔐 Auth` block of `getrouter status`.
pub fn render_auth_section(status: &AuthStatus) -> String {
    let mut lines = vec!["🔐 Auth".to_string()];
    match status {
        AuthStatus::LoggedOut => lines.extend(format_line("Status", Some("❌ Logged out"))),
        AuthStatus::LoggedIn {
            expires_at,
            access_token,
            refresh_token,
            token_type,
        } => {
            let access = format_token(access_token);
            let refresh = format_token(refresh_token);
            lines.extend(
                [
                    format_line("Status", Some("✅ Logged in")),
                    format_line("Expires", Some(expires_at)),
                    format_line("TokenType", Some(token_type)),
                    format_line("Access", Some(&access)),
                    format_line("Refresh", Some(&refresh)),
                ]
                .into_iter()
                .flatten(),
            );
        }
    }
    lines.join("\n")
}

/// The `📦 Subscription` block of `getrouter status`.
pub fn render_subscription_section(subscription: Option<&Subscription>) -> String {
    let mut lines = vec!["📦 Subscription".to_string()];
    let Some(subscription) = subscription else {
        lines.extend(format_line("Status", Some("No active subscription")));
        return lines.join("\n");
    };

    let plan_name = subscription.plan.as_ref().and_then(|plan| plan.name.as_deref());
    let window = format_window(subscription.start_at.as_deref(), subscription.end_at.as_deref());
    let limits = format_limits(subscription);
    lines.extend(
        [
            format_line("Plan", plan_name),
            format_line("Status", subscription.status.as_deref()),
            format_line("Window", window.as_deref()),
            format_line("Limits", limits.as_deref()),
        ]
        .into_iter()
        .flatten(),
    );
    lines.join("\n")
}
