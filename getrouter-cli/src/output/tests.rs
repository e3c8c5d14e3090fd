//! CLI output formatting tests.
//!
//! These tests pin the exact text of tables, the usage chart and the
//! status sections, and the shape of the JSON outputs.

#[cfg(test)]
mod table_tests {
    use super::super::text::render_table;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn test_columns_align_with_two_space_gap() {
        let output = render_table(&["ID", "NAME"], &[row(&["1", "alpha"]), row(&["22", "b"])], 32);
        assert_eq!(output, "ID  NAME \n1   alpha\n22  b    ");
    }

    #[test]
    fn test_empty_cells_render_dash() {
        let output = render_table(&["A", "B"], &[row(&["", "x"]), row(&["y"])], 32);
        assert_eq!(output, "A  B\n-  x\ny  -");
    }

    #[test]
    fn test_long_cells_truncated() {
        let output = render_table(&["KEY"], &[row(&["abcdefghij"])], 6);
        assert_eq!(output, "KEY   \nabc...");
    }

    #[test]
    fn test_width_counts_characters() {
        let output = render_table(&["N"], &[row(&["ü✓"])], 32);
        assert_eq!(output, "N \nü✓");
    }

    #[test]
    fn test_no_rows() {
        assert_eq!(render_table(&["ID", "NAME"], &[], 32), "ID  NAME\n");
    }
}

#[cfg(test)]
mod usage_chart_tests {
    use super::super::text::{format_tokens, render_usage_chart};
    use getrouter_core::AggregatedUsage;
    use pretty_assertions::assert_eq;

    fn day(day: &str, total: f64) -> AggregatedUsage {
        AggregatedUsage {
            day: day.to_string(),
            total_tokens: total,
            ..AggregatedUsage::default()
        }
    }

    #[test]
    fn test_format_tokens() {
        let cases = vec![
            (0.0, "0"),
            (999.4, "999"),
            (1_000.0, "1K"),
            (1_500.0, "1.5K"),
            (12_345.0, "12K"),
            (2_000_000.0, "2M"),
            (3_260_000_000.0, "3.3B"),
        ];
        for (value, expected) in cases {
            assert_eq!(format_tokens(value), expected, "Failed for {value}");
        }
    }

    #[test]
    fn test_empty_chart() {
        assert_eq!(
            render_usage_chart(&[], 24),
            "📊 Usage (last 7 days) · Tokens\n\nNo usage data available."
        );
    }

    #[test]
    fn test_bars_scaled_to_max() {
        let rows = vec![
            day("2026-01-03", 2_000.0),
            day("2026-01-02", 1_000.0),
            day("2026-01-01", 0.0),
        ];
        let output = render_usage_chart(&rows, 4);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "📊 Usage (last 7 days) · Tokens");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "2026-01-03 ████ 2K");
        assert_eq!(lines[3], "2026-01-02 ██   1K");
        assert_eq!(lines[4], "2026-01-01      0");
    }

    #[test]
    fn test_tiny_values_get_one_block() {
        let rows = vec![day("2026-01-02", 1_000_000.0), day("2026-01-01", 1.0)];
        let output = render_usage_chart(&rows, 10);
        assert!(output.ends_with("2026-01-01 █          1"));
    }
}

#[cfg(test)]
mod status_tests {
    use super::super::text::{render_auth_section, render_subscription_section};
    use getrouter_core::{AuthStatus, Plan, Subscription, TokenCount};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_logged_out() {
        assert_eq!(
            render_auth_section(&AuthStatus::LoggedOut),
            "🔐 Auth\n  Status    : ❌ Logged out"
        );
    }

    #[test]
    fn test_logged_in_masks_tokens() {
        let status = AuthStatus::LoggedIn {
            expires_at: "2026-02-01T00:00:00Z".into(),
            access_token: "access-token-0123456789".into(),
            refresh_token: "short".into(),
            token_type: "Bearer".into(),
        };
        assert_eq!(
            render_auth_section(&status),
            [
                "🔐 Auth",
                "  Status    : ✅ Logged in",
                "  Expires   : 2026-02-01T00:00:00Z",
                "  TokenType : Bearer",
                "  Access    : acce...6789",
                "  Refresh   : short",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_no_subscription() {
        assert_eq!(
            render_subscription_section(None),
            "📦 Subscription\n  Status    : No active subscription"
        );
    }

    #[test]
    fn test_subscription_lines() {
        let subscription = Subscription {
            plan: Some(Plan {
                name: Some("Pro".into()),
                request_per_minute: Some(60),
                token_per_minute: Some(TokenCount::Text("100000".into())),
            }),
            status: Some("ACTIVE".into()),
            start_at: Some("2026-01-01".into()),
            end_at: None,
        };
        assert_eq!(
            render_subscription_section(Some(&subscription)),
            [
                "📦 Subscription",
                "  Plan      : Pro",
                "  Status    : ACTIVE",
                "  Window    : 2026-01-01 →",
                "  Limits    : 60 req/min · 100000 tok/min",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_missing_fields_skipped() {
        let subscription = Subscription {
            status: Some("ACTIVE".into()),
            end_at: Some("2026-02-01".into()),
            ..Subscription::default()
        };
        assert_eq!(
            render_subscription_section(Some(&subscription)),
            "📦 Subscription\n  Status    : ACTIVE\n  Window    : → 2026-02-01"
        );
    }
}

#[cfg(test)]
mod json_tests {
    use super::super::json::{AuthOutput, ConsumerOutput, StatusOutput};
    use getrouter_core::{AuthStatus, Consumer};
    use serde_json::json;

    #[test]
    fn test_status_json_masks_tokens() {
        let status = AuthStatus::LoggedIn {
            expires_at: "2026-02-01T00:00:00Z".into(),
            access_token: "access-token-0123456789".into(),
            refresh_token: "refresh".into(),
            token_type: "Bearer".into(),
        };
        let output = StatusOutput {
            auth: AuthOutput::from(&status),
            subscription: None,
        };
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "auth": {
                    "status": "logged_in",
                    "expiresAt": "2026-02-01T00:00:00Z",
                    "tokenType": "Bearer",
                    "accessToken": "acce...6789",
                    "refreshToken": "****"
                },
                "subscription": null
            })
        );
    }

    #[test]
    fn test_logged_out_json() {
        let value = serde_json::to_value(AuthOutput::from(&AuthStatus::LoggedOut)).unwrap();
        assert_eq!(value, json!({ "status": "logged_out" }));
    }

    #[test]
    fn test_consumer_json_masks_api_key() {
        let consumer = Consumer {
            id: Some("c1".into()),
            api_key: Some("sk-0123456789abcdef".into()),
            ..Consumer::default()
        };
        let masked = serde_json::to_value(ConsumerOutput::new(&consumer, false)).unwrap();
        assert_eq!(masked, json!({ "id": "c1", "apiKey": "sk-0...cdef" }));

        let shown = serde_json::to_value(ConsumerOutput::new(&consumer, true)).unwrap();
        assert_eq!(shown["apiKey"], "sk-0123456789abcdef");
    }
}
