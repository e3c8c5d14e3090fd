//! Output formatting for CLI.

mod json;
mod text;

pub use json::{print_json, AuthOutput, ConsumerOutput, StatusOutput};
pub use text::{
    render_auth_section, render_subscription_section, render_table, render_usage_chart,
    DEFAULT_CHART_WIDTH, DEFAULT_MAX_COL_WIDTH,
};
#[cfg(test)]
mod tests;
