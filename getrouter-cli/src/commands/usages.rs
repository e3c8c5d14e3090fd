//! Usages command - token totals for the last seven days.

use anyhow::Result;
use getrouter_core::aggregate_usages;
use getrouter_fetch::services;

use crate::context::AppContext;
use crate::output::{print_json, render_usage_chart, DEFAULT_CHART_WIDTH};
use crate::Cli;

/// Days shown by the chart.
const USAGE_DAYS: usize = 7;

/// Runs the usages command.
pub async fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::load().await?;
    let usages = services::list_usages(&ctx.client()?).await?;
    let aggregated = aggregate_usages(&usages, USAGE_DAYS);
    if ctx.json_output(cli) {
        return print_json(&aggregated);
    }
    println!("{}", render_usage_chart(&aggregated, DEFAULT_CHART_WIDTH));
    Ok(())
}
