//! Status command - login state and current subscription.

use anyhow::Result;
use chrono::Utc;
use getrouter_fetch::{ensure_valid_token, services};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::output::{
    print_json, render_auth_section, render_subscription_section, AuthOutput, StatusOutput,
};
use crate::Cli;

/// Runs the status command.
pub async fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::load().await?;
    let client = ctx.client()?;
    // An expiring session is refreshed first so it reports as logged in.
    if let Err(e) = ensure_valid_token(&client).await {
        warn!(error = %e, "Token refresh failed");
    }
    let auth = ctx.auth.auth_status(Utc::now()).await;

    // Without credentials the subscription call can only fail.
    let subscription = if auth.is_logged_in() {
        services::current_subscription(&client).await?
    } else {
        debug!("Logged out, skipping subscription lookup");
        None
    };

    if ctx.json_output(cli) {
        return print_json(&StatusOutput {
            auth: AuthOutput::from(&auth),
            subscription,
        });
    }
    println!("{}", render_auth_section(&auth));
    println!();
    println!("{}", render_subscription_section(subscription.as_ref()));
    Ok(())
}
