//! Claude command - write the Anthropic env file, optionally wiring it into
//! the shell rc.

use anyhow::Result;
use clap::Args;
use getrouter_setup::{
    detect_shell, env_file_path, format_source_line, hook_file_path, render_env, render_hook,
    resolve_env_shell, shell_rc_path, EnvVars, RcShell,
};
use getrouter_store::{append_rc_if_missing, write_env_file, write_hook_file};
use tracing::debug;

use super::{require_interactive, select_consumer_with_key};
use crate::context::AppContext;
use crate::interactive::{Prompter, TerminalPrompter};
use crate::Cli;

/// Base URL of the Anthropic-compatible proxy.
pub const CLAUDE_BASE_URL: &str = "https://api.getrouter.dev/claude";

/// Arguments for the claude command.
#[derive(Args)]
pub struct ClaudeArgs {
    /// Install into shell rc.
    #[arg(long)]
    pub install: bool,
}

/// Runs the claude command.
pub async fn run(args: &ClaudeArgs, _cli: &Cli) -> Result<()> {
    let ctx = AppContext::load().await?;
    let shell_env = std::env::var("SHELL").ok();
    let shell = detect_shell(shell_env.as_deref());
    let lines = configure(&ctx, &mut TerminalPrompter::new(), args.install, shell).await?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Env vars pointing Claude at getrouter with `api_key`.
pub fn anthropic_env(api_key: &str) -> EnvVars {
    EnvVars {
        anthropic_base_url: Some(CLAUDE_BASE_URL.to_string()),
        anthropic_api_key: Some(api_key.to_string()),
        ..EnvVars::default()
    }
}

/// Picks a key and writes the env file for `shell`. With `install`, also
/// writes the hook and adds both to the rc file.
///
/// Returns the lines to print; empty when the user cancelled.
pub async fn configure(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    install: bool,
    shell: RcShell,
) -> Result<Vec<String>> {
    require_interactive(prompter, "Interactive mode required for key selection.")?;
    let env_shell = resolve_env_shell(shell);

    let client = ctx.client()?;
    let Some((_, api_key)) = select_consumer_with_key(&client, prompter).await? else {
        return Ok(Vec::new());
    };

    let env_path = env_file_path(env_shell, &ctx.config_dir);
    write_env_file(&env_path, &render_env(env_shell, &anthropic_env(&api_key))).await?;
    let source_line = format_source_line(env_shell, &env_path);

    if !install {
        return Ok(vec![
            "To load the environment in your shell, run:".to_string(),
            source_line,
        ]);
    }

    let hook_path = hook_file_path(shell, &ctx.config_dir);
    write_hook_file(&hook_path, render_hook(shell)).await?;

    let rc_path = shell_rc_path(shell, &ctx.home);
    let env_added = append_rc_if_missing(&rc_path, &source_line).await?;
    let hook_added =
        append_rc_if_missing(&rc_path, &format_source_line(env_shell, &hook_path)).await?;
    debug!(%shell, rc = %rc_path.display(), env_added, hook_added, "Shell rc updated");

    let line = if env_added || hook_added {
        format!("✅ Added to {}", rc_path.display())
    } else {
        format!("ℹ️ Already configured in {}", rc_path.display())
    };
    Ok(vec![line])
}

#[cfg(test)]
mod tests {
    use getrouter_store::AppConfig;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::interactive::{Answer, ScriptedPrompter};

    async fn setup() -> (TempDir, MockServer, AppContext) {
        let dir = TempDir::new().unwrap();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/dashboard/consumers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "consumers": [{ "id": "c1", "name": "dev" }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/dashboard/consumers/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "c1", "name": "dev", "apiKey": "sk-claude"
            })))
            .mount(&server)
            .await;
        let config = AppConfig {
            api_base: server.uri(),
            json: false,
        };
        let ctx = AppContext::new(dir.path().join("getrouter"), dir.path().join("home"), config);
        (dir, server, ctx)
    }

    fn pick_dev() -> ScriptedPrompter {
        ScriptedPrompter::new([Answer::Search("dev".into())])
    }

    #[tokio::test]
    async fn test_requires_terminal() {
        let (_dir, _server, ctx) = setup().await;
        let err = configure(&ctx, &mut ScriptedPrompter::non_interactive(), false, RcShell::Bash)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Interactive mode required for key selection.");
    }

    #[tokio::test]
    async fn test_writes_env_file() {
        let (_dir, _server, ctx) = setup().await;
        let lines = configure(&ctx, &mut pick_dev(), false, RcShell::Zsh).await.unwrap();

        let env_path = ctx.config_dir.join("env.sh");
        assert_eq!(
            lines,
            vec![
                "To load the environment in your shell, run:".to_string(),
                format!("source {}", env_path.display()),
            ]
        );
        let content = tokio::fs::read_to_string(&env_path).await.unwrap();
        assert_eq!(
            content,
            "export ANTHROPIC_BASE_URL='https://api.getrouter.dev/claude'\nexport ANTHROPIC_API_KEY='sk-claude'\n"
        );
        assert!(!ctx.home.join(".zshrc").exists());
    }

    #[tokio::test]
    async fn test_install_appends_rc_once() {
        let (_dir, _server, ctx) = setup().await;
        let rc = ctx.home.join(".bashrc");

        let lines = configure(&ctx, &mut pick_dev(), true, RcShell::Bash).await.unwrap();
        assert_eq!(lines, vec![format!("✅ Added to {}", rc.display())]);
        let content = tokio::fs::read_to_string(&rc).await.unwrap();
        assert!(content.contains(&format!("source {}", ctx.config_dir.join("env.sh").display())));
        assert!(content.contains(&format!("source {}", ctx.config_dir.join("hook.sh").display())));
        assert!(ctx.config_dir.join("hook.sh").exists());

        let lines = configure(&ctx, &mut pick_dev(), true, RcShell::Bash).await.unwrap();
        assert_eq!(lines, vec![format!("ℹ️ Already configured in {}", rc.display())]);
    }

    #[tokio::test]
    async fn test_powershell_env_file() {
        let (_dir, _server, ctx) = setup().await;
        let lines = configure(&ctx, &mut pick_dev(), false, RcShell::Pwsh).await.unwrap();
        let env_path = ctx.config_dir.join("env.ps1");
        assert_eq!(lines[1], format!(". {}", env_path.display()));
        let content = tokio::fs::read_to_string(&env_path).await.unwrap();
        assert!(content.starts_with("$env:ANTHROPIC_BASE_URL="));
    }
}
