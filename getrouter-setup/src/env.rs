//! Shell environment files and the wrapper hook that re-sources them.
//!
//! Rendering only; writing the files is the store's job.

use std::fmt;
use std::path::{Path, PathBuf};

/// Syntax of a generated env file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvShell {
    /// POSIX `export` lines, sourced by bash, zsh and fish.
    Sh,
    /// PowerShell `$env:` assignments.
    Ps1,
}

/// Interactive shell whose rc file gets the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcShell {
    /// Z shell.
    Zsh,
    /// Bash.
    Bash,
    /// Fish.
    Fish,
    /// PowerShell 7.
    Pwsh,
}

impl RcShell {
    /// Parses a shell name such as `zsh` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "zsh" => Some(Self::Zsh),
            "bash" => Some(Self::Bash),
            "fish" => Some(Self::Fish),
            "pwsh" => Some(Self::Pwsh),
            _ => None,
        }
    }
}

impl fmt::Display for RcShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zsh => "zsh",
            Self::Bash => "bash",
            Self::Fish => "fish",
            Self::Pwsh => "pwsh",
        };
        f.write_str(name)
    }
}

/// Variables exported by an env file. Empty values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    /// `OPENAI_BASE_URL`.
    pub openai_base_url: Option<String>,
    /// `OPENAI_API_KEY`.
    pub openai_api_key: Option<String>,
    /// `ANTHROPIC_BASE_URL`.
    pub anthropic_base_url: Option<String>,
    /// `ANTHROPIC_API_KEY`.
    pub anthropic_api_key: Option<String>,
}

impl EnvVars {
    fn entries(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("OPENAI_BASE_URL", self.openai_base_url.as_deref()),
            ("OPENAI_API_KEY", self.openai_api_key.as_deref()),
            ("ANTHROPIC_BASE_URL", self.anthropic_base_url.as_deref()),
            ("ANTHROPIC_API_KEY", self.anthropic_api_key.as_deref()),
        ]
    }
}

fn quote_env_value(shell: EnvShell, value: &str) -> String {
    match shell {
        EnvShell::Ps1 => format!("'{}'", value.replace('\'', "''")),
        EnvShell::Sh => format!("'{}'", value.replace('\'', r"'\''")),
    }
}

/// Renders an env file, one newline-terminated assignment per variable.
pub fn render_env(shell: EnvShell, vars: &EnvVars) -> String {
    let mut out = String::new();
    for (key, value) in vars.entries() {
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            continue;
        };
        let value = quote_env_value(shell, value);
        match shell {
            EnvShell::Ps1 => out.push_str(&format!("$env:{key}={value}\n")),
            EnvShell::Sh => out.push_str(&format!("export {key}={value}\n")),
        }
    }
    out
}

const POSIX_HOOK: &str = r#"getrouter() {
  command getrouter "$@"
  local exit_code=$?
  if [ $exit_code -ne 0 ]; then
    return $exit_code
  fi
  case "$1" in
    codex|claude)
      local config_dir="${GETROUTER_CONFIG_DIR:-$HOME/.getrouter}"
      local env_path="$config_dir/env.sh"
      if [ -f "$env_path" ]; then
        source "$env_path"
      fi
      ;;
  esac
  return $exit_code
}
"#;

const FISH_HOOK: &str = r#"function getrouter
  command getrouter $argv
  set -l exit_code $status
  if test $exit_code -ne 0
    return $exit_code
  end
  if test (count $argv) -gt 0
    switch $argv[1]
      case codex claude
        set -l config_dir $GETROUTER_CONFIG_DIR
        if test -z "$config_dir"
          set config_dir "$HOME/.getrouter"
        end
        set -l env_path "$config_dir/env.sh"
        if test -f "$env_path"
          source "$env_path"
        end
    end
  end
  return $exit_code
end
"#;

const PWSH_HOOK: &str = r#"function getrouter {
  $cmd = Get-Command getrouter -CommandType Application,ExternalScript -ErrorAction SilentlyContinue | Select-Object -First 1
  if ($null -ne $cmd) {
    & $cmd.Source @args
  }
  $exitCode = $LASTEXITCODE
  if ($exitCode -ne 0) {
    return $exitCode
  }
  if ($args.Count -gt 0 -and ($args[0] -eq "codex" -or $args[0] -eq "claude")) {
    $configDir = if ($env:GETROUTER_CONFIG_DIR) { $env:GETROUTER_CONFIG_DIR } else { Join-Path $HOME ".getrouter" }
    $envPath = Join-Path $configDir "env.ps1"
    if (Test-Path $envPath) {
      . $envPath
    }
  }
  return $exitCode
}
"#;

/// Shell function wrapping `getrouter` that re-sources the env file after
/// a successful `codex` or `claude` run.
pub fn render_hook(shell: RcShell) -> &'static str {
    match shell {
        RcShell::Pwsh => PWSH_HOOK,
        RcShell::Fish => FISH_HOOK,
        RcShell::Zsh | RcShell::Bash => POSIX_HOOK,
    }
}

/// Picks the rc shell from a `$SHELL` value, falling back per platform.
pub fn detect_shell(shell_env: Option<&str>) -> RcShell {
    shell_env
        .and_then(|path| path.rsplit(['/', '\\']).next())
        .and_then(RcShell::from_name)
        .unwrap_or(if cfg!(windows) { RcShell::Pwsh } else { RcShell::Bash })
}

/// Env file syntax sourced by `shell`.
pub fn resolve_env_shell(shell: RcShell) -> EnvShell {
    match shell {
        RcShell::Pwsh => EnvShell::Ps1,
        _ => EnvShell::Sh,
    }
}

/// `<config dir>/env.sh` or `<config dir>/env.ps1`.
pub fn env_file_path(shell: EnvShell, config_dir: &Path) -> PathBuf {
    config_dir.join(match shell {
        EnvShell::Ps1 => "env.ps1",
        EnvShell::Sh => "env.sh",
    })
}

/// `<config dir>/hook.{sh,fish,ps1}`.
pub fn hook_file_path(shell: RcShell, config_dir: &Path) -> PathBuf {
    config_dir.join(match shell {
        RcShell::Pwsh => "hook.ps1",
        RcShell::Fish => "hook.fish",
        RcShell::Zsh | RcShell::Bash => "hook.sh",
    })
}

/// Startup file of `shell` under `home`.
pub fn shell_rc_path(shell: RcShell, home: &Path) -> PathBuf {
    match shell {
        RcShell::Zsh => home.join(".zshrc"),
        RcShell::Bash => home.join(".bashrc"),
        RcShell::Fish => home.join(".config").join("fish").join("config.fish"),
        RcShell::Pwsh if cfg!(windows) => home
            .join("Documents")
            .join("PowerShell")
            .join("Microsoft.PowerShell_profile.ps1"),
        RcShell::Pwsh => home
            .join(".config")
            .join("powershell")
            .join("Microsoft.PowerShell_profile.ps1"),
    }
}

/// Line that sources `path` in the given syntax.
pub fn format_source_line(shell: EnvShell, path: &Path) -> String {
    match shell {
        EnvShell::Ps1 => format!(". {}", path.display()),
        EnvShell::Sh => format!("source {}", path.display()),
    }
}
