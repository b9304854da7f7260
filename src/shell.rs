//! Default shell resolution for the current platform.

use crate::error::CligptError;
use crate::providers::{EnvProvider, SystemEnv};
use anyhow::Result;

/// Returns the interpreter commands are executed under on this host.
///
/// Windows honors `COMSPEC` and falls back to `cmd.exe`; Linux and macOS
/// honor `SHELL` and fall back to `/bin/bash`. Values are trimmed. Any other
/// platform fails with [`CligptError::UnsupportedPlatform`].
pub fn default_shell() -> Result<String> {
    resolve(std::env::consts::OS, &SystemEnv)
}

/// Resolves the shell for a given platform identifier and environment.
///
/// Pure function of its inputs; `os` uses the `std::env::consts::OS` naming
/// (`"windows"`, `"linux"`, `"macos"`).
pub fn resolve(os: &str, env: &impl EnvProvider) -> Result<String> {
    match os {
        "windows" => Ok(env
            .var("COMSPEC")
            .unwrap_or_else(|| "cmd.exe".to_string())
            .trim()
            .to_string()),
        "linux" | "macos" => Ok(env
            .var("SHELL")
            .unwrap_or_else(|| "/bin/bash".to_string())
            .trim()
            .to_string()),
        other => Err(CligptError::UnsupportedPlatform(other.to_string()).into()),
    }
}

/// Returns the flag that makes the shell run a command string.
///
/// `cmd.exe` and its replacements take `/C`; POSIX shells take `-c`.
pub fn command_flag(os: &str) -> &'static str {
    if os == "windows" { "/C" } else { "-c" }
}
