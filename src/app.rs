//! Entry-point flows: interactive, complete-only, and explain-only.
//!
//! The interactive flow sequences generate, display, explain, display,
//! confirm, execute. Terminal I/O and command execution are injected so the
//! confirm/abort paths are testable without a terminal or a child process.

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::executor::Executor;
use anyhow::Result;
use async_trait::async_trait;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Trait for running a confirmed suggestion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion, relaying its output.
    async fn run(&self, command: &str) -> Result<()>;
}

/// Default runner: streams the command through [`Executor`] under the
/// resolved shell. A non-zero child exit is reported by the relayed output
/// itself, not as an error.
pub struct ShellRunner {
    executor: Executor,
}

impl ShellRunner {
    pub fn new(shell: &str) -> Self {
        Self {
            executor: Executor::new(shell),
        }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<()> {
        let status = self.executor.execute(command).await?;
        debug!("Suggested command exited with status: {}", status);
        Ok(())
    }
}

/// Orchestrates the completion client, the confirmation gate, and execution.
pub struct App {
    client: CompletionClient,
    shell: String,
}

impl App {
    /// Builds the app from configuration, resolving the platform shell and
    /// failing fast on a missing API key or unsupported platform.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: CompletionClient::new(config)?,
            shell: crate::shell::default_shell()?,
        })
    }

    /// Builds the app from pre-constructed parts (for testing).
    pub fn with_parts(client: CompletionClient, shell: String) -> Self {
        Self { client, shell }
    }

    /// Full interactive flow against the real terminal and shell.
    pub async fn run_interactive(&self, prompt: &str) -> Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        let runner = ShellRunner::new(&self.shell);
        self.run_interactive_with_io(prompt, &mut input, &mut output, &runner)
            .await
    }

    /// Interactive flow with injected terminal I/O and command runner.
    ///
    /// Prints the suggestion and its explanation, then asks for a one-letter
    /// confirmation. Only `y` (case-insensitive) executes; anything else
    /// aborts with a no-op message.
    pub async fn run_interactive_with_io<R: BufRead, W: Write>(
        &self,
        prompt: &str,
        input: &mut R,
        output: &mut W,
        runner: &dyn CommandRunner,
    ) -> Result<()> {
        debug!("Prompt: {}", prompt);

        let suggestion = self.client.generate_command(prompt, &self.shell).await?;
        writeln!(output, "Suggestion: {}", suggestion)?;

        let explanation = self.client.explain_command(&suggestion, prompt).await?;
        writeln!(output, "Explanation: {}", explanation)?;

        write!(output, "Execute suggested command? (Y/N): ")?;
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;

        if line.trim().eq_ignore_ascii_case("y") {
            runner.run(&suggestion).await
        } else {
            writeln!(output, "Phew, good that I asked...")?;
            Ok(())
        }
    }

    /// Complete-only flow: print the raw trimmed suggestion and nothing else.
    ///
    /// Meant for shell-completion integration; a Ctrl-C while the request is
    /// in flight prints a clean abort message instead of propagating.
    pub async fn run_complete(&self, prompt: &str) -> Result<()> {
        let mut stdout = io::stdout();
        tokio::select! {
            result = self.complete_with_io(prompt, &mut stdout) => result,
            _ = tokio::signal::ctrl_c() => {
                println!("\nAborted by user.");
                Ok(())
            }
        }
    }

    /// Complete-only flow with an injected writer (for testing).
    pub async fn complete_with_io<W: Write>(&self, prompt: &str, output: &mut W) -> Result<()> {
        let suggestion = self.client.generate_command(prompt, &self.shell).await?;
        writeln!(output, "{}", suggestion.trim())?;
        Ok(())
    }

    /// Explain-only flow: print the explanation for a pre-supplied command,
    /// judged against the (possibly empty) task description.
    pub async fn run_explain(&self, command: &str, prompt: &str) -> Result<()> {
        let mut stdout = io::stdout();
        tokio::select! {
            result = self.explain_with_io(command, prompt, &mut stdout) => result,
            _ = tokio::signal::ctrl_c() => {
                println!("\nAborted by user.");
                Ok(())
            }
        }
    }

    /// Explain-only flow with an injected writer (for testing).
    pub async fn explain_with_io<W: Write>(
        &self,
        command: &str,
        prompt: &str,
        output: &mut W,
    ) -> Result<()> {
        let explanation = self.client.explain_command(command, prompt).await?;
        writeln!(output, "{}", explanation.trim())?;
        Ok(())
    }
}
