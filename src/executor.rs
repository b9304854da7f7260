//! Streaming command execution under the resolved shell.
//!
//! The executor spawns the command with both output pipes captured and
//! relays them line by line, byte for byte, to the parent's streams while
//! the child runs. The drain loop ends only when both pipes have reported
//! end-of-file; the exit status is read after that, so output produced right
//! before exit is never dropped. Lines keep their per-stream order; no
//! ordering is guaranteed between stdout and stderr.

use crate::error::CligptError;
use anyhow::{Result, anyhow};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::debug;

pub struct Executor {
    shell: String,
    command_flag: &'static str,
}

impl Executor {
    /// Creates an executor that runs commands under `shell`.
    pub fn new(shell: &str) -> Self {
        Self {
            shell: shell.to_string(),
            command_flag: crate::shell::command_flag(std::env::consts::OS),
        }
    }

    /// Runs `command` and relays its output to this process's stdout/stderr.
    ///
    /// Blocks until the child has exited and both pipes are drained. The
    /// child's own non-zero exit is not an error; the status is returned for
    /// the caller to inspect.
    pub async fn execute(&self, command: &str) -> Result<ExitStatus> {
        let mut stdout = tokio::io::stdout();
        let mut stderr = tokio::io::stderr();
        self.execute_with_io(command, &mut stdout, &mut stderr).await
    }

    /// Runs `command` relaying output into the provided writers (for testing).
    ///
    /// # Errors
    ///
    /// Fails with [`CligptError::Spawn`] when the child cannot be started;
    /// no partial child is left running in that case.
    pub async fn execute_with_io<W1, W2>(
        &self,
        command: &str,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Result<ExitStatus>
    where
        W1: AsyncWrite + Unpin,
        W2: AsyncWrite + Unpin,
    {
        debug!("Executing shell command in shell {}: {}", self.shell, command);

        let mut child = Command::new(&self.shell)
            .arg(self.command_flag)
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CligptError::Spawn {
                shell: self.shell.clone(),
                command: command.to_string(),
                source,
            })?;

        let child_stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("child stdout was not captured"))?;
        let child_stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow!("child stderr was not captured"))?;

        let mut out_reader = BufReader::new(child_stdout);
        let mut err_reader = BufReader::new(child_stderr);
        let mut out_buf = Vec::new();
        let mut err_buf = Vec::new();

        // Drain both pipes until each signals end-of-file. Termination is
        // decoupled from child liveness: EOF on both pipes implies no more
        // output can arrive, whether or not the child has been reaped yet.
        // Raw read_until chunks keep the bytes verbatim: CRLF endings and a
        // missing final newline pass through untouched.
        let mut stdout_open = true;
        let mut stderr_open = true;

        while stdout_open || stderr_open {
            tokio::select! {
                read = out_reader.read_until(b'\n', &mut out_buf), if stdout_open => {
                    if read? == 0 {
                        stdout_open = false;
                    } else {
                        stdout.write_all(&out_buf).await?;
                        stdout.flush().await?;
                        out_buf.clear();
                    }
                }
                read = err_reader.read_until(b'\n', &mut err_buf), if stderr_open => {
                    if read? == 0 {
                        stderr_open = false;
                    } else {
                        stderr.write_all(&err_buf).await?;
                        stderr.flush().await?;
                        err_buf.clear();
                    }
                }
            }
        }

        let status = child.wait().await?;
        debug!("Shell command results -- exit status: {}", status);

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh() -> Executor {
        Executor::new("/bin/sh")
    }

    async fn run_captured(command: &str) -> (ExitStatus, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let status = sh()
            .execute_with_io(command, &mut stdout, &mut stderr)
            .await
            .unwrap();
        (
            status,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_stdout_lines_relayed_in_order() {
        let (status, stdout, stderr) = run_captured("echo one; echo two; echo three").await;

        assert!(status.success());
        assert_eq!(stdout, "one\ntwo\nthree\n");
        assert!(stderr.is_empty());
    }

    #[tokio::test]
    async fn test_streams_are_not_cross_contaminated() {
        // Alternate between streams with small sleeps so the interleaving is
        // deterministic enough to exercise both pipes becoming ready.
        let script = "for i in 1 2 3; do echo out$i; sleep 0.01; echo err$i 1>&2; sleep 0.01; done";
        let (status, stdout, stderr) = run_captured(script).await;

        assert!(status.success());
        assert_eq!(stdout, "out1\nout2\nout3\n");
        assert_eq!(stderr, "err1\nerr2\nerr3\n");
    }

    #[tokio::test]
    async fn test_no_line_loss_under_load() {
        let script = "i=1; while [ $i -le 50 ]; do echo o$i; echo e$i 1>&2; i=$((i+1)); done";
        let (status, stdout, stderr) = run_captured(script).await;

        assert!(status.success());
        let out_lines: Vec<&str> = stdout.lines().collect();
        let err_lines: Vec<&str> = stderr.lines().collect();
        assert_eq!(out_lines.len(), 50);
        assert_eq!(err_lines.len(), 50);
        assert_eq!(out_lines[0], "o1");
        assert_eq!(out_lines[49], "o50");
        assert_eq!(err_lines[0], "e1");
        assert_eq!(err_lines[49], "e50");
    }

    #[tokio::test]
    async fn test_stderr_only_output_after_exit_is_relayed() {
        // The child writes to stderr and exits immediately; the output must
        // still be relayed before execute returns.
        let (status, stdout, stderr) = run_captured("echo 'only stderr' 1>&2").await;

        assert!(status.success());
        assert!(stdout.is_empty());
        assert_eq!(stderr, "only stderr\n");
    }

    #[tokio::test]
    async fn test_unterminated_final_line_is_relayed_verbatim() {
        let (status, stdout, stderr) = run_captured("printf 'no newline'").await;

        assert!(status.success());
        assert_eq!(stdout, "no newline");
        assert!(stderr.is_empty());
    }

    #[tokio::test]
    async fn test_crlf_line_endings_pass_through_untouched() {
        let (status, stdout, _) = run_captured(r"printf 'a\r\nb\r\n'").await;

        assert!(status.success());
        assert_eq!(stdout, "a\r\nb\r\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_not_an_error() {
        let (status, _, _) = run_captured("exit 3").await;

        assert!(!status.success());
        assert_eq!(status.code(), Some(3));
    }

    #[tokio::test]
    async fn test_missing_shell_is_spawn_error() {
        let executor = Executor::new("/nonexistent/shell");
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let err = executor
            .execute_with_io("echo hi", &mut stdout, &mut stderr)
            .await
            .unwrap_err();

        let typed = err.downcast_ref::<CligptError>().unwrap();
        assert!(matches!(typed, CligptError::Spawn { shell, .. } if shell == "/nonexistent/shell"));
        assert!(stdout.is_empty());
        assert!(stderr.is_empty());
    }
}
