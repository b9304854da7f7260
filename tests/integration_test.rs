use anyhow::Result;
use std::process::Command;

/// Helper to run cligpt and capture output
fn run_cligpt(args: &[&str]) -> Result<std::process::Output> {
    let mut cmd = Command::new("cargo");
    cmd.arg("run");
    cmd.arg("--quiet");
    cmd.arg("--");
    cmd.args(args);

    let output = cmd.output()?;
    Ok(output)
}

#[test]
fn test_no_task_prints_usage_hint_and_exits_zero() -> Result<()> {
    let output = run_cligpt(&[])?;

    assert!(output.status.success(), "No-op invocation should exit 0");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No task provided"),
        "Should hint at usage on stderr. Stderr: {}",
        stderr
    );

    Ok(())
}

#[test]
fn test_config_flag_shows_config_location() -> Result<()> {
    let output = run_cligpt(&["--config"])?;

    assert!(output.status.success(), "--config should exit 0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration file:"), "Should show config path");
    assert!(stdout.contains("--set-api-key"), "Should show how to set the key");

    Ok(())
}

#[test]
fn test_help_documents_entry_points() -> Result<()> {
    let output = run_cligpt(&["--help"])?;

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--complete"), "Should document complete mode");
    assert!(stdout.contains("--explain"), "Should document explain mode");
    assert!(stdout.contains("--set-api-key"), "Should document key setup");

    Ok(())
}
