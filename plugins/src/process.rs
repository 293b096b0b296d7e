use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;

use precommit_core::api::{normalize_exit, CommandSpec, ProcessRunner, RawOutput};

/// Runs the tool as a child process with both streams captured.
#[derive(Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    fn name(&self) -> &str {
        "tokio"
    }

    async fn run(&self, spec: &CommandSpec) -> anyhow::Result<RawOutput> {
        let program = which::which(&spec.program)
            .with_context(|| format!("{} not found on PATH", spec.program))?;

        let mut cmd = Command::new(&program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!(
            target: "precommit.process",
            program = %program.display(),
            args = ?spec.args,
            "spawning"
        );
        let output = cmd
            .output()
            .await
            .with_context(|| format!("failed to start {}", program.display()))?;

        Ok(RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: Some(normalize_exit(output.status)),
        })
    }
}
