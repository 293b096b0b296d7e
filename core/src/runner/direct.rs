use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ToolConfig;
use crate::error::ExecutionError;
use crate::scope::RunScope;

use super::process::ProcessRunner;
use super::types::{CommandSpec, RawOutput};

/// Runs the tool as a child process and captures both streams in full.
pub struct DirectCapture {
    runner: Arc<dyn ProcessRunner>,
    tool: ToolConfig,
    cwd: Option<PathBuf>,
}

impl DirectCapture {
    pub fn new(runner: Arc<dyn ProcessRunner>, tool: ToolConfig, cwd: Option<PathBuf>) -> Self {
        Self { runner, tool, cwd }
    }

    pub fn command_for(&self, scope: &RunScope) -> CommandSpec {
        let mut args = vec!["run".to_string()];
        args.extend(self.tool.extra_args.iter().cloned());
        args.extend(scope.to_args());
        CommandSpec {
            program: self.tool.bin.clone(),
            args,
            cwd: self.cwd.clone(),
        }
    }

    pub async fn execute(&self, scope: &RunScope) -> Result<RawOutput, ExecutionError> {
        let spec = self.command_for(scope);
        tracing::info!(
            target: "precommit.runner",
            runner = self.runner.name(),
            command = %spec.display_line(),
            "running checks"
        );

        let output = self
            .runner
            .run(&spec)
            .await
            .map_err(|e| ExecutionError::Spawn {
                program: spec.program.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            target: "precommit.runner",
            exit_code = ?output.exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "checks finished"
        );
        Ok(output)
    }
}
