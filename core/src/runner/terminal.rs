use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{TerminalConfig, ToolConfig};
use crate::error::{ConfigError, ExecutionError};
use crate::scope::RunScope;

use super::template::{quote, quote_all, CommandTemplate, SLOT_OUTPUT, SLOT_SCOPE, SLOT_TOOL};
use super::types::Transcript;

/// A visible, interactive terminal owned by the host.
#[async_trait]
pub trait Terminal: Send + Sync {
    /// Sends `command_line` to the terminal and resolves once the terminal
    /// has closed, with the exit status it reported (if any).
    async fn run_visible(&self, command_line: &str) -> anyhow::Result<Option<i32>>;
}

/// Runs the tool in a visible terminal and reads back what `tee` copied to
/// the transcript file.
pub struct TerminalRelay {
    terminal: Arc<dyn Terminal>,
    template: CommandTemplate,
    tool: ToolConfig,
    output_path: PathBuf,
}

impl TerminalRelay {
    pub fn new(
        terminal: Arc<dyn Terminal>,
        tool: ToolConfig,
        cfg: &TerminalConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            terminal,
            template: CommandTemplate::parse(&cfg.template)?,
            tool,
            output_path: cfg.output_path.clone(),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn command_line(&self, scope: &RunScope) -> String {
        let mut tool_words = vec![self.tool.bin.clone()];
        tool_words.extend(self.tool.extra_args.iter().cloned());

        let values: HashMap<&str, String> = [
            (SLOT_TOOL, quote_all(&tool_words)),
            (SLOT_SCOPE, quote_all(scope.to_args())),
            (SLOT_OUTPUT, quote(&self.output_path.to_string_lossy())),
        ]
        .into_iter()
        .collect();

        self.template.render(&values)
    }

    pub async fn execute(&self, scope: &RunScope) -> Result<Transcript, ExecutionError> {
        // a transcript left by an earlier run must not be mistaken for this one
        if let Err(e) = std::fs::remove_file(&self.output_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    target: "precommit.runner",
                    path = %self.output_path.display(),
                    error = %e,
                    "could not remove stale transcript"
                );
            }
        }

        let line = self.command_line(scope);
        tracing::info!(target: "precommit.runner", command = %line, "sending checks to terminal");

        let exit_code = self
            .terminal
            .run_visible(&line)
            .await
            .map_err(|e| ExecutionError::Terminal(e.to_string()))?;

        let text = std::fs::read_to_string(&self.output_path).map_err(|source| {
            ExecutionError::ReadOutput {
                path: self.output_path.clone(),
                source,
            }
        })?;

        tracing::debug!(
            target: "precommit.runner",
            exit_code = ?exit_code,
            transcript_bytes = text.len(),
            "terminal closed"
        );
        Ok(Transcript { exit_code, text })
    }
}
