use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;

use precommit_core::api::{normalize_exit, Terminal};

/// The invoking terminal: the command line runs under `shell -c` with the
/// user's stdin, stdout and stderr attached.
pub struct ShellTerminal {
    shell: String,
    cwd: PathBuf,
}

impl ShellTerminal {
    pub fn new(shell: impl Into<String>, cwd: PathBuf) -> Self {
        Self {
            shell: shell.into(),
            cwd,
        }
    }
}

#[async_trait]
impl Terminal for ShellTerminal {
    async fn run_visible(&self, command_line: &str) -> anyhow::Result<Option<i32>> {
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .current_dir(&self.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("failed to start {}", self.shell))?;
        Ok(Some(normalize_exit(status)))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let term = ShellTerminal::new("sh", dir.path().to_path_buf());
        assert_eq!(term.run_visible("exit 0").await.unwrap(), Some(0));
        assert_eq!(term.run_visible("exit 4").await.unwrap(), Some(4));
    }

    #[tokio::test]
    async fn runs_inside_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let term = ShellTerminal::new("sh", dir.path().to_path_buf());
        term.run_visible("echo hi > out.txt").await.unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "hi\n"
        );
    }

    #[tokio::test]
    async fn unknown_shell_is_an_error() {
        let term = ShellTerminal::new("precommit-helper-no-such-shell", PathBuf::from("."));
        assert!(term.run_visible("true").await.is_err());
    }
}
