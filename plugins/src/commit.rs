use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;

use precommit_core::api::{normalize_exit, CommitAction};

/// `git commit` with the terminal attached, so the user's editor opens for
/// the message as it would for a plain commit.
pub struct GitCommitAction {
    git: PathBuf,
    workdir: PathBuf,
}

impl GitCommitAction {
    pub fn new(git: PathBuf, workdir: PathBuf) -> Self {
        Self { git, workdir }
    }
}

#[async_trait]
impl CommitAction for GitCommitAction {
    async fn commit(&self) -> anyhow::Result<()> {
        tracing::info!(target: "precommit.git", "committing staged changes");
        let status = Command::new(&self.git)
            .arg("-C")
            .arg(&self.workdir)
            .arg("commit")
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .context("failed to run git commit")?;
        if !status.success() {
            anyhow::bail!("git commit exited with code {}", normalize_exit(status));
        }
        Ok(())
    }
}
