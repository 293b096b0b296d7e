use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use precommit_core::api::{
    AppConfig, CommitAction, Notifier, OutputLog, ProcessRunner, RepositoryProvider, Terminal,
};

use crate::commit::GitCommitAction;
use crate::git::GitCliProvider;
use crate::log::FileLog;
use crate::notify::ConsoleNotifier;
use crate::process::TokioProcessRunner;
use crate::terminal::ShellTerminal;

pub fn build_process() -> Arc<dyn ProcessRunner> {
    Arc::new(TokioProcessRunner)
}

pub fn build_terminal(cfg: &AppConfig, workdir: &Path) -> Arc<dyn Terminal> {
    Arc::new(ShellTerminal::new(cfg.terminal.shell.clone(), workdir.to_path_buf()))
}

/// `None` when git itself is not installed; the dispatcher treats that as a
/// host without source control.
pub fn build_repositories(git: Option<&Path>, workdir: &Path) -> Option<Arc<dyn RepositoryProvider>> {
    let git = git?;
    Some(Arc::new(GitCliProvider::new(
        git.to_path_buf(),
        workdir.to_path_buf(),
    )))
}

pub fn build_commit(git: Option<&Path>, workdir: &Path) -> Arc<dyn CommitAction> {
    let git = git.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("git"));
    Arc::new(GitCommitAction::new(git, workdir.to_path_buf()))
}

pub fn build_notifier(auto_accept: bool) -> Arc<dyn Notifier> {
    Arc::new(ConsoleNotifier::new(auto_accept))
}

pub fn build_log(cfg: &AppConfig) -> Result<Arc<dyn OutputLog>> {
    Ok(Arc::new(FileLog::new(cfg.log.resolved_path())?))
}

pub fn find_git() -> Option<PathBuf> {
    match which::which("git") {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::debug!(target: "precommit.git", error = %e, "git not found on PATH");
            None
        }
    }
}
