use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::log::OutputLog;
use crate::notify::Notifier;
use crate::runner::{CommitAction, ProcessRunner, Terminal};
use crate::vcs::RepositoryProvider;

/// The host collaborators a [`Dispatcher`](crate::dispatch::Dispatcher) runs against.
pub struct Services {
    pub process: Arc<dyn ProcessRunner>,
    pub terminal: Arc<dyn Terminal>,
    /// `None` when the host has no source-control service at all.
    pub repositories: Option<Arc<dyn RepositoryProvider>>,
    pub commit: Arc<dyn CommitAction>,
    pub notifier: Arc<dyn Notifier>,
    pub log: Arc<dyn OutputLog>,
}

pub trait ServicesFactory {
    fn build_services(&self, cfg: &AppConfig, workdir: &Path) -> anyhow::Result<Services>;
}
