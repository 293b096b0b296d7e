//! ServicesFactory implementation: builds the console, git and process
//! adapters the CLI runs the dispatcher against.
use std::path::Path;

use precommit_core::api::{AppConfig, Services, ServicesFactory};

use crate::factory;

#[derive(Default)]
pub struct PluginServicesFactory {
    /// Accept "Show Details" without prompting.
    pub auto_details: bool,
}

impl PluginServicesFactory {
    pub fn new(auto_details: bool) -> Self {
        Self { auto_details }
    }
}

impl ServicesFactory for PluginServicesFactory {
    fn build_services(&self, cfg: &AppConfig, workdir: &Path) -> anyhow::Result<Services> {
        let git = factory::find_git();
        Ok(Services {
            process: factory::build_process(),
            terminal: factory::build_terminal(cfg, workdir),
            repositories: factory::build_repositories(git.as_deref(), workdir),
            commit: factory::build_commit(git.as_deref(), workdir),
            notifier: factory::build_notifier(self.auto_details),
            log: factory::build_log(cfg)?,
        })
    }
}
