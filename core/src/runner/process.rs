use async_trait::async_trait;

use super::types::{CommandSpec, RawOutput};

/// "Run a command, give back stdout/stderr/exit code".
///
/// An `Err` means the command could not be run at all. A command that runs
/// and exits non-zero is an `Ok` with `exit_code` set.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, spec: &CommandSpec) -> anyhow::Result<RawOutput>;
}
