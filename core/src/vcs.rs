//! What the dispatcher needs to know about version control.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

/// One entry of the repository's change list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Absolute path.
    pub path: PathBuf,
    pub staged: bool,
}

#[async_trait]
pub trait Repository: Send + Sync {
    fn root(&self) -> &Path;

    /// Changed files, staged or not, with absolute paths.
    async fn status(&self) -> anyhow::Result<Vec<FileStatus>>;

    async fn is_staged(&self, path: &Path) -> anyhow::Result<bool> {
        Ok(self
            .status()
            .await?
            .iter()
            .any(|s| s.staged && s.path == path))
    }

    async fn staged_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        Ok(self
            .status()
            .await?
            .into_iter()
            .filter(|s| s.staged)
            .map(|s| s.path)
            .collect())
    }
}

/// The host's source-control service. A host without one passes no
/// provider at all to the dispatcher.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// The repository for the current workspace, if there is one.
    async fn repository(&self) -> Option<Arc<dyn Repository>>;
}
