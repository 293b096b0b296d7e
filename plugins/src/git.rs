//! Repository access through the `git` command line.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;

use precommit_core::api::{FileStatus, Repository, RepositoryProvider};

/// Finds the repository enclosing `workdir`, if any.
pub struct GitCliProvider {
    git: PathBuf,
    workdir: PathBuf,
}

impl GitCliProvider {
    pub fn new(git: PathBuf, workdir: PathBuf) -> Self {
        Self { git, workdir }
    }
}

#[async_trait]
impl RepositoryProvider for GitCliProvider {
    async fn repository(&self) -> Option<Arc<dyn Repository>> {
        let output = Command::new(&self.git)
            .arg("-C")
            .arg(&self.workdir)
            .args(["rev-parse", "--show-toplevel"])
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(out) if out.status.success() => {
                let root = canonical_root(String::from_utf8_lossy(&out.stdout).trim()).await;
                tracing::debug!(target: "precommit.git", root = %root.display(), "repository found");
                Some(Arc::new(GitRepository::new(self.git.clone(), root)))
            }
            Ok(out) => {
                tracing::debug!(
                    target: "precommit.git",
                    workdir = %self.workdir.display(),
                    stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                    "not inside a repository"
                );
                None
            }
            Err(e) => {
                tracing::warn!(target: "precommit.git", error = %e, "failed to run git");
                None
            }
        }
    }
}

/// Saved paths are canonicalized before the staged lookup, so the root the
/// status entries hang off must be too (`C:/x` vs `\\?\C:\x` on Windows).
pub async fn canonical_root(raw: &str) -> PathBuf {
    tokio::fs::canonicalize(raw)
        .await
        .unwrap_or_else(|_| PathBuf::from(raw))
}

pub struct GitRepository {
    git: PathBuf,
    root: PathBuf,
}

impl GitRepository {
    pub fn new(git: PathBuf, root: PathBuf) -> Self {
        Self { git, root }
    }
}

#[async_trait]
impl Repository for GitRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn status(&self) -> anyhow::Result<Vec<FileStatus>> {
        let out = Command::new(&self.git)
            .arg("-C")
            .arg(&self.root)
            .args(["status", "--porcelain=v1", "-z"])
            .stdin(Stdio::null())
            .output()
            .await
            .context("failed to run git status")?;
        if !out.status.success() {
            anyhow::bail!(
                "git status failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }
        Ok(parse_porcelain(&self.root, &String::from_utf8_lossy(&out.stdout)))
    }
}

/// Parses `git status --porcelain=v1 -z`. A file is staged when its index
/// column holds a change; untracked and ignored entries never are.
pub fn parse_porcelain(root: &Path, raw: &str) -> Vec<FileStatus> {
    let mut statuses = Vec::new();
    let mut entries = raw.split('\0').filter(|e| !e.is_empty());

    while let Some(entry) = entries.next() {
        let Some((code, path)) = entry.split_at_checked(3) else {
            continue;
        };
        let index = code.chars().next().unwrap_or(' ');
        if matches!(index, 'R' | 'C') {
            // source path of the rename/copy follows
            entries.next();
        }
        statuses.push(FileStatus {
            path: root.join(path),
            staged: !matches!(index, ' ' | '?' | '!'),
        });
    }
    statuses
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn status(path: &str, staged: bool) -> FileStatus {
        FileStatus {
            path: PathBuf::from(path),
            staged,
        }
    }

    #[test]
    fn index_column_decides_staged() {
        let raw = "M  a.py\0 M b.py\0MM c.py\0A  new.py\0?? junk.txt\0D  gone.py\0";
        assert_eq!(
            parse_porcelain(Path::new("/repo"), raw),
            vec![
                status("/repo/a.py", true),
                status("/repo/b.py", false),
                status("/repo/c.py", true),
                status("/repo/new.py", true),
                status("/repo/junk.txt", false),
                status("/repo/gone.py", true),
            ]
        );
    }

    #[test]
    fn rename_source_is_not_an_entry() {
        let raw = "R  src/new name.py\0src/old.py\0 M other.py\0";
        assert_eq!(
            parse_porcelain(Path::new("/repo"), raw),
            vec![
                status("/repo/src/new name.py", true),
                status("/repo/other.py", false),
            ]
        );
    }

    #[tokio::test]
    async fn root_is_canonicalized_like_saved_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let raw = dir.path().join("sub").join("..");
        let root = canonical_root(&raw.to_string_lossy()).await;
        assert_eq!(root, dir.path().canonicalize().unwrap());

        let saved = dir.path().join("a.py");
        std::fs::write(&saved, "x = 1\n").unwrap();
        let entries = parse_porcelain(&root, "M  a.py\0");
        assert_eq!(entries[0].path, saved.canonicalize().unwrap());
    }

    #[tokio::test]
    async fn missing_root_is_kept_verbatim() {
        assert_eq!(
            canonical_root("/no/such/repo/root").await,
            PathBuf::from("/no/such/repo/root")
        );
    }

    #[test]
    fn empty_status_has_no_entries() {
        assert!(parse_porcelain(Path::new("/repo"), "").is_empty());
    }
}
