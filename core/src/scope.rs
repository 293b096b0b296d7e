use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// The set of files one run applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "paths", rename_all = "snake_case")]
pub enum RunScope {
    AllFiles,
    SingleFile(PathBuf),
    /// An empty list leaves staged-file selection to the tool itself.
    StagedFiles(Vec<PathBuf>),
}

impl RunScope {
    /// Arguments following the tool's `run` subcommand.
    pub fn to_args(&self) -> Vec<String> {
        match self {
            RunScope::AllFiles => vec!["--all-files".to_string()],
            RunScope::SingleFile(path) => {
                vec!["--files".to_string(), path.to_string_lossy().into_owned()]
            }
            RunScope::StagedFiles(paths) if paths.is_empty() => Vec::new(),
            RunScope::StagedFiles(paths) => std::iter::once("--files".to_string())
                .chain(paths.iter().map(|p| p.to_string_lossy().into_owned()))
                .collect(),
        }
    }
}

impl fmt::Display for RunScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunScope::AllFiles => write!(f, "all files"),
            RunScope::SingleFile(path) => write!(f, "{}", path.display()),
            RunScope::StagedFiles(paths) if paths.is_empty() => write!(f, "staged files"),
            RunScope::StagedFiles(paths) => write!(f, "{} staged file(s)", paths.len()),
        }
    }
}
