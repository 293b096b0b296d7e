use std::path::PathBuf;

use thiserror::Error;

/// The tool could not be invoked, or its outcome could not be collected.
///
/// Distinct from a check that ran and failed: that is a normal
/// [`RunResult`](crate::classify::RunResult) with `passed == false`.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to spawn {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("terminal failed: {0}")]
    Terminal(String),

    #[error("Failed to read output from {}", path.display())]
    ReadOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("commit failed: {0}")]
    Commit(String),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No Git repository found")]
    ScopeUnavailable,

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("config value invalid: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Command(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
