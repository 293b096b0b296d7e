use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub terminal: TerminalConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub events_out: EventsOutConfig,
}

/// The checking tool and the fixed arguments passed before the scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_tool_bin")]
    pub bin: String,

    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_tool_bin() -> String {
    "pre-commit".to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            bin: default_tool_bin(),
            extra_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorStrategy {
    #[default]
    Direct,
    Terminal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Strategy for save-triggered and manual runs. Commit interception
    /// always goes through the terminal relay.
    #[serde(default)]
    pub strategy: ExecutorStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierPolicy {
    #[default]
    Content,
    Stream,
}

impl std::str::FromStr for ClassifierPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content" => Ok(Self::Content),
            "stream" => Ok(Self::Stream),
            other => Err(format!("unknown classifier policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub policy: ClassifierPolicy,

    /// Match `"Fixing "` (with the trailing space) instead of `"Fixing"`.
    #[serde(default)]
    pub strict_fix_marker: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Shell line with `${tool}`, `${scope}` and `${output}` slots.
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_shell() -> String {
    "bash".to_string()
}

fn default_template() -> String {
    "set -o pipefail; ${tool} run ${scope} 2>&1 | tee ${output}".to_string()
}

fn default_output_path() -> PathBuf {
    if cfg!(unix) {
        PathBuf::from("/tmp/pre-commit-output")
    } else {
        std::env::temp_dir().join("pre-commit-output")
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            template: default_template(),
            output_path: default_output_path(),
        }
    }
}

/// Where the user-facing output log lives between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_path")]
    pub path: String,
}

fn default_log_path() -> String {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("precommit-helper")
        .join("output.log")
        .to_string_lossy()
        .into_owned()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
        }
    }
}

impl LogConfig {
    /// The log path with `~` and environment variables expanded.
    pub fn resolved_path(&self) -> PathBuf {
        match shellexpand::full(&self.path) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => PathBuf::from(&self.path),
        }
    }
}

/// Diagnostics for the helper itself (tracing), not the user-facing log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,

    #[serde(default = "default_logging_file")]
    pub file_name: String,
}

fn default_logging_level() -> String {
    "info".to_string()
}

fn default_logging_file() -> String {
    "precommit-helper.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_logging_level(),
            directory: None,
            file_name: default_logging_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsOutConfig {
    #[serde(default)]
    pub enabled: bool,

    /// File path, or `stdout:` to write events to standard output.
    #[serde(default = "default_events_path")]
    pub path: String,

    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    #[serde(default = "default_drop_when_full")]
    pub drop_when_full: bool,
}

fn default_events_path() -> String {
    "precommit-events.jsonl".to_string()
}

fn default_channel_capacity() -> usize {
    256
}

fn default_drop_when_full() -> bool {
    true
}

impl Default for EventsOutConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_events_path(),
            channel_capacity: default_channel_capacity(),
            drop_when_full: default_drop_when_full(),
        }
    }
}
