//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `precommit_core::api` instead of reaching into internal modules.

pub use crate::classify::{
    build_classifier, Classifier, ContentClassifier, Finding, FindingKind, RunResult,
    StreamClassifier,
};
pub use crate::config::{
    load_default, load_from, AppConfig, ClassifierConfig, ClassifierPolicy, EventsOutConfig,
    ExecutorStrategy, LogConfig, LoggingConfig, TerminalConfig, ToolConfig,
};
pub use crate::context::AppContext;
pub use crate::dispatch::{DispatchOutcome, Dispatcher, SkipReason, Trigger};
pub use crate::error::{CliError, ConfigError, DispatchError, ExecutionError};
pub use crate::events_out::EventsOutTx;
pub use crate::log::{MemoryLog, OutputLog};
pub use crate::notify::{NotificationLevel, Notifier, SHOW_DETAILS};
pub use crate::report::{render_result, Reporter};
pub use crate::runner::{
    normalize_exit, CommandSpec, CommitAction, ProcessRunner, RawOutput, Terminal, Transcript,
};
pub use crate::scope::RunScope;
pub use crate::services::{Services, ServicesFactory};
pub use crate::vcs::{FileStatus, Repository, RepositoryProvider};
