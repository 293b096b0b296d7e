//! Decides whether a trigger starts a run, over which scope, and hands the
//! outcome to the reporter.

mod types;

pub use types::{DispatchOutcome, SkipReason, Trigger};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::classify::{build_classifier, Classifier, RunResult};
use crate::config::ExecutorStrategy;
use crate::context::AppContext;
use crate::error::{ConfigError, DispatchError, ExecutionError};
use crate::events_out::{write_run_event, EventsOutTx, RunEvent};
use crate::log::OutputLog;
use crate::report::Reporter;
use crate::runner::{CommitAction, DirectCapture, RawOutput, TerminalRelay};
use crate::scope::RunScope;
use crate::services::Services;
use crate::vcs::{Repository, RepositoryProvider};

pub struct Dispatcher {
    direct: DirectCapture,
    relay: TerminalRelay,
    strategy: ExecutorStrategy,
    classifier: Arc<dyn Classifier>,
    reporter: Reporter,
    repositories: Option<Arc<dyn RepositoryProvider>>,
    commit: Arc<dyn CommitAction>,
    log: Arc<dyn OutputLog>,
    events_out: Option<EventsOutTx>,
}

impl Dispatcher {
    /// `workdir` is where the tool runs; `None` inherits the host's.
    pub fn new(
        ctx: &AppContext,
        services: Services,
        workdir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let cfg = ctx.cfg();
        let relay = TerminalRelay::new(services.terminal, cfg.tool.clone(), &cfg.terminal)?;
        Ok(Self {
            direct: DirectCapture::new(services.process, cfg.tool.clone(), workdir),
            relay,
            strategy: cfg.executor.strategy,
            classifier: build_classifier(&cfg.classifier),
            reporter: Reporter::new(services.log.clone(), services.notifier),
            repositories: services.repositories,
            commit: services.commit,
            log: services.log,
            events_out: ctx.events_out(),
        })
    }

    pub fn show_log(&self) {
        self.log.show();
    }

    pub fn clear_log(&self) {
        self.log.clear();
    }

    /// A file was saved. Runs only when that file is staged; every other
    /// case is a silent no-op.
    pub async fn on_save(&self, path: &Path) -> DispatchOutcome {
        let Some(provider) = &self.repositories else {
            tracing::debug!(target: "precommit.dispatch", "no source control service, save ignored");
            return DispatchOutcome::Skipped(SkipReason::NoRepositoryService);
        };
        let Some(repo) = provider.repository().await else {
            tracing::debug!(target: "precommit.dispatch", "no repository, save ignored");
            return DispatchOutcome::Skipped(SkipReason::NoRepository);
        };

        let path = absolute_path(path).await;
        match repo.is_staged(&path).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(
                    target: "precommit.dispatch",
                    path = %path.display(),
                    "saved file is not staged"
                );
                return DispatchOutcome::Skipped(SkipReason::NotStaged);
            }
            Err(e) => {
                tracing::warn!(
                    target: "precommit.dispatch",
                    error = %e,
                    "could not read repository status, save ignored"
                );
                return DispatchOutcome::Skipped(SkipReason::StatusUnavailable);
            }
        }

        self.run_scope(Trigger::Save, RunScope::SingleFile(path))
            .await
    }

    /// "Run checks now": every file, but only inside a repository.
    pub async fn run_manual(&self) -> DispatchOutcome {
        if self.require_repository().await.is_none() {
            return DispatchOutcome::ScopeUnavailable;
        }
        self.run_scope(Trigger::Manual, RunScope::AllFiles).await
    }

    /// Runs the staged files in a visible terminal and commits only when
    /// the terminal reports success. The log is cleared and brought forward
    /// before the terminal starts.
    pub async fn intercept_commit(&self) -> DispatchOutcome {
        let Some(repo) = self.require_repository().await else {
            return DispatchOutcome::ScopeUnavailable;
        };
        self.log.clear();
        self.log.show();

        let staged = match repo.staged_files().await {
            Ok(files) => files,
            Err(e) => {
                // the tool falls back to its own staged-file detection
                tracing::warn!(
                    target: "precommit.dispatch",
                    error = %e,
                    "could not list staged files"
                );
                Vec::new()
            }
        };
        let scope = RunScope::StagedFiles(staged);

        let run_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        self.emit_start(&run_id, Trigger::Intercept, &scope).await;

        let transcript = match self.relay.execute(&scope).await {
            Ok(t) => t,
            Err(e) => return self.fail(&run_id, e).await,
        };
        let result = self.classifier.classify(&transcript.as_raw_output());

        if !transcript.succeeded() {
            tracing::info!(
                target: "precommit.dispatch",
                exit_code = ?transcript.exit_code,
                "checks failed, commit withheld"
            );
            self.reporter
                .report_intercept(&result, &transcript, false)
                .await;
            self.emit_end(&run_id, &result, transcript.exit_code, started)
                .await;
            return DispatchOutcome::CommitRejected(result);
        }

        if let Err(e) = self.commit.commit().await {
            let err = ExecutionError::Commit(e.to_string());
            self.reporter
                .report_commit_failure(&result, &transcript, &err)
                .await;
            self.emit_error(&run_id, &err).await;
            return DispatchOutcome::ExecutionFailed(err.to_string());
        }

        self.reporter
            .report_intercept(&result, &transcript, true)
            .await;
        self.emit_end(&run_id, &result, transcript.exit_code, started)
            .await;
        DispatchOutcome::Committed(result)
    }

    async fn require_repository(&self) -> Option<Arc<dyn Repository>> {
        let repo = match &self.repositories {
            Some(provider) => provider.repository().await,
            None => None,
        };
        if repo.is_none() {
            let err = DispatchError::ScopeUnavailable;
            tracing::warn!(target: "precommit.dispatch", "{err}");
            self.reporter.report_unavailable(&err.to_string()).await;
        }
        repo
    }

    async fn run_scope(&self, trigger: Trigger, scope: RunScope) -> DispatchOutcome {
        let run_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        self.emit_start(&run_id, trigger, &scope).await;

        let raw = match self.execute(&scope).await {
            Ok(raw) => raw,
            Err(e) => return self.fail(&run_id, e).await,
        };

        let result = self.classifier.classify(&raw);
        tracing::info!(
            target: "precommit.dispatch",
            trigger = %trigger,
            classifier = self.classifier.name(),
            passed = result.passed,
            fixes = result.fixes.len(),
            failures = result.failures.len(),
            "run classified"
        );
        self.reporter.report(&result).await;
        self.emit_end(&run_id, &result, raw.exit_code, started).await;
        DispatchOutcome::Reported(result)
    }

    async fn execute(&self, scope: &RunScope) -> Result<RawOutput, ExecutionError> {
        match self.strategy {
            ExecutorStrategy::Direct => self.direct.execute(scope).await,
            ExecutorStrategy::Terminal => self
                .relay
                .execute(scope)
                .await
                .map(|t| t.as_raw_output()),
        }
    }

    async fn fail(&self, run_id: &str, err: ExecutionError) -> DispatchOutcome {
        tracing::error!(target: "precommit.dispatch", error = %err, "run could not complete");
        self.reporter.report_error(&err).await;
        self.emit_error(run_id, &err).await;
        DispatchOutcome::ExecutionFailed(err.to_string())
    }

    async fn emit_start(&self, run_id: &str, trigger: Trigger, scope: &RunScope) {
        let ev = RunEvent::new("run.start", run_id).with_data(serde_json::json!({
            "trigger": trigger.as_str(),
            "scope": scope,
        }));
        write_run_event(self.events_out.as_ref(), &ev).await;
    }

    async fn emit_end(
        &self,
        run_id: &str,
        result: &RunResult,
        exit_code: Option<i32>,
        started: Instant,
    ) {
        let ev = RunEvent::new("run.end", run_id).with_data(serde_json::json!({
            "passed": result.passed,
            "fixes": result.fixes.len(),
            "failures": result.failures.len(),
            "exit_code": exit_code,
            "duration_ms": started.elapsed().as_millis() as u64,
        }));
        write_run_event(self.events_out.as_ref(), &ev).await;
    }

    async fn emit_error(&self, run_id: &str, err: &ExecutionError) {
        let ev = RunEvent::new("run.error", run_id)
            .with_data(serde_json::json!({ "message": err.to_string() }));
        write_run_event(self.events_out.as_ref(), &ev).await;
    }
}

async fn absolute_path(path: &Path) -> PathBuf {
    match tokio::fs::canonicalize(path).await {
        Ok(p) => p,
        Err(_) => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}
