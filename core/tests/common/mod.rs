//! In-memory stand-ins for every host collaborator.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use precommit_core::api::{
    AppConfig, AppContext, CommandSpec, CommitAction, Dispatcher, FileStatus, MemoryLog,
    NotificationLevel, Notifier, ProcessRunner, RawOutput, Repository, RepositoryProvider,
    Services, Terminal,
};

pub struct FakeProcess {
    pub calls: Mutex<Vec<CommandSpec>>,
    pub output: Option<RawOutput>,
    pub delay: Option<Duration>,
}

impl FakeProcess {
    pub fn returning(stdout: &str, stderr: &str, exit_code: i32) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            output: Some(RawOutput::new(stdout, stderr).with_exit_code(exit_code)),
            delay: None,
        })
    }

    pub fn delayed(stdout: &str, exit_code: i32, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            output: Some(RawOutput::new(stdout, "").with_exit_code(exit_code)),
            delay: Some(delay),
        })
    }

    pub fn failing_to_launch() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            output: None,
            delay: None,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ProcessRunner for FakeProcess {
    fn name(&self) -> &str {
        "fake"
    }

    async fn run(&self, spec: &CommandSpec) -> anyhow::Result<RawOutput> {
        self.calls.lock().unwrap().push(spec.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.output {
            Some(out) => Ok(out.clone()),
            None => anyhow::bail!("No such file or directory (os error 2)"),
        }
    }
}

/// Plays the part of the terminal: "runs" the line by writing the scripted
/// transcript where `tee` would have put it.
pub struct FakeTerminal {
    pub lines: Mutex<Vec<String>>,
    pub transcript_path: PathBuf,
    pub transcript: Option<String>,
    pub exit_code: Option<i32>,
}

impl FakeTerminal {
    pub fn new(transcript_path: PathBuf, transcript: Option<&str>, exit_code: Option<i32>) -> Arc<Self> {
        Arc::new(Self {
            lines: Mutex::new(Vec::new()),
            transcript_path,
            transcript: transcript.map(str::to_string),
            exit_code,
        })
    }

    pub fn call_count(&self) -> usize {
        self.lines.lock().unwrap().len()
    }
}

#[async_trait]
impl Terminal for FakeTerminal {
    async fn run_visible(&self, command_line: &str) -> anyhow::Result<Option<i32>> {
        self.lines.lock().unwrap().push(command_line.to_string());
        if let Some(t) = &self.transcript {
            std::fs::write(&self.transcript_path, t)?;
        }
        Ok(self.exit_code)
    }
}

pub struct FakeRepo {
    pub root: PathBuf,
    pub status: Vec<FileStatus>,
    pub broken: bool,
}

#[async_trait]
impl Repository for FakeRepo {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn status(&self) -> anyhow::Result<Vec<FileStatus>> {
        if self.broken {
            anyhow::bail!("fatal: index file corrupt");
        }
        Ok(self.status.clone())
    }
}

pub struct FakeProvider {
    pub repo: Option<Arc<FakeRepo>>,
}

#[async_trait]
impl RepositoryProvider for FakeProvider {
    async fn repository(&self) -> Option<Arc<dyn Repository>> {
        self.repo.clone().map(|r| r as Arc<dyn Repository>)
    }
}

#[derive(Default)]
pub struct FakeCommit {
    pub count: AtomicUsize,
    pub fail: bool,
}

impl FakeCommit {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommitAction for FakeCommit {
    async fn commit(&self) -> anyhow::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("nothing added to commit");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shown {
    pub level: NotificationLevel,
    pub message: String,
    pub actions: Vec<String>,
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<Shown>>,
    pub answer: Option<String>,
}

impl RecordingNotifier {
    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        level: NotificationLevel,
        message: &str,
        actions: &[&str],
    ) -> Option<String> {
        self.shown.lock().unwrap().push(Shown {
            level,
            message: message.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        });
        self.answer.clone()
    }
}

pub fn staged(path: &str) -> FileStatus {
    FileStatus {
        path: PathBuf::from(path),
        staged: true,
    }
}

pub fn unstaged(path: &str) -> FileStatus {
    FileStatus {
        path: PathBuf::from(path),
        staged: false,
    }
}

/// Everything a test needs to drive and inspect one dispatcher.
pub struct Harness {
    pub dispatcher: Dispatcher,
    pub process: Arc<FakeProcess>,
    pub terminal: Arc<FakeTerminal>,
    pub commit: Arc<FakeCommit>,
    pub notifier: Arc<RecordingNotifier>,
    pub log: Arc<MemoryLog>,
    pub _dir: tempfile::TempDir,
}

pub struct HarnessBuilder {
    process: Arc<FakeProcess>,
    repo: Option<FakeRepo>,
    has_service: bool,
    transcript: Option<String>,
    terminal_exit: Option<i32>,
    commit_fails: bool,
    answer: Option<String>,
    cfg: AppConfig,
}

impl HarnessBuilder {
    pub fn new(process: Arc<FakeProcess>) -> Self {
        Self {
            process,
            repo: Some(FakeRepo {
                root: PathBuf::from("/repo"),
                status: Vec::new(),
                broken: false,
            }),
            has_service: true,
            transcript: None,
            terminal_exit: None,
            commit_fails: false,
            answer: None,
            cfg: AppConfig::default(),
        }
    }

    pub fn status(mut self, status: Vec<FileStatus>) -> Self {
        if let Some(repo) = self.repo.as_mut() {
            repo.status = status;
        }
        self
    }

    pub fn broken_status(mut self) -> Self {
        if let Some(repo) = self.repo.as_mut() {
            repo.broken = true;
        }
        self
    }

    pub fn no_repository(mut self) -> Self {
        self.repo = None;
        self
    }

    pub fn no_service(mut self) -> Self {
        self.has_service = false;
        self
    }

    pub fn terminal(mut self, transcript: Option<&str>, exit_code: Option<i32>) -> Self {
        self.transcript = transcript.map(str::to_string);
        self.terminal_exit = exit_code;
        self
    }

    pub fn commit_fails(mut self) -> Self {
        self.commit_fails = true;
        self
    }

    pub fn answer(mut self, action: &str) -> Self {
        self.answer = Some(action.to_string());
        self
    }

    pub fn config(mut self, f: impl FnOnce(&mut AppConfig)) -> Self {
        f(&mut self.cfg);
        self
    }

    pub fn build(self) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = self.cfg;
        cfg.terminal.output_path = dir.path().join("pre-commit-output");

        let terminal = FakeTerminal::new(
            cfg.terminal.output_path.clone(),
            self.transcript.as_deref(),
            self.terminal_exit,
        );
        let commit = Arc::new(FakeCommit {
            count: AtomicUsize::new(0),
            fail: self.commit_fails,
        });
        let notifier = Arc::new(RecordingNotifier {
            shown: Mutex::new(Vec::new()),
            answer: self.answer,
        });
        let log = Arc::new(MemoryLog::new());

        let repositories: Option<Arc<dyn RepositoryProvider>> = if self.has_service {
            Some(Arc::new(FakeProvider {
                repo: self.repo.map(Arc::new),
            }))
        } else {
            None
        };

        let services = Services {
            process: self.process.clone(),
            terminal: terminal.clone(),
            repositories,
            commit: commit.clone(),
            notifier: notifier.clone(),
            log: log.clone(),
        };
        let ctx = AppContext::without_events(cfg);
        let dispatcher = Dispatcher::new(&ctx, services, Some(PathBuf::from("/repo"))).unwrap();

        Harness {
            dispatcher,
            process: self.process,
            terminal,
            commit,
            notifier,
            log,
            _dir: dir,
        }
    }
}
