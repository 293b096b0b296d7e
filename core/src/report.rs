//! Writes a [`RunResult`] to the output log and tells the user about it.

use std::sync::Arc;

use crate::classify::RunResult;
use crate::error::ExecutionError;
use crate::log::OutputLog;
use crate::notify::{NotificationLevel, Notifier, SHOW_DETAILS};
use crate::runner::Transcript;

pub const RESULTS_HEADER: &str = "Pre-commit Results:";
pub const RESULTS_RULE: &str = "==================";
pub const FIXES_HEADER: &str = "Fixes Applied:";
pub const FAILURES_HEADER: &str = "Failures:";
pub const FIX_PREFIX: &str = "✓ ";
pub const FAILURE_PREFIX: &str = "✗ ";
pub const TRANSCRIPT_HEADER: &str = "Pre-commit Output:";
pub const ERROR_HEADER: &str = "Error running pre-commit:";

pub const MSG_FAILED: &str = "Pre-commit failed. Click \"Show Details\" to see what failed.";
pub const MSG_FIXED: &str =
    "Pre-commit applied fixes. Click \"Show Details\" to see what was fixed.";
pub const MSG_PASSED: &str = "Pre-commit checks passed.";
pub const MSG_STDERR_ONLY: &str =
    "Pre-commit finished with errors. Click \"Show Details\" to see the output.";
pub const MSG_COMMITTED: &str = "Changes committed successfully!";
pub const MSG_COMMIT_REJECTED: &str =
    "Pre-commit checks failed. Please fix the issues and try again.";
pub const MSG_EXECUTION_ERROR: &str =
    "Error running pre-commit. See the output log for details.";
pub const MSG_READ_OUTPUT_ERROR: &str = "Failed to read pre-commit output";

const TRANSCRIPT_RULE_WIDTH: usize = 20;

/// Renders the results block: header, rule, then the fixes and failures
/// sections when they are non-empty.
pub fn render_result(result: &RunResult) -> Vec<String> {
    let mut lines = vec![RESULTS_HEADER.to_string(), RESULTS_RULE.to_string()];

    if !result.fixes.is_empty() {
        lines.push(String::new());
        lines.push(FIXES_HEADER.to_string());
        lines.extend(result.fixes.iter().map(|f| format!("{FIX_PREFIX}{}", f.text)));
    }

    if !result.failures.is_empty() {
        lines.push(String::new());
        lines.push(FAILURES_HEADER.to_string());
        lines.extend(
            result
                .failures
                .iter()
                .map(|f| format!("{FAILURE_PREFIX}{}", f.text)),
        );
    }

    lines
}

/// Results block followed by the raw transcript between two rules.
pub fn render_transcript(result: &RunResult, transcript: &Transcript) -> Vec<String> {
    let rule = "=".repeat(TRANSCRIPT_RULE_WIDTH);
    let mut lines = render_result(result);
    lines.push(String::new());
    lines.push(TRANSCRIPT_HEADER.to_string());
    lines.push(rule.clone());
    lines.extend(transcript.text.lines().map(str::to_string));
    lines.push(rule);
    lines
}

/// Level and message for the one notification a finished run gets.
pub fn summary_notification(result: &RunResult) -> (NotificationLevel, &'static str) {
    if !result.failures.is_empty() {
        (NotificationLevel::Error, MSG_FAILED)
    } else if !result.fixes.is_empty() {
        (NotificationLevel::Info, MSG_FIXED)
    } else if result.passed {
        (NotificationLevel::Info, MSG_PASSED)
    } else {
        (NotificationLevel::Info, MSG_STDERR_ONLY)
    }
}

#[derive(Clone)]
pub struct Reporter {
    log: Arc<dyn OutputLog>,
    notifier: Arc<dyn Notifier>,
}

impl Reporter {
    pub fn new(log: Arc<dyn OutputLog>, notifier: Arc<dyn Notifier>) -> Self {
        Self { log, notifier }
    }

    pub async fn report(&self, result: &RunResult) {
        self.log.rewrite(&render_result(result));
        let (level, message) = summary_notification(result);
        self.offer_details(level, message).await;
    }

    /// Writes the commit-interception report. The verdict comes from the
    /// terminal's exit status; `committed` says whether the commit ran.
    pub async fn report_intercept(&self, result: &RunResult, transcript: &Transcript, committed: bool) {
        self.log.rewrite(&render_transcript(result, transcript));
        if committed {
            self.offer_details(NotificationLevel::Info, MSG_COMMITTED).await;
        } else {
            self.offer_details(NotificationLevel::Error, MSG_COMMIT_REJECTED)
                .await;
        }
    }

    /// Checks passed but the commit itself failed.
    pub async fn report_commit_failure(
        &self,
        result: &RunResult,
        transcript: &Transcript,
        err: &ExecutionError,
    ) {
        let mut lines = render_transcript(result, transcript);
        lines.push(String::new());
        lines.push(ERROR_HEADER.to_string());
        lines.push(err.to_string());
        self.log.rewrite(&lines);
        self.log.show();
        let _ = self
            .notifier
            .notify(NotificationLevel::Error, MSG_EXECUTION_ERROR, &[])
            .await;
    }

    /// The tool could not be run, or its output could not be collected.
    pub async fn report_error(&self, err: &ExecutionError) {
        self.log.append_block(&[ERROR_HEADER.to_string(), err.to_string()]);
        self.log.show();
        let message = match err {
            ExecutionError::ReadOutput { .. } => MSG_READ_OUTPUT_ERROR,
            _ => MSG_EXECUTION_ERROR,
        };
        let _ = self
            .notifier
            .notify(NotificationLevel::Error, message, &[])
            .await;
    }

    /// Errors that stop a trigger before anything runs.
    pub async fn report_unavailable(&self, message: &str) {
        self.log.append_line(message);
        let _ = self
            .notifier
            .notify(NotificationLevel::Error, message, &[])
            .await;
    }

    async fn offer_details(&self, level: NotificationLevel, message: &str) {
        let picked = self.notifier.notify(level, message, &[SHOW_DETAILS]).await;
        if picked.as_deref() == Some(SHOW_DETAILS) {
            self.log.show();
        }
    }
}
