use crate::runner::RawOutput;

use super::{meaningful_lines, Classifier, Finding, RunResult, FAILURE_MARKER};

/// Classifies by stream: every non-blank stderr line is a failure unless it
/// already says `"Failed"`. Fixes are only read from stdout.
#[derive(Debug, Clone)]
pub struct StreamClassifier {
    fix_marker: &'static str,
}

impl StreamClassifier {
    pub fn new(fix_marker: &'static str) -> Self {
        Self { fix_marker }
    }
}

impl Default for StreamClassifier {
    fn default() -> Self {
        Self::new(super::FIX_MARKER)
    }
}

impl Classifier for StreamClassifier {
    fn name(&self) -> &str {
        "stream"
    }

    fn classify(&self, raw: &RawOutput) -> RunResult {
        let fixes = meaningful_lines(&raw.stdout)
            .filter(|(line, _)| line.contains(self.fix_marker))
            .map(|(_, trimmed)| Finding::fix(trimmed))
            .collect();

        let failures: Vec<Finding> = meaningful_lines(&raw.stderr)
            .filter(|(line, _)| !line.contains(FAILURE_MARKER))
            .map(|(_, trimmed)| Finding::failure(trimmed))
            .collect();

        RunResult {
            passed: raw.stderr.is_empty() && failures.is_empty(),
            fixes,
            failures,
        }
    }
}
