//! Turns the tool's free-form report into a [`RunResult`].
//!
//! Two policies are observed in the wild and they disagree on lines that
//! contain `"Failed"`. Both sit behind [`Classifier`] so the reporting path
//! never matches strings itself.

mod content;
mod stream;

use std::sync::Arc;

use serde::Serialize;

use crate::config::{ClassifierConfig, ClassifierPolicy};
use crate::runner::RawOutput;

pub use content::ContentClassifier;
pub use stream::StreamClassifier;

pub const FIX_MARKER: &str = "Fixing";
pub const STRICT_FIX_MARKER: &str = "Fixing ";
pub const FAILURE_MARKER: &str = "Failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Fix,
    Failure,
}

/// One trimmed line of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub text: String,
}

impl Finding {
    pub fn fix(text: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Fix,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Failure,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunResult {
    pub passed: bool,
    pub fixes: Vec<Finding>,
    pub failures: Vec<Finding>,
}

impl RunResult {
    pub fn fix_texts(&self) -> Vec<&str> {
        self.fixes.iter().map(|f| f.text.as_str()).collect()
    }

    pub fn failure_texts(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.text.as_str()).collect()
    }
}

pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Must be a pure function of `raw`.
    fn classify(&self, raw: &RawOutput) -> RunResult;
}

pub fn build_classifier(cfg: &ClassifierConfig) -> Arc<dyn Classifier> {
    let fix_marker = if cfg.strict_fix_marker {
        STRICT_FIX_MARKER
    } else {
        FIX_MARKER
    };
    match cfg.policy {
        ClassifierPolicy::Content => Arc::new(ContentClassifier::new(fix_marker)),
        ClassifierPolicy::Stream => Arc::new(StreamClassifier::new(fix_marker)),
    }
}

/// Lines of `text` with surrounding whitespace removed; blank lines dropped.
pub(crate) fn meaningful_lines(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines()
        .map(|line| (line, line.trim()))
        .filter(|(_, trimmed)| !trimmed.is_empty())
}
