use crate::runner::RawOutput;

use super::{meaningful_lines, Classifier, Finding, RunResult, FAILURE_MARKER};

/// Classifies by what a line says, whichever stream it arrived on.
///
/// stdout is scanned before stderr. A line can be both a fix and a failure.
/// Any line containing `"Failed"` counts, so a hook whose name contains the
/// word is reported as a failure too.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    fix_marker: &'static str,
}

impl ContentClassifier {
    pub fn new(fix_marker: &'static str) -> Self {
        Self { fix_marker }
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(super::FIX_MARKER)
    }
}

impl Classifier for ContentClassifier {
    fn name(&self) -> &str {
        "content"
    }

    fn classify(&self, raw: &RawOutput) -> RunResult {
        let mut fixes = Vec::new();
        let mut failures = Vec::new();

        for (line, trimmed) in meaningful_lines(&raw.stdout).chain(meaningful_lines(&raw.stderr)) {
            if line.contains(self.fix_marker) {
                fixes.push(Finding::fix(trimmed));
            }
            if line.contains(FAILURE_MARKER) {
                failures.push(Finding::failure(trimmed));
            }
        }

        RunResult {
            passed: raw.stderr.is_empty() && failures.is_empty(),
            fixes,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn classify(stdout: &str, stderr: &str) -> RunResult {
        ContentClassifier::default().classify(&RawOutput::new(stdout, stderr))
    }

    #[test]
    fn fix_on_stdout_passes() {
        let result = classify("Fixing foo.py\n", "");
        assert_eq!(
            result,
            RunResult {
                passed: true,
                fixes: vec![Finding::fix("Fixing foo.py")],
                failures: vec![],
            }
        );
    }

    #[test]
    fn failed_on_stderr_fails() {
        let result = classify("", "Failed to lint bar.py\n");
        assert!(!result.passed);
        assert_eq!(result.failure_texts(), vec!["Failed to lint bar.py"]);
        assert!(result.fixes.is_empty());
    }

    #[test]
    fn failed_on_stdout_is_a_failure() {
        let stdout = "\
trim trailing whitespace.................................................Passed
black....................................................................Failed
- hook id: black
- files were modified by this hook
";
        let result = classify(stdout, "");
        assert!(!result.passed);
        assert_eq!(
            result.failure_texts(),
            vec!["black....................................................................Failed"]
        );
    }

    #[test]
    fn fixes_are_kept_when_the_run_fails() {
        let stdout = "Fixing src/a.py\nFixing src/b.py\nflake8...Failed\n";
        let result = classify(stdout, "");
        assert!(!result.passed);
        assert_eq!(result.fix_texts(), vec!["Fixing src/a.py", "Fixing src/b.py"]);
        assert_eq!(result.failure_texts(), vec!["flake8...Failed"]);
    }

    #[test]
    fn stderr_without_failed_blocks_pass_but_adds_no_failure() {
        let result = classify("", "[WARNING] unstaged files detected\n");
        assert!(!result.passed);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn lines_are_trimmed_and_blanks_dropped() {
        let result = classify("   Fixing  x.py   \n\n \t \n", "\n   \n");
        assert_eq!(result.fix_texts(), vec!["Fixing  x.py"]);
        assert!(result.failures.is_empty());
        assert!(!result.passed, "whitespace-only stderr is still non-empty");
    }

    #[test]
    fn one_line_can_be_fix_and_failure() {
        let result = classify("Fixing a.py Failed\n", "");
        assert_eq!(result.fix_texts(), vec!["Fixing a.py Failed"]);
        assert_eq!(result.failure_texts(), vec!["Fixing a.py Failed"]);
    }

    #[test]
    fn stdout_findings_precede_stderr_findings() {
        let result = classify("Failed one\n", "Failed two\n");
        assert_eq!(result.failure_texts(), vec!["Failed one", "Failed two"]);
    }

    #[test]
    fn crlf_output_is_handled() {
        let result = classify("Fixing a.py\r\nhook...Failed\r\n", "");
        assert_eq!(result.fix_texts(), vec!["Fixing a.py"]);
        assert_eq!(result.failure_texts(), vec!["hook...Failed"]);
    }

    #[test]
    fn same_input_classifies_identically() {
        let raw = RawOutput::new("Fixing a\nx Failed\n", "boom\n");
        let c = ContentClassifier::default();
        assert_eq!(c.classify(&raw), c.classify(&raw));
    }

    #[test]
    fn clean_output_passes() {
        let result = classify("check yaml....Passed\nblack....Passed\n", "");
        assert!(result.passed);
        assert!(result.fixes.is_empty());
        assert!(result.failures.is_empty());
    }
}
