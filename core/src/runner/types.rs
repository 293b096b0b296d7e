use std::path::PathBuf;

use serde::Serialize;

/// Everything the tool produced in one run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl RawOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: None,
        }
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }
}

/// What the terminal relay yields: the combined output copied to the
/// transcript file, and the exit status the terminal reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub exit_code: Option<i32>,
    pub text: String,
}

impl Transcript {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The transcript merges both streams, so it is classified as stdout.
    pub fn as_raw_output(&self) -> RawOutput {
        RawOutput {
            stdout: self.text.clone(),
            stderr: String::new(),
            exit_code: self.exit_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// `program args...` for logs; not meant to be fed back to a shell.
    pub fn display_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
