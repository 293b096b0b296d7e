use std::fmt;

use crate::classify::RunResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Save,
    Manual,
    Intercept,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Save => "save",
            Trigger::Manual => "manual",
            Trigger::Intercept => "intercept",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a save did not start a run. Never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoRepositoryService,
    NoRepository,
    StatusUnavailable,
    NotStaged,
}

/// What one trigger ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Skipped(SkipReason),
    ScopeUnavailable,
    Reported(RunResult),
    Committed(RunResult),
    CommitRejected(RunResult),
    ExecutionFailed(String),
}

impl DispatchOutcome {
    /// Process exit code for hosts that surface one: 0 nothing wrong,
    /// 1 checks failed or the commit was held back, 2 nothing could run.
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchOutcome::Skipped(_) | DispatchOutcome::Committed(_) => 0,
            DispatchOutcome::Reported(result) if result.passed => 0,
            DispatchOutcome::Reported(_) | DispatchOutcome::CommitRejected(_) => 1,
            DispatchOutcome::ScopeUnavailable | DispatchOutcome::ExecutionFailed(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_severity() {
        let passed = RunResult {
            passed: true,
            ..RunResult::default()
        };
        assert_eq!(DispatchOutcome::Skipped(SkipReason::NotStaged).exit_code(), 0);
        assert_eq!(DispatchOutcome::Reported(passed.clone()).exit_code(), 0);
        assert_eq!(DispatchOutcome::Committed(passed).exit_code(), 0);
        assert_eq!(DispatchOutcome::Reported(RunResult::default()).exit_code(), 1);
        assert_eq!(DispatchOutcome::CommitRejected(RunResult::default()).exit_code(), 1);
        assert_eq!(DispatchOutcome::ScopeUnavailable.exit_code(), 2);
        assert_eq!(DispatchOutcome::ExecutionFailed("x".into()).exit_code(), 2);
    }
}
