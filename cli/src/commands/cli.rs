use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use precommit_core::api::ClassifierPolicy;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    Content,
    Stream,
}

impl From<PolicyArg> for ClassifierPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Content => ClassifierPolicy::Content,
            PolicyArg::Stream => ClassifierPolicy::Stream,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Runs pre-commit on save, on demand, or before a commit")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./precommit-helper.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the tool runs in and repository lookup starts from.
    #[arg(long, global = true)]
    pub workdir: Option<PathBuf>,

    /// Open the output log after every run instead of asking.
    #[arg(long, default_value_t = false, global = true)]
    pub details: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// A file was saved: check it if it is staged.
    OnSave(OnSaveArgs),
    /// Check every file in the repository.
    Run,
    /// Check staged files in the terminal, then commit if they pass.
    InterceptCommit,
    /// Print the output log.
    ShowLog,
    /// Empty the output log.
    ClearLog,
    /// Classify previously captured tool output.
    Classify(ClassifyArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct OnSaveArgs {
    pub path: PathBuf,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub stdout: Option<PathBuf>,

    #[arg(long)]
    pub stderr: Option<PathBuf>,

    /// Overrides `[classifier] policy`.
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_on_save_with_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "precommit-helper",
            "on-save",
            "src/a.py",
            "--workdir",
            "/repo",
            "--details",
        ])
        .unwrap();
        assert!(args.details);
        assert_eq!(args.workdir, Some(PathBuf::from("/repo")));
        match args.command {
            Commands::OnSave(a) => assert_eq!(a.path, PathBuf::from("src/a.py")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn classify_accepts_policy() {
        let args = Args::try_parse_from([
            "precommit-helper",
            "classify",
            "--stdout",
            "out.txt",
            "--policy",
            "stream",
            "--json",
        ])
        .unwrap();
        let Commands::Classify(c) = args.command else {
            panic!("expected classify");
        };
        assert_eq!(c.policy, Some(PolicyArg::Stream));
        assert!(c.json);
        assert!(c.stderr.is_none());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["precommit-helper"]).is_err());
    }
}
