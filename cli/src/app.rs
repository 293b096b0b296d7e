use std::path::{Path, PathBuf};

use precommit_core::api::{
    build_classifier, load_default, load_from, AppConfig, AppContext, CliError, ClassifierConfig,
    DispatchOutcome, Dispatcher, LoggingConfig, RawOutput, RunResult, ServicesFactory,
};
use precommit_core::config::DEFAULT_CONFIG_FILE;
use precommit_plugins::services::PluginServicesFactory;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::commands::cli::{Args, ClassifyArgs, Commands};

pub fn resolve_workdir(arg: Option<&Path>) -> Result<PathBuf, CliError> {
    let cwd = std::env::current_dir()?;
    Ok(match arg {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}

/// `--config` wins; otherwise the workdir's `precommit-helper.toml`, then
/// the defaults.
pub fn load_config(explicit: Option<&Path>, workdir: &Path) -> Result<AppConfig, CliError> {
    if let Some(path) = explicit {
        return Ok(load_from(path)?);
    }
    let candidate = workdir.join(DEFAULT_CONFIG_FILE);
    if candidate.exists() {
        return Ok(load_from(&candidate)?);
    }
    Ok(load_default()?)
}

/// `RUST_LOG` wins over `[logging] level`. Diagnostics go to stderr unless a
/// log directory is configured.
pub fn init_tracing(cfg: &LoggingConfig) -> Result<Option<WorkerGuard>, CliError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let Some(dir) = cfg.directory.as_deref() else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = PathBuf::from(dir);
    std::fs::create_dir_all(&dir)?;
    let appender = tracing_appender::rolling::never(&dir, &cfg.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .init();
    Ok(Some(guard))
}

pub async fn run_app(args: Args, cfg: AppConfig, workdir: PathBuf) -> Result<i32, CliError> {
    if let Commands::Classify(classify_args) = &args.command {
        return classify_cmd(classify_args, &cfg.classifier).await;
    }

    let ctx = AppContext::new(cfg).await.map_err(CliError::Command)?;
    let services = PluginServicesFactory::new(args.details).build_services(ctx.cfg(), &workdir)?;
    let dispatcher = Dispatcher::new(&ctx, services, Some(workdir.clone()))?;

    tracing::debug!(
        target: "precommit.cli",
        command = ?args.command,
        workdir = %workdir.display(),
        "dispatching"
    );

    let outcome = match args.command {
        Commands::OnSave(save) => {
            let path = if save.path.is_absolute() {
                save.path
            } else {
                workdir.join(save.path)
            };
            Some(dispatcher.on_save(&path).await)
        }
        Commands::Run => Some(dispatcher.run_manual().await),
        Commands::InterceptCommit => Some(dispatcher.intercept_commit().await),
        Commands::ShowLog => {
            dispatcher.show_log();
            None
        }
        Commands::ClearLog => {
            dispatcher.clear_log();
            None
        }
        Commands::Classify(_) => None,
    };

    ctx.flush_events().await;
    Ok(outcome.as_ref().map(DispatchOutcome::exit_code).unwrap_or(0))
}

async fn classify_cmd(args: &ClassifyArgs, cfg: &ClassifierConfig) -> Result<i32, CliError> {
    let stdout = read_optional(args.stdout.as_deref()).await?;
    let stderr = read_optional(args.stderr.as_deref()).await?;

    let mut cfg = cfg.clone();
    if let Some(policy) = args.policy {
        cfg.policy = policy.into();
    }
    let classifier = build_classifier(&cfg);
    let result = classifier.classify(&RawOutput::new(stdout, stderr));

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::Command(format!("failed to encode result: {e}")))?;
        println!("{json}");
    } else {
        for line in render_summary(&result) {
            println!("{line}");
        }
    }
    Ok(if result.passed { 0 } else { 1 })
}

async fn read_optional(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(p) => Ok(tokio::fs::read_to_string(p).await?),
        None => Ok(String::new()),
    }
}

fn render_summary(result: &RunResult) -> Vec<String> {
    let mut lines = precommit_core::api::render_result(result);
    lines.push(String::new());
    lines.push(format!(
        "passed: {}",
        if result.passed { "yes" } else { "no" }
    ));
    lines
}
