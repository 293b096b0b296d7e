use clap::Parser;
mod app;
mod commands;
use commands::cli;
use precommit_core::api::CliError;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = cli::Args::parse();
    let workdir = app::resolve_workdir(args.workdir.as_deref())?;
    let cfg = app::load_config(args.config.as_deref(), &workdir)?;
    let log_guard = app::init_tracing(&cfg.logging)?;

    let exit = app::run_app(args, cfg, workdir).await;

    // process::exit skips destructors; flush buffered diagnostics first
    drop(log_guard);
    std::process::exit(exit?);
}
