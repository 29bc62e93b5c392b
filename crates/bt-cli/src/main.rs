use crate::cmd::{run_command_with_args, Cli};
use clap::Parser;
use std::process::exit;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cmd;
mod config;
mod convert;
mod utils;

/// Env var holding log directives, e.g. `BBTRANS_LOG=bt_parser=debug`.
const LOG_ENV: &str = "BBTRANS_LOG";

/// Level used when no directive matches. Only warnings reach the terminal by default.
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::WARN;

fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(DEFAULT_LOG_LEVEL.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Log to stderr so converted output on stdout stays clean.
fn init_logging() {
    let directives = std::env::var(LOG_ENV).ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("bbtrans: logging disabled: {e}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    tracing::debug!("running {:?}", cli.command);
    if let Err(e) = run_command_with_args(cli).await {
        eprintln!("bbtrans: {e:?}");
        exit(1)
    }
}
