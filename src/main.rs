#![allow(non_snake_case)]

use std::env;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use dayPlanner::cli;
use dayPlanner::config::{AppConfig, ServiceConfig};
use dayPlanner::runtime;

const DEFAULT_RUN_MODE: &str = "api";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to CLI output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::default(),
    };

    let get_prop = |key: &str| -> Option<String> {
        config.get(key).or_else(|| env::var(key).ok())
    };

    let service_config =
        ServiceConfig::from_props(get_prop).context("Refusing to start without configuration")?;

    let run_mode = get_prop("RUN_MODE").unwrap_or(DEFAULT_RUN_MODE.to_string());
    match run_mode.as_str() {
        "api" => runtime::run_api(service_config).await,
        "cli" => cli::cli(service_config).await,
        other => anyhow::bail!("Invalid run mode {}", other),
    }
}
