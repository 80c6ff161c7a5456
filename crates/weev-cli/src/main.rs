#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod display;
mod repl;
mod shutdown;
mod telemetry;

use std::process;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use weev_reqwest::ReqwestClient;
use weev_runtime::Controller;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "weev_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "weev_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "weev_cli::config";
pub const TRACING_TARGET_SESSION: &str = "weev_cli::session";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "Client terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "Client terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();
    cli.validate()?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "Starting weev client"
    );

    let client = ReqwestClient::new(cli.http.clone()).context("failed to create HTTP client")?;
    let controller = Controller::new(client.into_service(), &cli.controller);

    let cancel = CancellationToken::new();
    let sweeper = controller.spawn_sweeper(cancel.clone());

    let view = controller.check_auth().await;
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        view = ?view,
        "Session established"
    );

    let result = repl::run(&controller, shutdown::shutdown_signal()).await;

    cancel.cancel();
    if let Err(error) = sweeper.await {
        tracing::warn!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "Notification sweeper did not stop cleanly"
        );
    }

    result
}
