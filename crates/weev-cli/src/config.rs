//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── http: ReqwestConfig           # API base URL, timeout, user agent
//! └── controller: ControllerConfig  # Toast lifetime and sweep period
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! weev --api-url https://api.weev.app/ --http-timeout 10
//!
//! # Or via environment variables
//! WEEV_API_URL=https://api.weev.app/ WEEV_TOAST_TTL=8 weev
//! ```

use std::process;

use anyhow::{Context, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use weev_reqwest::ReqwestConfig;
use weev_runtime::ControllerConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "weev")]
#[command(about = "Terminal client for the Weev loyalty platform")]
#[command(version)]
pub struct Cli {
    /// HTTP transport configuration.
    #[clap(flatten)]
    pub http: ReqwestConfig,

    /// Session controller configuration.
    #[clap(flatten)]
    pub controller: ControllerConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_http().context("invalid HTTP configuration")?;
        self.validate_controller()
            .context("invalid controller configuration")?;
        Ok(())
    }

    fn validate_http(&self) -> anyhow::Result<()> {
        let scheme = self.http.api_url.scheme();
        if scheme != "http" && scheme != "https" {
            bail!("API URL must use http or https, got '{scheme}'");
        }
        if self.http.http_timeout == Some(0) {
            bail!("HTTP timeout must be greater than zero");
        }
        Ok(())
    }

    fn validate_controller(&self) -> anyhow::Result<()> {
        if self.controller.toast_ttl == 0 {
            bail!("toast lifetime must be greater than zero");
        }
        if self.controller.toast_sweep_interval == 0 {
            bail!("toast sweep interval must be greater than zero");
        }
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            api_url = %self.http.api_url,
            http_timeout_secs = ?self.http.http_timeout,
            user_agent = %self.http.effective_user_agent(),
            "HTTP configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            toast_ttl_secs = self.controller.toast_ttl,
            toast_sweep_interval_secs = self.controller.toast_sweep_interval,
            "Controller configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("weev").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--api-url",
            "https://api.weev.app/v1",
            "--http-timeout",
            "10",
            "--toast-ttl",
            "8",
        ]);

        assert_eq!(cli.http.base_url().as_str(), "https://api.weev.app/v1/");
        assert_eq!(cli.http.http_timeout, Some(10));
        assert_eq!(cli.controller.toast_ttl, 8);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_urls() {
        let cli = parse(&["--api-url", "ftp://files.weev.app/"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn rejects_zero_durations() {
        assert!(parse(&["--toast-ttl", "0"]).validate().is_err());
        assert!(parse(&["--toast-sweep-interval", "0"]).validate().is_err());
        assert!(parse(&["--http-timeout", "0"]).validate().is_err());
    }
}
