//! Command implementations for the ipscale CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod completions;
pub mod degrees;
pub mod lookup;
pub mod scale;
pub mod sequence;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

use crate::constants::SPINNER_TICK_MS;
use crate::lookup::LookupClient;

/// Where the address being mapped came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressSource {
    /// Given on the command line
    Argument,
    /// Fetched from the public IP endpoint
    Lookup,
}

impl std::fmt::Display for AddressSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressSource::Argument => write!(f, "argument"),
            AddressSource::Lookup => write!(f, "public IP lookup"),
        }
    }
}

/// Resolved lookup settings (CLI flag > config > default).
#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub endpoint: String,
    pub timeout: Duration,
    /// Show a spinner on stderr while waiting
    pub show_progress: bool,
}

/// Fetch the public IP address.
pub async fn fetch_public_ip(settings: &LookupSettings) -> Result<String> {
    let client = LookupClient::new(settings.endpoint.as_str(), settings.timeout)?;

    let spinner = settings.show_progress.then(create_spinner);
    if let Some(spinner) = &spinner {
        spinner.set_message(format!("Looking up public IP via {}...", client.endpoint()));
    }

    let result = client.public_ip().await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    result
        .inspect_err(|e| tracing::warn!("Public IP lookup failed: {}", e))
        .context("Could not determine the public IP address (pass an address explicitly to skip the lookup)")
}

/// Use `address` when given, otherwise look up the public IP.
pub async fn resolve_address(
    address: Option<String>,
    settings: &LookupSettings,
) -> Result<(String, AddressSource)> {
    match address {
        Some(address) => Ok((address, AddressSource::Argument)),
        None => Ok((fetch_public_ip(settings).await?, AddressSource::Lookup)),
    }
}

fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    spinner
}
