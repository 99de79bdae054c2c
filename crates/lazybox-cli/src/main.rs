//! `LazyBox` CLI
//!
//! Encrypts text into envelope strings and decrypts them again, with keys
//! resolved from flags, environment and settings files.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};

use lazybox_cli::{Cli, cmd};
use lazybox_core::config::load_config;
use lazybox_core::keys::resolve_key_pair;
use lazybox_core::tracing_init::{default_filter, init_tracing};
use lazybox_crypto::CryptoError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let project_dir = match &cli.project_dir {
        Some(dir) => Some(dir.clone()),
        None => std::env::current_dir().ok(),
    };
    let config = load_config(project_dir.as_deref(), cli.config_layer())?;

    init_tracing(&default_filter(&config.logging.level), config.logging.json);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting lazybox");
    debug!(sources = ?config.sources, keys = ?config.keys, "Configuration resolved");

    let key_pair = resolve_key_pair(&config.keys)?;
    let fingerprint = key_pair.fingerprint().map_err(|e| {
        error!(kind = ?e.kind(), "Key pair rejected: {e}");
        e
    })?;
    info!(%fingerprint, "Key pair loaded");

    let result = cmd::run(
        &cli.command,
        &key_pair,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    );
    if let Err(e) = &result {
        match e.downcast_ref::<CryptoError>() {
            Some(crypto) => error!(kind = ?crypto.kind(), "Command failed: {crypto}"),
            None => error!("Command failed: {e:#}"),
        }
    }
    result
}
