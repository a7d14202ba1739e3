mod config;
mod driver;
mod logging;

use anyhow::Context;
use melo_core::services::StreamingService;
use tracing::{debug, info, warn};

use crate::config::AppConfig;

pub use driver::run_smoke;

/// Entry point of the `melo` binary.
///
/// Loads `melo.toml`, installs logging, then runs the smoke driver against a
/// fresh in-memory catalog. Nothing is written back to disk.
pub fn run() -> anyhow::Result<()> {
  // Config is read before logging exists, so a failure is reported once the
  // subscriber is up.
  let (config, config_error) = match AppConfig::load() {
    Ok(cfg) => (cfg, None),
    Err(e) => (AppConfig::default(), Some(e)),
  };

  logging::init(&config.logging)?;

  if let Some(e) = config_error {
    warn!(error = %e, "could not load melo.toml, using defaults");
  }
  info!(
    enforce_valid_duration = config.catalog.enforce_valid_duration,
    seeded = config.catalog.id_seed.is_some(),
    "starting melo smoke run"
  );

  let ids = config.catalog.id_generator();
  let mut service = StreamingService::new(ids, config.catalog);

  let stdout = std::io::stdout();
  run_smoke(&mut service, &mut stdout.lock()).context("smoke run failed")?;

  let snapshot = serde_json::to_string(service.catalog()).context("serialize catalog snapshot")?;
  debug!(songs = service.catalog().len(), %snapshot, "final catalog");

  Ok(())
}
