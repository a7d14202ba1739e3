use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr so the driver's report on stdout stays readable.
pub fn init(cfg: &LoggingConfig) -> Result<()> {
  let filter = match EnvFilter::try_from_default_env() {
    Ok(filter) => filter,
    Err(_) => EnvFilter::try_new(&cfg.level).map_err(|e| anyhow!("invalid log level {:?}: {e}", cfg.level))?,
  };

  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
    .try_init()
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
