use melo_config::{ConfigBackend, ConfigError, MeloPaths, TomlConfigBackend};
use melo_core::config::CatalogConfig;
use serde::{Deserialize, Serialize};

/// `[logging]` section of melo.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
  /// `EnvFilter` directive used when `RUST_LOG` is not set.
  #[serde(default = "default_level")]
  pub level: String,
}

fn default_level() -> String {
  "info".to_string()
}

impl Default for LoggingConfig {
  fn default() -> Self {
    LoggingConfig { level: default_level() }
  }
}

impl LoggingConfig {
  pub const SECTION: &'static str = "logging";

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default(Self::SECTION)
  }
}

/// Everything the driver reads from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
  pub catalog: CatalogConfig,
  pub logging: LoggingConfig,
}

impl AppConfig {
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    Ok(AppConfig { catalog: CatalogConfig::load_from(backend)?, logging: LoggingConfig::load_from(backend)? })
  }

  /// Loads from the detected config dir (`MELO_BASE_DIR` or the platform default).
  pub fn load() -> Result<Self, ConfigError> {
    let backend = TomlConfigBackend::new(MeloPaths::detect()?);
    Self::load_from(&backend)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn reads_both_sections() {
    let tmp = tempdir().unwrap();
    let paths = MeloPaths::from_base(tmp.path());
    std::fs::create_dir_all(&paths.config_dir).unwrap();
    std::fs::write(
      paths.config_file(),
      "[catalog]\nenforce_valid_duration = true\nid_seed = 7\n\n[logging]\nlevel = \"melo_core=debug\"\n",
    )
    .unwrap();

    let cfg = AppConfig::load_from(&TomlConfigBackend::new(paths)).unwrap();

    assert!(cfg.catalog.enforce_valid_duration);
    assert_eq!(cfg.catalog.id_seed, Some(7));
    assert_eq!(cfg.logging.level, "melo_core=debug");
  }

  #[test]
  fn missing_config_dir_is_not_created() {
    let tmp = tempdir().unwrap();
    let paths = MeloPaths::from_base(tmp.path());
    let config_dir = paths.config_dir.clone();

    let cfg = AppConfig::load_from(&TomlConfigBackend::new(paths)).unwrap();

    assert_eq!(cfg, AppConfig::default());
    assert!(!config_dir.exists());
  }

  #[test]
  fn empty_file_falls_back_to_defaults() {
    let tmp = tempdir().unwrap();
    let paths = MeloPaths::from_base(tmp.path());
    std::fs::create_dir_all(&paths.config_dir).unwrap();
    std::fs::write(paths.config_file(), "[logging]\n").unwrap();

    let cfg = AppConfig::load_from(&TomlConfigBackend::new(paths)).unwrap();

    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.logging.level, "info");
  }
}
