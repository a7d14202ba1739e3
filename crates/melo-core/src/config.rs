use melo_config::{ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};

use crate::ports::{IdGenerator, RandomIdGenerator, SeededIdGenerator};

/// Sección `[catalog]` de melo.toml.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CatalogConfig {
  /// Rechaza al registrar canciones cuya duración no pase
  /// [`Song::is_valid_duration`](crate::domain::Song::is_valid_duration).
  #[serde(default)]
  pub enforce_valid_duration: bool,

  /// Semilla opcional para generar ids reproducibles.
  pub id_seed: Option<u64>,
}

impl CatalogConfig {
  pub const SECTION: &'static str = "catalog";

  /// Carga `[catalog]`; si falta el fichero o la sección se usan los valores por defecto.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default(Self::SECTION)
  }

  /// Generador de ids acorde a la configuración: sembrado si hay `id_seed`.
  pub fn id_generator(&self) -> Box<dyn IdGenerator> {
    match self.id_seed {
      Some(seed) => Box::new(SeededIdGenerator::new(seed)),
      None => Box::new(RandomIdGenerator),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use melo_config::{MeloPaths, TomlConfigBackend};
  use tempfile::tempdir;

  #[test]
  fn defaults_when_section_missing() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(MeloPaths::from_base(tmp.path()));

    let cfg = CatalogConfig::load_from(&backend).unwrap();

    assert_eq!(cfg, CatalogConfig::default());
    assert!(!cfg.enforce_valid_duration);
  }

  #[test]
  fn reads_catalog_section() {
    let tmp = tempdir().unwrap();
    let paths = MeloPaths::from_base(tmp.path());
    std::fs::create_dir_all(&paths.config_dir).unwrap();
    std::fs::write(paths.config_file(), "[catalog]\nenforce_valid_duration = true\nid_seed = 42\n").unwrap();

    let cfg = CatalogConfig::load_from(&TomlConfigBackend::new(paths)).unwrap();

    assert_eq!(cfg, CatalogConfig { enforce_valid_duration: true, id_seed: Some(42) });
  }

  #[test]
  fn missing_flag_defaults_to_advisory() {
    let tmp = tempdir().unwrap();
    let paths = MeloPaths::from_base(tmp.path());
    std::fs::create_dir_all(&paths.config_dir).unwrap();
    std::fs::write(paths.config_file(), "[catalog]\nid_seed = 1\n").unwrap();

    let cfg = CatalogConfig::load_from(&TomlConfigBackend::new(paths)).unwrap();

    assert!(!cfg.enforce_valid_duration);
    assert_eq!(cfg.id_seed, Some(1));
  }

  #[test]
  fn seeded_config_gives_reproducible_ids() {
    let cfg = CatalogConfig { enforce_valid_duration: false, id_seed: Some(9) };

    let mut a = cfg.id_generator();
    let mut b = cfg.id_generator();

    assert_eq!(a.generate(), b.generate());
  }
}
