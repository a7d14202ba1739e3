use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Variable de entorno que fuerza un directorio base (modo portable / tests).
pub const BASE_DIR_ENV: &str = "MELO_BASE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

/// Ubicación de la configuración. Construirla no toca el disco: un
/// directorio que no existe se lee como fichero ausente.
#[derive(Debug, Clone)]
pub struct MeloPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
}

impl MeloPaths {
  pub fn new() -> Result<Self, ConfigError> {
    match std::env::var(BASE_DIR_ENV) {
      Ok(env_base) => Ok(Self::from_base(env_base)),
      Err(_) => {
        let proj_dirs = ProjectDirs::from("com", "melo", "melo").ok_or(ConfigError::Directories)?;
        Ok(Self { base_dir: proj_dirs.config_dir().to_path_buf(), config_dir: proj_dirs.config_dir().to_path_buf() })
      }
    }
  }

  /// Estructura `config/` bajo un directorio arbitrario.
  pub fn from_base(base: impl AsRef<Path>) -> Self {
    let base = base.as_ref();
    Self { base_dir: base.to_path_buf(), config_dir: base.join("config") }
  }

  pub fn detect() -> Result<Self, ConfigError> {
    Self::new()
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("melo.toml")
  }
}
