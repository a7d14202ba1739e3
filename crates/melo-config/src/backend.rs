use crate::paths::{ConfigError, MeloPaths};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

/// Lectura de secciones de configuración. Nunca escribe en disco.
pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;

  /// Igual que [`ConfigBackend::load_section`], pero un fichero o sección ausente
  /// devuelve `T::default()` en lugar de error.
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;
}

pub struct TomlConfigBackend {
  paths: MeloPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: MeloPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &MeloPaths {
    &self.paths
  }

  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };

    Ok(Some(toml::from_str(&content)?))
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, value: &toml::Value) -> Result<T, ConfigError> {
  value.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let table = self.read_table()?.ok_or_else(|| ConfigError::Other(format!("missing config file {:?}", path)))?;

    let value = table
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", path)))?;

    decode_section(section, value)
  }

  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(table) = self.read_table()? else {
      return Ok(T::default());
    };

    let Some(value) = table.get(section) else {
      return Ok(T::default());
    };

    decode_section(section, value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Deserialize)]
  struct Sample {
    name: String,
    level: u32,
  }

  fn backend_in(dir: &std::path::Path) -> TomlConfigBackend {
    TomlConfigBackend::new(MeloPaths::from_base(dir))
  }

  fn write_config(backend: &TomlConfigBackend, content: &str) {
    fs::create_dir_all(&backend.paths().config_dir).unwrap();
    fs::write(backend.paths().config_file(), content).unwrap();
  }

  #[test]
  fn missing_file_yields_default() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());

    let loaded: Sample = backend.load_section_with_default("sample").unwrap();
    assert_eq!(loaded, Sample::default());

    let strict: Result<Sample, _> = backend.load_section("sample");
    assert!(matches!(strict, Err(ConfigError::Other(_))));
  }

  #[test]
  fn loads_one_section_among_others() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());
    write_config(&backend, "# comentario\n[other]\nkeep = true\n\n[sample]\nname = \"melo\"\nlevel = 3\n");

    let loaded: Sample = backend.load_section("sample").unwrap();
    assert_eq!(loaded, Sample { name: "melo".into(), level: 3 });

    let missing: Sample = backend.load_section_with_default("absent").unwrap();
    assert_eq!(missing, Sample::default());
    assert!(matches!(backend.load_section::<Sample>("absent"), Err(ConfigError::Other(_))));
  }

  #[test]
  fn loading_never_creates_directories() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());

    let _: Sample = backend.load_section_with_default("sample").unwrap();

    assert!(!backend.paths().config_dir.exists());
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
  }

  #[test]
  fn malformed_section_reports_decode_error() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());
    write_config(&backend, "[sample]\nname = 5\nlevel = \"high\"\n");

    let result: Result<Sample, _> = backend.load_section_with_default("sample");
    assert!(matches!(result, Err(ConfigError::Other(msg)) if msg.contains("[sample]")));
  }
}
