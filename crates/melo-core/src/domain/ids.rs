use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ports::IdGenerator;

/// Identificador de una canción.
///
/// Es texto libre: puede venir de fuera (`"S001"`) o generarse con un
/// [`IdGenerator`]. Al combinar canciones los ids se concatenan, por eso
/// no se usa un UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
  pub fn new(id: impl Into<String>) -> Self {
    SongId(id.into())
  }

  /// Genera un id aleatorio a partir del generador inyectado.
  pub fn generate<G: IdGenerator + ?Sized>(ids: &mut G) -> Self {
    SongId(ids.generate())
  }

  /// Concatena dos ids (`"S1"` + `"S2"` → `"S1S2"`).
  pub fn joined(&self, other: &SongId) -> Self {
    SongId(format!("{}{}", self.0, other.0))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for SongId {
  fn from(s: &str) -> Self {
    SongId(s.to_owned())
  }
}

impl From<String> for SongId {
  fn from(s: String) -> Self {
    SongId(s)
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Identificador de una lista de reproducción.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
  pub fn new(id: impl Into<String>) -> Self {
    PlaylistId(id.into())
  }

  pub fn joined(&self, other: &PlaylistId) -> Self {
    PlaylistId(format!("{}{}", self.0, other.0))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for PlaylistId {
  fn from(s: &str) -> Self {
    PlaylistId(s.to_owned())
  }
}

impl fmt::Display for PlaylistId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
  pub fn new(id: impl Into<String>) -> Self {
    UserId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for UserId {
  fn from(s: &str) -> Self {
    UserId(s.to_owned())
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Posición estable de una canción dentro de un [`Catalog`](super::catalog::Catalog).
///
/// Las listas y los usuarios guardan handles, no copias: dos handles iguales
/// apuntan a la misma canción, y cualquier mutación a través del catálogo
/// se ve desde todos ellos.
///
/// Cada handle lleva la etiqueta del catálogo que lo emitió; otro catálogo
/// lo rechaza aunque el índice exista en él.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SongHandle {
  catalog: u64,
  index: usize,
}

impl SongHandle {
  pub(crate) fn new(catalog: u64, index: usize) -> Self {
    SongHandle { catalog, index }
  }

  pub(crate) fn catalog(&self) -> u64 {
    self.catalog
  }

  pub fn index(&self) -> usize {
    self.index
  }
}

impl fmt::Display for SongHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}@{}", self.index, self.catalog)
  }
}
