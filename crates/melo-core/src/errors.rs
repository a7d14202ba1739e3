// crates/melo-core/src/errors.rs
use thiserror::Error;

use crate::domain::SongHandle;

/// Error genérico del núcleo de Melo.
///
/// Las operaciones fallidas no dejan estado a medias: o se aplican
/// completas o no tocan nada.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("out of range: {0}")]
  OutOfRange(String),

  /// El handle no pertenece al catálogo consultado.
  #[error("unknown song handle {0}")]
  UnknownSong(SongHandle),
}
