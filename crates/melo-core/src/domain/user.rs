use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::catalog::Catalog;
use crate::domain::ids::{SongHandle, UserId};
use crate::errors::CoreError;

/// Oyente con canciones favoritas e historial de reproducción.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  id: UserId,
  /// Favoritas en orden de "me gusta"; `like` no añade repetidos.
  liked: Vec<SongHandle>,
  /// Historial de reproducciones; admite repetidos.
  history: Vec<SongHandle>,
}

impl User {
  pub fn new(id: impl Into<UserId>) -> Self {
    Self::with_history(id, Vec::new(), Vec::new())
  }

  /// Construye un usuario con favoritas e historial previos, tal cual llegan.
  ///
  /// Solo [`User::like`] descarta repetidos; la lista inicial no se filtra.
  pub fn with_history(id: impl Into<UserId>, liked: Vec<SongHandle>, history: Vec<SongHandle>) -> Self {
    Self { id: id.into(), liked, history }
  }

  pub fn id(&self) -> &UserId {
    &self.id
  }

  pub fn liked(&self) -> &[SongHandle] {
    &self.liked
  }

  pub fn history(&self) -> &[SongHandle] {
    &self.history
  }

  /// Marca la canción como favorita; no hace nada si ya lo era.
  ///
  /// La comparación es por identidad (handle), no por contenido.
  pub fn like(&mut self, song: SongHandle) {
    if !self.liked.contains(&song) {
      self.liked.push(song);
      debug!(user = %self.id, %song, "song liked");
    }
  }

  /// Reproduce la canción: la añade al historial y suma una reproducción
  /// en el catálogo, visible para cualquier otro poseedor del handle.
  pub fn play(&mut self, catalog: &mut Catalog, song: SongHandle) -> Result<(), CoreError> {
    let streams = catalog.play(song)?;
    self.history.push(song);
    debug!(user = %self.id, %song, streams, "user played song");
    Ok(())
  }

  /// Favorita con menos reproducciones; en empate gana la que se marcó antes.
  ///
  /// `None` si no hay favoritas.
  pub fn recommend(&self, catalog: &Catalog) -> Result<Option<SongHandle>, CoreError> {
    let mut best: Option<(SongHandle, u64)> = None;

    for &handle in &self.liked {
      let streams = catalog.get(handle)?.streams();
      match best {
        Some((_, min)) if streams >= min => {}
        _ => best = Some((handle, streams)),
      }
    }

    Ok(best.map(|(handle, _)| handle))
  }
}
