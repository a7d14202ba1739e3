use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::catalog::Catalog;
use crate::domain::ids::{PlaylistId, SongHandle, SongId};
use crate::errors::CoreError;

/// Lista ordenada de canciones con un cursor de reproducción.
///
/// Guarda handles del [`Catalog`]: una misma canción puede aparecer varias
/// veces y en varias listas. `current_index` no se valida al construir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
  id: PlaylistId,
  songs: Vec<SongHandle>,
  current_index: usize,
}

impl Playlist {
  pub fn new(id: impl Into<PlaylistId>, songs: Vec<SongHandle>, current_index: usize) -> Self {
    Self { id: id.into(), songs, current_index }
  }

  pub fn with_songs(id: impl Into<PlaylistId>, songs: Vec<SongHandle>) -> Self {
    Self::new(id, songs, 0)
  }

  pub fn id(&self) -> &PlaylistId {
    &self.id
  }

  pub fn songs(&self) -> &[SongHandle] {
    &self.songs
  }

  pub fn current_index(&self) -> usize {
    self.current_index
  }

  pub fn len(&self) -> usize {
    self.songs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.songs.is_empty()
  }

  pub fn add_song(&mut self, song: SongHandle) {
    self.songs.push(song);
    debug!(playlist = %self.id, %song, len = self.songs.len(), "song appended");
  }

  /// Quita la primera canción con id `song_id` y devuelve su handle.
  ///
  /// El resto conserva su orden. El cursor no se ajusta.
  pub fn remove_song(&mut self, catalog: &Catalog, song_id: &SongId) -> Result<SongHandle, CoreError> {
    let mut position = None;
    for (i, &handle) in self.songs.iter().enumerate() {
      if catalog.get(handle)?.id() == song_id {
        position = Some(i);
        break;
      }
    }

    let Some(i) = position else {
      return Err(CoreError::NotFound(format!("song with id {song_id} not found in playlist {}", self.id)));
    };

    let removed = self.songs.remove(i);
    debug!(playlist = %self.id, song = %song_id, "song removed");
    Ok(removed)
  }

  /// Avanza el cursor y devuelve la canción a la que apunta.
  ///
  /// Falla con [`CoreError::OutOfRange`] si no queda ninguna canción detrás
  /// del cursor; en ese caso el cursor no se mueve.
  pub fn next_song(&mut self) -> Result<SongHandle, CoreError> {
    let next = self.current_index + 1;
    match self.songs.get(next) {
      Some(&handle) => {
        self.current_index = next;
        Ok(handle)
      }
      None => Err(CoreError::OutOfRange(format!("no next song in playlist {}", self.id))),
    }
  }

  /// Canción bajo el cursor; `None` si el índice quedó fuera de la lista.
  pub fn current_song(&self) -> Option<SongHandle> {
    self.songs.get(self.current_index).copied()
  }

  /// Suma de las duraciones, en segundos.
  pub fn total_duration(&self, catalog: &Catalog) -> Result<f64, CoreError> {
    self.songs.iter().try_fold(0.0, |acc, &h| -> Result<f64, CoreError> { Ok(acc + catalog.get(h)?.duration()) })
  }

  /// Une dos listas en una nueva.
  ///
  /// - id: concatenación de ambos ids.
  /// - canciones: las de `self` y luego las de `other`, sin ids repetidos
  ///   (gana la primera aparición, el orden se conserva).
  /// - cursor: el menor de los dos. No se recalcula tras quitar duplicados,
  ///   así que puede quedar fuera de la lista resultante.
  pub fn combine(&self, other: &Playlist, catalog: &Catalog) -> Result<Playlist, CoreError> {
    let mut seen: HashSet<&SongId> = HashSet::new();
    let mut songs = Vec::with_capacity(self.songs.len() + other.songs.len());

    for &handle in self.songs.iter().chain(&other.songs) {
      if seen.insert(catalog.get(handle)?.id()) {
        songs.push(handle);
      }
    }

    let merged = Playlist::new(self.id.joined(&other.id), songs, self.current_index.min(other.current_index));
    debug!(playlist = %merged.id, len = merged.songs.len(), index = merged.current_index, "playlists combined");
    Ok(merged)
  }

  /// Adaptador para imprimir la lista resolviendo sus canciones.
  pub fn display<'a>(&'a self, catalog: &'a Catalog) -> PlaylistDisplay<'a> {
    PlaylistDisplay { playlist: self, catalog }
  }
}

pub struct PlaylistDisplay<'a> {
  playlist: &'a Playlist,
  catalog: &'a Catalog,
}

impl fmt::Display for PlaylistDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "PlayList:")?;
    for &handle in &self.playlist.songs {
      match self.catalog.get(handle) {
        Ok(song) => write!(f, "\n{song}")?,
        Err(_) => write!(f, "\n<unknown song {handle}>")?,
      }
    }
    Ok(())
  }
}
