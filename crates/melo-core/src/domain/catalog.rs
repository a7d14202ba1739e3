use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::debug;

use crate::domain::ids::{SongHandle, SongId};
use crate::domain::song::Song;
use crate::errors::CoreError;

/// Almacén de todas las canciones en memoria.
///
/// Es el único dueño de los [`Song`]; playlists y usuarios guardan
/// [`SongHandle`]s. Las canciones nunca se eliminan, así que un handle
/// emitido por este catálogo sigue siendo válido mientras el catálogo viva.
///
/// Cada catálogo recibe una etiqueta única al crearse; los handles de otro
/// catálogo se rechazan con [`CoreError::UnknownSong`]. Por eso no es `Clone`.
#[derive(Debug, PartialEq, Serialize)]
pub struct Catalog {
  #[serde(skip)]
  tag: u64,
  songs: Vec<Song>,
}

static NEXT_TAG: AtomicU64 = AtomicU64::new(0);

impl Default for Catalog {
  fn default() -> Self {
    Self::new()
  }
}

impl Catalog {
  pub fn new() -> Self {
    Self { tag: NEXT_TAG.fetch_add(1, Ordering::Relaxed), songs: Vec::new() }
  }

  fn owns(&self, handle: SongHandle) -> Result<usize, CoreError> {
    if handle.catalog() == self.tag && handle.index() < self.songs.len() {
      Ok(handle.index())
    } else {
      Err(CoreError::UnknownSong(handle))
    }
  }

  /// Añade una canción y devuelve su handle.
  ///
  /// No se comprueba la unicidad del id: dos canciones distintas pueden
  /// compartir id, igual que pueden compartirlo dentro de una playlist.
  pub fn insert(&mut self, song: Song) -> SongHandle {
    let handle = SongHandle::new(self.tag, self.songs.len());
    debug!(%handle, song = %song.id(), "song added to catalog");
    self.songs.push(song);
    handle
  }

  pub fn get(&self, handle: SongHandle) -> Result<&Song, CoreError> {
    let index = self.owns(handle)?;
    Ok(&self.songs[index])
  }

  pub fn get_mut(&mut self, handle: SongHandle) -> Result<&mut Song, CoreError> {
    let index = self.owns(handle)?;
    Ok(&mut self.songs[index])
  }

  /// Reproduce la canción; el contador es compartido por todos sus poseedores.
  pub fn play(&mut self, handle: SongHandle) -> Result<u64, CoreError> {
    let song = self.get_mut(handle)?;
    song.play();
    Ok(song.streams())
  }

  /// Primer handle cuya canción tiene el id indicado.
  pub fn find(&self, id: &SongId) -> Option<SongHandle> {
    self.songs.iter().position(|s| s.id() == id).map(|i| SongHandle::new(self.tag, i))
  }

  pub fn len(&self) -> usize {
    self.songs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.songs.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (SongHandle, &Song)> {
    self.songs.iter().enumerate().map(|(i, s)| (SongHandle::new(self.tag, i), s))
  }
}
