use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::domain::{Catalog, Playlist, Song, SongHandle, SongId, User};
use crate::errors::CoreError;
use crate::ports::IdGenerator;

/// Punto de entrada de la aplicación sobre el dominio.
///
/// Reúne el catálogo, el generador de ids inyectado y la política de
/// validación, y deja traza de cada operación que muta estado.
pub struct StreamingService<G>
where
  G: IdGenerator,
{
  catalog: Catalog,
  ids: G,
  config: CatalogConfig,
}

impl<G> StreamingService<G>
where
  G: IdGenerator,
{
  pub fn new(ids: G, config: CatalogConfig) -> Self {
    Self { catalog: Catalog::new(), ids, config }
  }

  pub fn config(&self) -> &CatalogConfig {
    &self.config
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn catalog_mut(&mut self) -> &mut Catalog {
    &mut self.catalog
  }

  pub fn next_song_id(&mut self) -> SongId {
    SongId::generate(&mut self.ids)
  }

  // -------- COMMAND (write) --------

  /// Da de alta una canción en el catálogo.
  ///
  /// Con `enforce_valid_duration` activo, una duración fuera de `(0, 1200)`
  /// devuelve [`CoreError::InvalidArgument`] y el catálogo no cambia.
  pub fn register(&mut self, song: Song) -> Result<SongHandle, CoreError> {
    if self.config.enforce_valid_duration && !Song::is_valid_duration(song.duration()) {
      warn!(song = %song.id(), duration = song.duration(), "rejected song with invalid duration");
      return Err(CoreError::InvalidArgument(format!(
        "invalid duration {} for song {}",
        song.duration(),
        song.id()
      )));
    }

    let handle = self.catalog.insert(song);
    info!(%handle, total = self.catalog.len(), "song registered");
    Ok(handle)
  }

  pub fn play(&mut self, user: &mut User, song: SongHandle) -> Result<u64, CoreError> {
    user.play(&mut self.catalog, song)?;
    let streams = self.catalog.get(song)?.streams();
    info!(user = %user.id(), %song, streams, "playback recorded");
    Ok(streams)
  }

  pub fn apply_echo(&mut self, song: SongHandle, intensity: f64) -> Result<f64, CoreError> {
    self.catalog.get_mut(song)?.apply_echo(intensity).inspect_err(|e| warn!(%song, error = %e, "echo rejected"))
  }

  pub fn advance<'a>(&'a self, playlist: &mut Playlist) -> Result<&'a Song, CoreError> {
    let handle = playlist.next_song()?;
    debug!(playlist = %playlist.id(), index = playlist.current_index(), "playlist advanced");
    self.catalog.get(handle)
  }

  pub fn remove(&self, playlist: &mut Playlist, song_id: &SongId) -> Result<SongHandle, CoreError> {
    playlist.remove_song(&self.catalog, song_id)
  }

  // -------- QUERY (read) --------

  pub fn song(&self, handle: SongHandle) -> Result<&Song, CoreError> {
    self.catalog.get(handle)
  }

  pub fn recommend(&self, user: &User) -> Result<Option<&Song>, CoreError> {
    user.recommend(&self.catalog)?.map(|h| self.catalog.get(h)).transpose()
  }

  pub fn merge(&self, a: &Playlist, b: &Playlist) -> Result<Playlist, CoreError> {
    let merged = a.combine(b, &self.catalog)?;
    if merged.current_song().is_none() && !merged.is_empty() {
      warn!(playlist = %merged.id(), index = merged.current_index(), len = merged.len(), "merged cursor points past the end");
    }
    Ok(merged)
  }

  pub fn total_duration(&self, playlist: &Playlist) -> Result<f64, CoreError> {
    playlist.total_duration(&self.catalog)
  }
}
