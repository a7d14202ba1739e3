use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ids::SongId;
use crate::domain::song_kind::SongKind;
use crate::errors::CoreError;

/// Duración máxima (exclusiva) aceptada por [`Song::is_valid_duration`], en segundos.
pub const MAX_DURATION_SECS: f64 = 1200.0;

/// Una pista del catálogo.
///
/// `id`, `title` y `artist` no cambian tras la construcción. `streams` solo
/// crece a través de [`Song::play`]. La duración únicamente se modifica en
/// versiones en vivo ([`Song::apply_echo`]).
///
/// El constructor no valida la duración: quien quiera rechazar valores
/// fuera de rango debe consultar antes [`Song::is_valid_duration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  id: SongId,
  title: String,
  artist: String,
  /// Duración en segundos.
  duration: f64,
  streams: u64,
  #[serde(flatten)]
  kind: SongKind,
}

impl Song {
  pub fn new(
    id: impl Into<SongId>,
    title: impl Into<String>,
    artist: impl Into<String>,
    duration: f64,
    streams: u64,
  ) -> Self {
    Self { id: id.into(), title: title.into(), artist: artist.into(), duration, streams, kind: SongKind::Base }
  }

  pub fn single(
    id: impl Into<SongId>,
    title: impl Into<String>,
    artist: impl Into<String>,
    duration: f64,
    streams: u64,
    genre: impl Into<String>,
  ) -> Self {
    Self::new(id, title, artist, duration, streams).with_kind(SongKind::Single { genre: genre.into() })
  }

  pub fn live(
    id: impl Into<SongId>,
    title: impl Into<String>,
    artist: impl Into<String>,
    duration: f64,
    streams: u64,
    concert_date: impl Into<String>,
    crowd_noise_level: i64,
  ) -> Self {
    Self::new(id, title, artist, duration, streams)
      .with_kind(SongKind::Live { concert_date: concert_date.into(), crowd_noise_level })
  }

  fn with_kind(mut self, kind: SongKind) -> Self {
    self.kind = kind;
    self
  }

  /// `true` si `0 < duration < 1200`.
  pub fn is_valid_duration(duration: f64) -> bool {
    duration > 0.0 && duration < MAX_DURATION_SECS
  }

  pub fn id(&self) -> &SongId {
    &self.id
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn artist(&self) -> &str {
    &self.artist
  }

  pub fn duration(&self) -> f64 {
    self.duration
  }

  pub fn kind(&self) -> &SongKind {
    &self.kind
  }

  /// Registra una reproducción. El contador se satura en `u64::MAX`.
  pub fn play(&mut self) {
    self.streams = self.streams.saturating_add(1);
    debug!(song = %self.id, streams = self.streams, "song played");
  }

  pub fn streams(&self) -> u64 {
    self.streams
  }

  /// Duración truncada a segundos enteros.
  pub fn length(&self) -> i64 {
    self.duration as i64
  }

  /// Mezcla dos canciones en una nueva canción base.
  ///
  /// - id: concatenación de ambos ids.
  /// - título: `"{a} X {b}"`; artista: `"{a} feat. {b}"`.
  /// - duración: la mayor de las dos.
  /// - reproducciones: la suma, saturada en `u64::MAX`.
  ///
  /// El resultado siempre es [`SongKind::Base`], sin importar la variante de
  /// los operandos. El orden de los operandos se refleja en los textos.
  pub fn combine(&self, other: &Song) -> Song {
    Song {
      id: self.id.joined(&other.id),
      title: format!("{} X {}", self.title, other.title),
      artist: format!("{} feat. {}", self.artist, other.artist),
      duration: self.duration.max(other.duration),
      streams: self.streams.saturating_add(other.streams),
      kind: SongKind::Base,
    }
  }

  /// Género del sencillo; `None` para cualquier otra variante.
  pub fn genre(&self) -> Option<&str> {
    match &self.kind {
      SongKind::Single { genre } => Some(genre),
      _ => None,
    }
  }

  /// Cambia el género de un sencillo y devuelve el valor nuevo.
  pub fn set_genre(&mut self, new_genre: impl Into<String>) -> Result<&str, CoreError> {
    match &mut self.kind {
      SongKind::Single { genre } => {
        *genre = new_genre.into();
        debug!(song = %self.id, genre = %genre, "genre updated");
        Ok(genre.as_str())
      }
      other => Err(CoreError::InvalidArgument(format!("song {} is not a single ({other})", self.id))),
    }
  }

  /// Alarga una versión en vivo por efecto de eco.
  ///
  /// `duration += duration * (crowd_noise_level / 10) * intensity`; devuelve
  /// la duración nueva. Con `intensity == 0` no cambia nada. Una intensidad
  /// negativa (o NaN) se rechaza sin tocar la duración.
  pub fn apply_echo(&mut self, intensity: f64) -> Result<f64, CoreError> {
    if intensity.is_nan() || intensity < 0.0 {
      return Err(CoreError::InvalidArgument(format!("echo intensity must be non-negative, got {intensity}")));
    }

    let SongKind::Live { crowd_noise_level, .. } = &self.kind else {
      return Err(CoreError::InvalidArgument(format!("song {} is not a live version", self.id)));
    };

    let extension = self.duration * (*crowd_noise_level as f64 / 10.0) * intensity;
    self.duration += extension;
    debug!(song = %self.id, intensity, duration = self.duration, "echo applied");

    Ok(self.duration)
  }
}

impl Add for &Song {
  type Output = Song;

  fn add(self, other: Self) -> Song {
    self.combine(other)
  }
}

impl fmt::Display for Song {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      SongKind::Single { genre } => {
        write!(f, "[SINGLE] {} by {} ({:.1}s), genre: {genre}", self.title, self.artist, self.duration)
      }
      _ => write!(f, "{} by {} ({:.1}s)", self.title, self.artist, self.duration),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn live(noise: i64) -> Song {
    Song::live("S004", "Bohemian Rhapsody", "Queen", 354.0, 5_000_000, "1985-07-13", noise)
  }

  #[test]
  fn combine_merges_fields_in_operand_order() {
    let a = Song::new("S1", "A", "X", 100.0, 10);
    let b = Song::new("S2", "B", "Y", 200.0, 20);

    let mixed = &a + &b;

    assert_eq!(mixed.id().as_str(), "S1S2");
    assert_eq!(mixed.title(), "A X B");
    assert_eq!(mixed.artist(), "X feat. Y");
    assert_eq!(mixed.duration(), 200.0);
    assert_eq!(mixed.streams(), 30);

    let reversed = b.combine(&a);
    assert_eq!(reversed.title(), "B X A");
    assert_eq!(reversed.duration(), 200.0);
  }

  #[test]
  fn combine_always_yields_base_song() {
    let single = Song::single("S3", "Stay", "The Kid LAROI", 138.0, 7, "Pop");
    let mixed = single.combine(&live(8));

    assert_eq!(mixed.kind(), &SongKind::Base);
    assert_eq!(mixed.streams(), 5_000_007);
    assert_eq!(mixed.duration(), 354.0);
    assert_eq!(mixed.genre(), None);
  }

  #[test]
  fn play_increments_streams_once_per_call() {
    let mut song = Song::new("S1", "A", "X", 100.0, 0);
    for _ in 0..25 {
      song.play();
    }
    assert_eq!(song.streams(), 25);
  }

  #[test]
  fn stream_counts_saturate_instead_of_overflowing() {
    let a = Song::new("S1", "A", "X", 100.0, u64::MAX);
    let b = Song::new("S2", "B", "Y", 100.0, 1);
    assert_eq!(a.combine(&b).streams(), u64::MAX);
    assert_eq!((&b + &a).streams(), u64::MAX);

    let mut maxed = a.clone();
    maxed.play();
    assert_eq!(maxed.streams(), u64::MAX);
  }

  #[test]
  fn display_rounds_duration_to_one_decimal() {
    let mut song = Song::live("S4", "Live", "Band", 354.0, 0, "1985-07-13", 8);
    song.apply_echo(1.2).unwrap();
    assert_eq!(song.to_string(), "Live by Band (693.8s)");
  }

  #[test]
  fn duration_predicate_bounds_are_exclusive() {
    assert!(Song::is_valid_duration(0.5));
    assert!(Song::is_valid_duration(1199.9));
    assert!(!Song::is_valid_duration(0.0));
    assert!(!Song::is_valid_duration(-100.0));
    assert!(!Song::is_valid_duration(1200.0));
  }

  #[test]
  fn constructor_accepts_invalid_duration() {
    let song = Song::new("S5", "Bad", "Artist", -100.0, 0);
    assert_eq!(song.duration(), -100.0);
    assert_eq!(song.length(), -100);
  }

  #[test]
  fn length_truncates() {
    assert_eq!(Song::new("S1", "A", "X", 215.9, 0).length(), 215);
  }

  #[test]
  fn genre_only_changes_on_singles() {
    let mut single = Song::single("S3", "Stay", "The Kid LAROI", 138.0, 0, "Pop");
    assert_eq!(single.set_genre("Pop-Rock").unwrap(), "Pop-Rock");
    assert_eq!(single.genre(), Some("Pop-Rock"));

    let mut base = Song::new("S1", "A", "X", 100.0, 0);
    assert!(matches!(base.set_genre("Jazz"), Err(CoreError::InvalidArgument(_))));
    assert_eq!(base.genre(), None);
  }

  #[test]
  fn echo_extends_live_duration() {
    let mut song = live(8);
    let extended = song.apply_echo(1.2).unwrap();

    let expected = 354.0 + 354.0 * 0.8 * 1.2;
    assert!((extended - expected).abs() < 1e-9);
    assert_eq!(song.duration(), extended);
  }

  #[test]
  fn echo_with_zero_intensity_is_noop() {
    let mut song = live(8);
    assert_eq!(song.apply_echo(0.0).unwrap(), 354.0);
    assert_eq!(song.apply_echo(0.0).unwrap(), 354.0);
  }

  #[test]
  fn negative_echo_fails_and_keeps_duration() {
    let mut song = live(8);
    assert!(matches!(song.apply_echo(-1.0), Err(CoreError::InvalidArgument(_))));
    assert!(matches!(song.apply_echo(f64::NAN), Err(CoreError::InvalidArgument(_))));
    assert_eq!(song.duration(), 354.0);
  }

  #[test]
  fn echo_rejected_on_non_live_song() {
    let mut song = Song::new("S1", "A", "X", 100.0, 0);
    assert!(matches!(song.apply_echo(1.0), Err(CoreError::InvalidArgument(_))));
    assert_eq!(song.duration(), 100.0);
  }

  #[test]
  fn display_marks_singles() {
    let base = Song::new("S1", "Blinding Lights", "The Weeknd", 200.0, 0);
    let single = Song::single("S3", "Stay", "The Kid LAROI", 138.0, 0, "Pop");

    assert_eq!(base.to_string(), "Blinding Lights by The Weeknd (200.0s)");
    assert_eq!(single.to_string(), "[SINGLE] Stay by The Kid LAROI (138.0s), genre: Pop");
    assert_eq!(live(8).to_string(), "Bohemian Rhapsody by Queen (354.0s)");
  }
}
