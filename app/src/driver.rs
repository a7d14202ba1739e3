use std::io::Write;

use anyhow::{Context, Result};
use melo_core::CoreError;
use melo_core::domain::{Playlist, Song, SongId, User};
use melo_core::ports::IdGenerator;
use melo_core::services::StreamingService;

/// Walks every domain operation once and reports the results to `out`.
///
/// Expected failures (missing song, negative echo, exhausted playlist) are
/// printed; anything else aborts the run.
pub fn run_smoke<G, W>(svc: &mut StreamingService<G>, out: &mut W) -> Result<()>
where
  G: IdGenerator,
  W: Write,
{
  writeln!(out, "=== MUSIC STREAMING SERVICE TESTS ===")?;

  // --- Song ---
  writeln!(out, "\n=== Testing Song ===")?;
  let song1 = svc.register(Song::new("S001", "Blinding Lights", "The Weeknd", 200.0, 1_000_000))?;
  let song2 = svc.register(Song::new("S002", "Save Your Tears", "The Weeknd", 215.0, 500_000))?;
  writeln!(out, "{}", svc.song(song1)?)?;
  writeln!(out, "Length: {} seconds", svc.song(song1)?.length())?;

  svc.catalog_mut().play(song1)?;
  svc.catalog_mut().play(song1)?;
  writeln!(out, "Streams after 2 plays: {}", svc.song(song1)?.streams())?;

  let mashup = svc.song(song1)? + svc.song(song2)?;
  writeln!(out, "Mashup: {mashup}")?;

  let generated = svc.next_song_id();
  writeln!(out, "Generated id: {generated}")?;

  // --- Single ---
  writeln!(out, "\n=== Testing Single ===")?;
  let single1 = svc.register(Song::single("S003", "Stay", "The Kid LAROI", 138.0, 2_000_000, "Pop"))?;
  writeln!(out, "{}", svc.song(single1)?)?;
  let genre = svc.catalog_mut().get_mut(single1)?.set_genre("Pop-Rock")?.to_owned();
  writeln!(out, "Updated genre: {genre}")?;

  // --- LiveVersion ---
  writeln!(out, "\n=== Testing LiveVersion ===")?;
  let live1 = svc.register(Song::live("S004", "Bohemian Rhapsody", "Queen", 354.0, 5_000_000, "1985-07-13", 8))?;
  writeln!(out, "{}", svc.song(live1)?)?;
  let original = svc.song(live1)?.duration();
  let extended = svc.apply_echo(live1, 1.2)?;
  writeln!(out, "Duration after echo: {extended:.1}s (was {original:.1}s)")?;

  // --- Playlist ---
  writeln!(out, "\n=== Testing Playlist ===")?;
  let mut playlist = Playlist::with_songs("P001", vec![song1, song2]);
  playlist.add_song(single1);
  playlist.add_song(live1);
  writeln!(out, "{}", playlist.display(svc.catalog()))?;
  writeln!(out, "Total duration: {:.1} seconds", svc.total_duration(&playlist)?)?;

  let current = playlist.current_song().context("playlist P001 starts empty")?;
  writeln!(out, "\nCurrent song: {}", svc.song(current)?)?;
  writeln!(out, "Next song: {}", svc.advance(&mut playlist)?)?;

  let playlist2 = Playlist::with_songs("P002", vec![single1]);
  let merged = svc.merge(&playlist, &playlist2)?;
  writeln!(out, "\nMerged playlist {} has {} songs", merged.id(), merged.len())?;

  // --- User ---
  writeln!(out, "\n=== Testing User ===")?;
  let mut user = User::new("U001");
  user.like(song1);
  user.like(song2);
  svc.play(&mut user, song1)?;
  svc.play(&mut user, song2)?;

  match svc.recommend(&user)? {
    Some(rec) => writeln!(out, "Recommended song: {} (streams: {})", rec.title(), rec.streams())?,
    None => writeln!(out, "No recommendation")?,
  }

  // --- Edge cases ---
  writeln!(out, "\n=== Testing Edge Cases ===")?;
  if Song::is_valid_duration(-100.0) {
    writeln!(out, "Unexpected: -100s accepted as a valid duration")?;
  } else {
    match svc.register(Song::new("S005", "Bad", "Artist", -100.0, 0)) {
      Ok(_) => writeln!(out, "Invalid duration -100s registered (validation is advisory)")?,
      Err(e) => writeln!(out, "Caught invalid duration: {e}")?,
    }
  }

  match svc.remove(&mut playlist, &SongId::new("invalid_id")) {
    Err(e @ CoreError::NotFound(_)) => writeln!(out, "Caught missing song: {e}")?,
    other => return Err(unexpected("remove_song", other)),
  }

  match svc.apply_echo(live1, -1.0) {
    Err(e @ CoreError::InvalidArgument(_)) => writeln!(out, "Caught invalid echo: {e}")?,
    other => return Err(unexpected("apply_echo", other)),
  }

  while svc.advance(&mut playlist).is_ok() {}
  match playlist.next_song() {
    Err(e @ CoreError::OutOfRange(_)) => writeln!(out, "Caught exhausted playlist: {e}")?,
    other => return Err(unexpected("next_song", other)),
  }

  Ok(())
}

fn unexpected<T: std::fmt::Debug>(op: &str, outcome: Result<T, CoreError>) -> anyhow::Error {
  anyhow::anyhow!("{op}: unexpected outcome {outcome:?}")
}
