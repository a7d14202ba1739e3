use serde::{Deserialize, Serialize};
use std::fmt;

/// Variante de una canción.
///
/// Todas las variantes comparten el registro base de [`Song`](super::song::Song);
/// aquí solo vive lo que cada una añade:
/// - `Base`: canción sin datos extra (también el resultado de combinar dos canciones).
/// - `Single`: pista publicada como sencillo, con su género.
/// - `Live`: grabación en concierto, con fecha y nivel de ruido del público.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SongKind {
  #[default]
  Base,
  Single {
    genre: String,
  },
  Live {
    /// Fecha del concierto tal como llega (p. ej. `"1985-07-13"`).
    concert_date: String,
    /// Nivel de ruido del público; escala la extensión por eco.
    crowd_noise_level: i64,
  },
}

impl SongKind {
  pub fn is_single(&self) -> bool {
    matches!(self, SongKind::Single { .. })
  }

  pub fn is_live(&self) -> bool {
    matches!(self, SongKind::Live { .. })
  }
}

impl fmt::Display for SongKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SongKind::Base => write!(f, "Song"),
      SongKind::Single { .. } => write!(f, "Single"),
      SongKind::Live { .. } => write!(f, "Live"),
    }
  }
}
