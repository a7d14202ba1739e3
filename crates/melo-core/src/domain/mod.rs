pub mod catalog;
pub mod ids;
pub mod playlist;
pub mod song;
pub mod song_kind;
pub mod user;

pub use catalog::Catalog;
pub use ids::{PlaylistId, SongHandle, SongId, UserId};
pub use playlist::Playlist;
pub use song::Song;
pub use song_kind::SongKind;
pub use user::User;
