//! Tuneload Catalog - music catalog export shapes and the load runner
//!
//! Three record shapes (artists, genres, artist-genre links) decoded from
//! U+0001-delimited export files and bulk-inserted into DuckDB.

mod artist;
mod artist_genre;
mod config;
mod genre;
mod runner;
pub mod schema;

pub use artist::{ARTIST, Artist, ArtistDecoder};
pub use artist_genre::{ARTIST_GENRE, ArtistGenreDecoder, ArtistGenreLink};
pub use config::LoadConfig;
pub use genre::{GENRE, Genre, GenreDecoder};
pub use runner::{FileSummary, Summary, load_file, run};
