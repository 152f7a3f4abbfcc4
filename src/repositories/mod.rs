// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls
// - Explicit SQL only

use chrono::{DateTime, Utc};
use rusqlite::Row;
use uuid::Uuid;

use crate::domain::{AuditStamp, Language};

pub mod account_repository;
pub mod cheat_repository;
pub mod episode_repository;
pub mod game_repository;
pub mod genre_repository;
pub mod movie_repository;
pub mod music_repository;
pub mod picture_repository;
pub mod program_repository;
pub mod season_repository;
pub mod show_repository;
pub mod song_repository;

pub use account_repository::{AccountRepository, SqliteAccountRepository};
pub use cheat_repository::{CheatRepository, SqliteCheatRepository};
pub use episode_repository::{EpisodeRepository, SqliteEpisodeRepository};
pub use game_repository::{GameRepository, SqliteGameRepository};
pub use genre_repository::{GenreRepository, SqliteGenreRepository};
pub use movie_repository::{MovieRepository, SqliteMovieRepository};
pub use music_repository::{MusicRepository, SqliteMusicRepository};
pub use picture_repository::{PictureRepository, SqlitePictureRepository};
pub use program_repository::{ProgramRepository, SqliteProgramRepository};
pub use season_repository::{SeasonRepository, SqliteSeasonRepository};
pub use show_repository::{ShowRepository, SqliteShowRepository};
pub use song_repository::{SongRepository, SqliteSongRepository};

/// Map the audit columns shared by all catalog tables.
/// Returns rusqlite::Error for query_map compatibility.
pub(crate) fn row_to_audit(row: &Row) -> Result<AuditStamp, rusqlite::Error> {
    let created_user: String = row.get("created_user")?;
    let created_user = Uuid::parse_str(&created_user)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let created_time: String = row.get("created_time")?;
    let created_time = DateTime::parse_from_rfc3339(&created_time)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let updated_user: String = row.get("updated_user")?;
    let updated_user = Uuid::parse_str(&updated_user)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let updated_time: String = row.get("updated_time")?;
    let updated_time = DateTime::parse_from_rfc3339(&updated_time)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(AuditStamp {
        created_user,
        created_time,
        updated_user,
        updated_time,
    })
}

/// Decode a stored language code.
pub(crate) fn language_from_code(code: &str) -> Result<Language, rusqlite::Error> {
    Language::from_code(code).ok_or(rusqlite::Error::InvalidQuery)
}

/// Decode the JSON-encoded subtitle list stored in a TEXT column.
pub(crate) fn subtitles_from_json(json: &str) -> Result<Vec<Language>, rusqlite::Error> {
    serde_json::from_str(json).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}
