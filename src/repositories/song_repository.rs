// src/repositories/song_repository.rs
//
// Song persistence

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Song, Time};
use crate::error::{AppError, AppResult};
use crate::repositories::row_to_audit;

#[cfg_attr(test, mockall::automock)]
pub trait SongRepository: Send + Sync {
    fn find_all_by_music(&self, music_id: i64) -> AppResult<Vec<Song>>;
    fn find_all_by_music_and_user(&self, music_id: i64, user: Uuid) -> AppResult<Vec<Song>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Song>>;
    fn add(&self, song: &Song, user: Uuid) -> AppResult<i64>;
    fn update(&self, song: &Song, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteSongRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSongRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_song(row: &Row) -> Result<Song, rusqlite::Error> {
        Ok(Song {
            id: Some(row.get("id")?),
            music_id: row.get("music_id")?,
            name: row.get("name")?,
            length: Time::from_seconds(row.get("length")?),
            note: row.get("note")?,
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }
}

impl SongRepository for SqliteSongRepository {
    fn find_all_by_music(&self, music_id: i64) -> AppResult<Vec<Song>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, music_id, name, length, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM songs
             WHERE music_id = ?1
             ORDER BY position, id",
        )?;

        let songs: Vec<Song> = stmt
            .query_map(params![music_id], Self::row_to_song)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(songs)
    }

    fn find_all_by_music_and_user(&self, music_id: i64, user: Uuid) -> AppResult<Vec<Song>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, music_id, name, length, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM songs
             WHERE music_id = ?1 AND created_user = ?2
             ORDER BY position, id",
        )?;

        let songs: Vec<Song> = stmt
            .query_map(params![music_id, user.to_string()], Self::row_to_song)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(songs)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Song>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, music_id, name, length, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM songs
             WHERE id = ?1 AND created_user = ?2",
        )?;

        match stmt.query_row(params![id, user.to_string()], Self::row_to_song) {
            Ok(song) => Ok(Some(song)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, song: &Song, user: Uuid) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let audit = AuditStamp::new(user);

        conn.execute(
            "INSERT INTO songs (music_id, name, length, note, position,
                                created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                song.music_id,
                song.name,
                song.length.total_seconds(),
                song.note,
                song.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, song: &Song, user: Uuid) -> AppResult<()> {
        let id = song.id.ok_or(AppError::NotFound)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE songs
             SET name = ?1, length = ?2, note = ?3, updated_user = ?4, updated_time = ?5
             WHERE id = ?6",
            params![
                song.name,
                song.length.total_seconds(),
                song.note,
                user.to_string(),
                chrono::Utc::now().to_rfc3339(),
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE songs SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM songs WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
