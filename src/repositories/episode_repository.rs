// src/repositories/episode_repository.rs
//
// Episode persistence

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Episode, Time};
use crate::error::{AppError, AppResult};
use crate::repositories::row_to_audit;

#[cfg_attr(test, mockall::automock)]
pub trait EpisodeRepository: Send + Sync {
    fn find_all_by_season(&self, season_id: i64) -> AppResult<Vec<Episode>>;
    fn find_all_by_season_and_user(&self, season_id: i64, user: Uuid) -> AppResult<Vec<Episode>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Episode>>;
    fn add(&self, episode: &Episode, user: Uuid) -> AppResult<i64>;
    fn update(&self, episode: &Episode, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteEpisodeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteEpisodeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_episode(row: &Row) -> Result<Episode, rusqlite::Error> {
        Ok(Episode {
            id: Some(row.get("id")?),
            season_id: row.get("season_id")?,
            number: row.get("number")?,
            name: row.get("name")?,
            length: Time::from_seconds(row.get("length")?),
            note: row.get("note")?,
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }
}

impl EpisodeRepository for SqliteEpisodeRepository {
    fn find_all_by_season(&self, season_id: i64) -> AppResult<Vec<Episode>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, season_id, number, name, length, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM episodes
             WHERE season_id = ?1
             ORDER BY position, id",
        )?;

        let episodes: Vec<Episode> = stmt
            .query_map(params![season_id], Self::row_to_episode)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(episodes)
    }

    fn find_all_by_season_and_user(&self, season_id: i64, user: Uuid) -> AppResult<Vec<Episode>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, season_id, number, name, length, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM episodes
             WHERE season_id = ?1 AND created_user = ?2
             ORDER BY position, id",
        )?;

        let episodes: Vec<Episode> = stmt
            .query_map(params![season_id, user.to_string()], Self::row_to_episode)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(episodes)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Episode>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, season_id, number, name, length, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM episodes
             WHERE id = ?1 AND created_user = ?2",
        )?;

        match stmt.query_row(params![id, user.to_string()], Self::row_to_episode) {
            Ok(episode) => Ok(Some(episode)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, episode: &Episode, user: Uuid) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let audit = AuditStamp::new(user);

        conn.execute(
            "INSERT INTO episodes (season_id, number, name, length, note, position,
                                   created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                episode.season_id,
                episode.number,
                episode.name,
                episode.length.total_seconds(),
                episode.note,
                episode.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, episode: &Episode, user: Uuid) -> AppResult<()> {
        let id = episode.id.ok_or(AppError::NotFound)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE episodes
             SET number = ?1, name = ?2, length = ?3, note = ?4,
                 updated_user = ?5, updated_time = ?6
             WHERE id = ?7",
            params![
                episode.number,
                episode.name,
                episode.length.total_seconds(),
                episode.note,
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
            "UPDATE episodes SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM episodes WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
