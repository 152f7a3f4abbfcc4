// src/repositories/season_repository.rs
//
// Season persistence

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Season};
use crate::error::{AppError, AppResult};
use crate::repositories::{language_from_code, row_to_audit, subtitles_from_json};

#[cfg_attr(test, mockall::automock)]
pub trait SeasonRepository: Send + Sync {
    fn find_all_by_show(&self, show_id: i64) -> AppResult<Vec<Season>>;
    fn find_all_by_show_and_user(&self, show_id: i64, user: Uuid) -> AppResult<Vec<Season>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Season>>;
    fn add(&self, season: &Season, user: Uuid) -> AppResult<i64>;
    fn update(&self, season: &Season, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteSeasonRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSeasonRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_season(row: &Row) -> Result<Season, rusqlite::Error> {
        let language: String = row.get("language")?;
        let subtitles: String = row.get("subtitles")?;

        Ok(Season {
            id: Some(row.get("id")?),
            show_id: row.get("show_id")?,
            number: row.get("number")?,
            start_year: row.get("start_year")?,
            end_year: row.get("end_year")?,
            language: language_from_code(&language)?,
            subtitles: subtitles_from_json(&subtitles)?,
            note: row.get("note")?,
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }
}

impl SeasonRepository for SqliteSeasonRepository {
    fn find_all_by_show(&self, show_id: i64) -> AppResult<Vec<Season>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, show_id, number, start_year, end_year, language, subtitles, note,
                    position, created_user, created_time, updated_user, updated_time
             FROM seasons
             WHERE show_id = ?1
             ORDER BY position, id",
        )?;

        let seasons: Vec<Season> = stmt
            .query_map(params![show_id], Self::row_to_season)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(seasons)
    }

    fn find_all_by_show_and_user(&self, show_id: i64, user: Uuid) -> AppResult<Vec<Season>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, show_id, number, start_year, end_year, language, subtitles, note,
                    position, created_user, created_time, updated_user, updated_time
             FROM seasons
             WHERE show_id = ?1 AND created_user = ?2
             ORDER BY position, id",
        )?;

        let seasons: Vec<Season> = stmt
            .query_map(params![show_id, user.to_string()], Self::row_to_season)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(seasons)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Season>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, show_id, number, start_year, end_year, language, subtitles, note,
                    position, created_user, created_time, updated_user, updated_time
             FROM seasons
             WHERE id = ?1 AND created_user = ?2",
        )?;

        match stmt.query_row(params![id, user.to_string()], Self::row_to_season) {
            Ok(season) => Ok(Some(season)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, season: &Season, user: Uuid) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let audit = AuditStamp::new(user);

        conn.execute(
            "INSERT INTO seasons (show_id, number, start_year, end_year, language, subtitles,
                                  note, position,
                                  created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                season.show_id,
                season.number,
                season.start_year,
                season.end_year,
                season.language.code(),
                serde_json::to_string(&season.subtitles)?,
                season.note,
                season.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, season: &Season, user: Uuid) -> AppResult<()> {
        let id = season.id.ok_or(AppError::NotFound)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE seasons
             SET number = ?1, start_year = ?2, end_year = ?3, language = ?4,
                 subtitles = ?5, note = ?6, updated_user = ?7, updated_time = ?8
             WHERE id = ?9",
            params![
                season.number,
                season.start_year,
                season.end_year,
                season.language.code(),
                serde_json::to_string(&season.subtitles)?,
                season.note,
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
            "UPDATE seasons SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM seasons WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
