// src/repositories/genre_repository.rs
//
// Genre persistence

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Genre};
use crate::error::{AppError, AppResult};
use crate::repositories::row_to_audit;

#[cfg_attr(test, mockall::automock)]
pub trait GenreRepository: Send + Sync {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Genre>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Genre>>;
    fn add(&self, genre: &Genre, user: Uuid) -> AppResult<i64>;
    fn update(&self, genre: &Genre, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteGenreRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteGenreRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

/// Map a database row to a Genre. Shared with the movie and show
/// repositories, which select the same columns through their link tables.
pub(crate) fn row_to_genre(row: &Row) -> Result<Genre, rusqlite::Error> {
    Ok(Genre {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        position: row.get("position")?,
        audit: Some(row_to_audit(row)?),
    })
}

impl GenreRepository for SqliteGenreRepository {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, position, created_user, created_time, updated_user, updated_time
             FROM genres
             WHERE created_user = ?1
             ORDER BY position, id",
        )?;

        let genres: Vec<Genre> = stmt
            .query_map(params![user.to_string()], row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Genre>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, position, created_user, created_time, updated_user, updated_time
             FROM genres
             WHERE id = ?1 AND created_user = ?2",
        )?;

        match stmt.query_row(params![id, user.to_string()], row_to_genre) {
            Ok(genre) => Ok(Some(genre)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, genre: &Genre, user: Uuid) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let audit = AuditStamp::new(user);

        conn.execute(
            "INSERT INTO genres (name, position, created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                genre.name,
                genre.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, genre: &Genre, user: Uuid) -> AppResult<()> {
        let id = genre.id.ok_or(AppError::NotFound)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE genres SET name = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![
                genre.name,
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
            "UPDATE genres SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM genres WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
