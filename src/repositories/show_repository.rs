// src/repositories/show_repository.rs
//
// Show persistence. Genre links live in their own table and are written
// together with the show row in one transaction. Seasons and episodes
// have their own repositories; deleting a show cascades through them.

use rusqlite::{params, Connection, Row, Transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Genre, Show};
use crate::error::{AppError, AppResult};
use crate::repositories::genre_repository::row_to_genre;
use crate::repositories::row_to_audit;

#[cfg_attr(test, mockall::automock)]
pub trait ShowRepository: Send + Sync {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Show>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Show>>;
    fn add(&self, show: &Show, user: Uuid) -> AppResult<i64>;
    fn update(&self, show: &Show, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteShowRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteShowRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a show row; genres are attached by the callers.
    fn row_to_show(row: &Row) -> Result<Show, rusqlite::Error> {
        Ok(Show {
            id: Some(row.get("id")?),
            czech_name: row.get("czech_name")?,
            original_name: row.get("original_name")?,
            csfd: row.get("csfd")?,
            imdb_code: row.get("imdb_code")?,
            wiki_en: row.get("wiki_en")?,
            wiki_cz: row.get("wiki_cz")?,
            picture: row.get("picture_id")?,
            note: row.get("note")?,
            genres: Vec::new(),
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }

    fn load_genres(conn: &Connection, show_id: i64) -> AppResult<Vec<Genre>> {
        let mut stmt = conn.prepare(
            "SELECT g.id, g.name, g.position,
                    g.created_user, g.created_time, g.updated_user, g.updated_time
             FROM genres g
             JOIN show_genres sg ON sg.genre_id = g.id
             WHERE sg.show_id = ?1
             ORDER BY sg.ord",
        )?;

        let genres: Vec<Genre> = stmt
            .query_map(params![show_id], row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn store_genres(tx: &Transaction, show_id: i64, genres: &[Genre]) -> AppResult<()> {
        for (ord, genre) in genres.iter().enumerate() {
            // Links can only reference stored genres
            let genre_id = genre.id.ok_or(AppError::NotFound)?;
            tx.execute(
                "INSERT INTO show_genres (show_id, genre_id, ord) VALUES (?1, ?2, ?3)",
                params![show_id, genre_id, ord as i64],
            )?;
        }
        Ok(())
    }
}

impl ShowRepository for SqliteShowRepository {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Show>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, czech_name, original_name, csfd, imdb_code, wiki_en, wiki_cz,
                    picture_id, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM shows
             WHERE created_user = ?1
             ORDER BY position, id",
        )?;

        let mut shows: Vec<Show> = stmt
            .query_map(params![user.to_string()], Self::row_to_show)?
            .collect::<Result<Vec<_>, _>>()?;

        for show in &mut shows {
            if let Some(id) = show.id {
                show.genres = Self::load_genres(&conn, id)?;
            }
        }

        Ok(shows)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Show>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, czech_name, original_name, csfd, imdb_code, wiki_en, wiki_cz,
                    picture_id, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM shows
             WHERE id = ?1 AND created_user = ?2",
        )?;

        let mut show = match stmt.query_row(params![id, user.to_string()], Self::row_to_show) {
            Ok(show) => show,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(AppError::Database(e)),
        };

        show.genres = Self::load_genres(&conn, id)?;

        Ok(Some(show))
    }

    fn add(&self, show: &Show, user: Uuid) -> AppResult<i64> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let audit = AuditStamp::new(user);

        tx.execute(
            "INSERT INTO shows (czech_name, original_name, csfd, imdb_code, wiki_en, wiki_cz,
                                picture_id, note, position,
                                created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                show.czech_name,
                show.original_name,
                show.csfd,
                show.imdb_code,
                show.wiki_en,
                show.wiki_cz,
                show.picture,
                show.note,
                show.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        let show_id = tx.last_insert_rowid();
        Self::store_genres(&tx, show_id, &show.genres)?;
        tx.commit()?;

        Ok(show_id)
    }

    fn update(&self, show: &Show, user: Uuid) -> AppResult<()> {
        let id = show.id.ok_or(AppError::NotFound)?;
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let rows_affected = tx.execute(
            "UPDATE shows
             SET czech_name = ?1, original_name = ?2, csfd = ?3, imdb_code = ?4,
                 wiki_en = ?5, wiki_cz = ?6, picture_id = ?7, note = ?8,
                 updated_user = ?9, updated_time = ?10
             WHERE id = ?11",
            params![
                show.czech_name,
                show.original_name,
                show.csfd,
                show.imdb_code,
                show.wiki_en,
                show.wiki_cz,
                show.picture,
                show.note,
                user.to_string(),
                chrono::Utc::now().to_rfc3339(),
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tx.execute("DELETE FROM show_genres WHERE show_id = ?1", params![id])?;
        Self::store_genres(&tx, id, &show.genres)?;
        tx.commit()?;

        Ok(())
    }

    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE shows SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM shows WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
