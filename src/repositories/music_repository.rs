// src/repositories/music_repository.rs
//
// Music persistence. Songs have their own repository; deleting an album
// cascades through them.

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Music};
use crate::error::{AppError, AppResult};
use crate::repositories::row_to_audit;

#[cfg_attr(test, mockall::automock)]
pub trait MusicRepository: Send + Sync {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Music>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Music>>;
    fn add(&self, music: &Music, user: Uuid) -> AppResult<i64>;
    fn update(&self, music: &Music, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteMusicRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMusicRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_music(row: &Row) -> Result<Music, rusqlite::Error> {
        Ok(Music {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            wiki_en: row.get("wiki_en")?,
            wiki_cz: row.get("wiki_cz")?,
            media_count: row.get("media_count")?,
            note: row.get("note")?,
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }
}

impl MusicRepository for SqliteMusicRepository {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Music>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, wiki_en, wiki_cz, media_count, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM music
             WHERE created_user = ?1
             ORDER BY position, id",
        )?;

        let music: Vec<Music> = stmt
            .query_map(params![user.to_string()], Self::row_to_music)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(music)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Music>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, wiki_en, wiki_cz, media_count, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM music
             WHERE id = ?1 AND created_user = ?2",
        )?;

        match stmt.query_row(params![id, user.to_string()], Self::row_to_music) {
            Ok(music) => Ok(Some(music)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, music: &Music, user: Uuid) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let audit = AuditStamp::new(user);

        conn.execute(
            "INSERT INTO music (name, wiki_en, wiki_cz, media_count, note, position,
                                created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                music.name,
                music.wiki_en,
                music.wiki_cz,
                music.media_count,
                music.note,
                music.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, music: &Music, user: Uuid) -> AppResult<()> {
        let id = music.id.ok_or(AppError::NotFound)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE music
             SET name = ?1, wiki_en = ?2, wiki_cz = ?3, media_count = ?4, note = ?5,
                 updated_user = ?6, updated_time = ?7
             WHERE id = ?8",
            params![
                music.name,
                music.wiki_en,
                music.wiki_cz,
                music.media_count,
                music.note,
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
            "UPDATE music SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM music WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
