// src/repositories/picture_repository.rs
//
// Picture persistence

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Picture};
use crate::error::{AppError, AppResult};
use crate::repositories::row_to_audit;

#[cfg_attr(test, mockall::automock)]
pub trait PictureRepository: Send + Sync {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Picture>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Picture>>;
    fn add(&self, picture: &Picture, user: Uuid) -> AppResult<i64>;
    fn update(&self, picture: &Picture, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqlitePictureRepository {
    pool: Arc<ConnectionPool>,
}

impl SqlitePictureRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_picture(row: &Row) -> Result<Picture, rusqlite::Error> {
        Ok(Picture {
            id: Some(row.get("id")?),
            content: row.get("content")?,
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }
}

impl PictureRepository for SqlitePictureRepository {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Picture>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, content, position, created_user, created_time, updated_user, updated_time
             FROM pictures
             WHERE created_user = ?1
             ORDER BY position, id",
        )?;

        let pictures: Vec<Picture> = stmt
            .query_map(params![user.to_string()], Self::row_to_picture)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pictures)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Picture>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, content, position, created_user, created_time, updated_user, updated_time
             FROM pictures
             WHERE id = ?1 AND created_user = ?2",
        )?;

        match stmt.query_row(params![id, user.to_string()], Self::row_to_picture) {
            Ok(picture) => Ok(Some(picture)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, picture: &Picture, user: Uuid) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let audit = AuditStamp::new(user);

        conn.execute(
            "INSERT INTO pictures (content, position, created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                picture.content,
                picture.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, picture: &Picture, user: Uuid) -> AppResult<()> {
        let id = picture.id.ok_or(AppError::NotFound)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE pictures SET content = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![
                picture.content,
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
            "UPDATE pictures SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM pictures WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
