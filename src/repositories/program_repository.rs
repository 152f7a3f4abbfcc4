// src/repositories/program_repository.rs
//
// Program persistence

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Program, ProgramFormat};
use crate::error::{AppError, AppResult};
use crate::repositories::row_to_audit;

#[cfg_attr(test, mockall::automock)]
pub trait ProgramRepository: Send + Sync {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Program>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Program>>;
    fn add(&self, program: &Program, user: Uuid) -> AppResult<i64>;
    fn update(&self, program: &Program, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteProgramRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteProgramRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_program(row: &Row) -> Result<Program, rusqlite::Error> {
        let format: String = row.get("format")?;
        let format = ProgramFormat::from_code(&format).ok_or(rusqlite::Error::InvalidQuery)?;

        Ok(Program {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            wiki_en: row.get("wiki_en")?,
            wiki_cz: row.get("wiki_cz")?,
            media_count: row.get("media_count")?,
            format,
            crack: row.get("crack")?,
            serial_key: row.get("serial_key")?,
            other_data: row.get("other_data")?,
            note: row.get("note")?,
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }
}

impl ProgramRepository for SqliteProgramRepository {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Program>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, wiki_en, wiki_cz, media_count, format, crack, serial_key,
                    other_data, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM programs
             WHERE created_user = ?1
             ORDER BY position, id",
        )?;

        let programs: Vec<Program> = stmt
            .query_map(params![user.to_string()], Self::row_to_program)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(programs)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Program>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, wiki_en, wiki_cz, media_count, format, crack, serial_key,
                    other_data, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM programs
             WHERE id = ?1 AND created_user = ?2",
        )?;

        match stmt.query_row(params![id, user.to_string()], Self::row_to_program) {
            Ok(program) => Ok(Some(program)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, program: &Program, user: Uuid) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let audit = AuditStamp::new(user);

        conn.execute(
            "INSERT INTO programs (name, wiki_en, wiki_cz, media_count, format, crack,
                                   serial_key, other_data, note, position,
                                   created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                program.name,
                program.wiki_en,
                program.wiki_cz,
                program.media_count,
                program.format.code(),
                program.crack,
                program.serial_key,
                program.other_data,
                program.note,
                program.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, program: &Program, user: Uuid) -> AppResult<()> {
        let id = program.id.ok_or(AppError::NotFound)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE programs
             SET name = ?1, wiki_en = ?2, wiki_cz = ?3, media_count = ?4, format = ?5,
                 crack = ?6, serial_key = ?7, other_data = ?8, note = ?9,
                 updated_user = ?10, updated_time = ?11
             WHERE id = ?12",
            params![
                program.name,
                program.wiki_en,
                program.wiki_cz,
                program.media_count,
                program.format.code(),
                program.crack,
                program.serial_key,
                program.other_data,
                program.note,
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
            "UPDATE programs SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM programs WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
