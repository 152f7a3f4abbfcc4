// src/repositories/cheat_repository.rs
//
// Cheat persistence. Cheat data rows are owned by their cheat and are
// written together with the cheat row in one transaction.

use rusqlite::{params, Connection, Row, Transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Cheat, CheatData};
use crate::error::{AppError, AppResult};
use crate::repositories::row_to_audit;

#[cfg_attr(test, mockall::automock)]
pub trait CheatRepository: Send + Sync {
    fn find_all_by_game(&self, game_id: i64) -> AppResult<Vec<Cheat>>;
    fn find_all_by_game_and_user(&self, game_id: i64, user: Uuid) -> AppResult<Vec<Cheat>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Cheat>>;
    fn find_data_by_cheat(&self, cheat_id: i64) -> AppResult<Vec<CheatData>>;
    fn find_data_by_cheat_and_user(&self, cheat_id: i64, user: Uuid) -> AppResult<Vec<CheatData>>;
    fn add(&self, cheat: &Cheat, user: Uuid) -> AppResult<i64>;
    fn update(&self, cheat: &Cheat, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteCheatRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCheatRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a cheat row; data rows are attached by the callers.
    fn row_to_cheat(row: &Row) -> Result<Cheat, rusqlite::Error> {
        Ok(Cheat {
            id: Some(row.get("id")?),
            game_id: row.get("game_id")?,
            game_setting: row.get("game_setting")?,
            cheat_setting: row.get("cheat_setting")?,
            data: Vec::new(),
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }

    fn row_to_cheat_data(row: &Row) -> Result<CheatData, rusqlite::Error> {
        Ok(CheatData {
            id: Some(row.get("id")?),
            action: row.get("action")?,
            description: row.get("description")?,
            position: row.get("position")?,
        })
    }

    fn load_data(conn: &Connection, cheat_id: i64) -> AppResult<Vec<CheatData>> {
        let mut stmt = conn.prepare(
            "SELECT id, action, description, position
             FROM cheat_data
             WHERE cheat_id = ?1
             ORDER BY position, id",
        )?;

        let data: Vec<CheatData> = stmt
            .query_map(params![cheat_id], Self::row_to_cheat_data)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(data)
    }

    fn store_data(tx: &Transaction, cheat_id: i64, data: &[CheatData]) -> AppResult<()> {
        for item in data {
            tx.execute(
                "INSERT INTO cheat_data (cheat_id, action, description, position)
                 VALUES (?1, ?2, ?3, ?4)",
                params![cheat_id, item.action, item.description, item.position],
            )?;
        }
        Ok(())
    }

    fn attach_data(conn: &Connection, cheats: &mut [Cheat]) -> AppResult<()> {
        for cheat in cheats {
            if let Some(id) = cheat.id {
                cheat.data = Self::load_data(conn, id)?;
            }
        }
        Ok(())
    }
}

impl CheatRepository for SqliteCheatRepository {
    fn find_all_by_game(&self, game_id: i64) -> AppResult<Vec<Cheat>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, game_id, game_setting, cheat_setting, position,
                    created_user, created_time, updated_user, updated_time
             FROM cheats
             WHERE game_id = ?1
             ORDER BY position, id",
        )?;

        let mut cheats: Vec<Cheat> = stmt
            .query_map(params![game_id], Self::row_to_cheat)?
            .collect::<Result<Vec<_>, _>>()?;

        Self::attach_data(&conn, &mut cheats)?;

        Ok(cheats)
    }

    fn find_all_by_game_and_user(&self, game_id: i64, user: Uuid) -> AppResult<Vec<Cheat>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, game_id, game_setting, cheat_setting, position,
                    created_user, created_time, updated_user, updated_time
             FROM cheats
             WHERE game_id = ?1 AND created_user = ?2
             ORDER BY position, id",
        )?;

        let mut cheats: Vec<Cheat> = stmt
            .query_map(params![game_id, user.to_string()], Self::row_to_cheat)?
            .collect::<Result<Vec<_>, _>>()?;

        Self::attach_data(&conn, &mut cheats)?;

        Ok(cheats)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Cheat>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, game_id, game_setting, cheat_setting, position,
                    created_user, created_time, updated_user, updated_time
             FROM cheats
             WHERE id = ?1 AND created_user = ?2",
        )?;

        let mut cheat = match stmt.query_row(params![id, user.to_string()], Self::row_to_cheat) {
            Ok(cheat) => cheat,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(AppError::Database(e)),
        };

        cheat.data = Self::load_data(&conn, id)?;

        Ok(Some(cheat))
    }

    fn find_data_by_cheat(&self, cheat_id: i64) -> AppResult<Vec<CheatData>> {
        let conn = self.pool.get()?;
        Self::load_data(&conn, cheat_id)
    }

    fn find_data_by_cheat_and_user(&self, cheat_id: i64, user: Uuid) -> AppResult<Vec<CheatData>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT cd.id, cd.action, cd.description, cd.position
             FROM cheat_data cd
             JOIN cheats c ON c.id = cd.cheat_id
             WHERE cd.cheat_id = ?1 AND c.created_user = ?2
             ORDER BY cd.position, cd.id",
        )?;

        let data: Vec<CheatData> = stmt
            .query_map(params![cheat_id, user.to_string()], Self::row_to_cheat_data)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(data)
    }

    fn add(&self, cheat: &Cheat, user: Uuid) -> AppResult<i64> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let audit = AuditStamp::new(user);

        tx.execute(
            "INSERT INTO cheats (game_id, game_setting, cheat_setting, position,
                                 created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                cheat.game_id,
                cheat.game_setting,
                cheat.cheat_setting,
                cheat.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        let cheat_id = tx.last_insert_rowid();
        Self::store_data(&tx, cheat_id, &cheat.data)?;
        tx.commit()?;

        Ok(cheat_id)
    }

    fn update(&self, cheat: &Cheat, user: Uuid) -> AppResult<()> {
        let id = cheat.id.ok_or(AppError::NotFound)?;
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let rows_affected = tx.execute(
            "UPDATE cheats
             SET game_setting = ?1, cheat_setting = ?2, updated_user = ?3, updated_time = ?4
             WHERE id = ?5",
            params![
                cheat.game_setting,
                cheat.cheat_setting,
                user.to_string(),
                chrono::Utc::now().to_rfc3339(),
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        // Owned collection is replaced wholesale
        tx.execute("DELETE FROM cheat_data WHERE cheat_id = ?1", params![id])?;
        Self::store_data(&tx, id, &cheat.data)?;
        tx.commit()?;

        Ok(())
    }

    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE cheats SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM cheats WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
