// src/repositories/game_repository.rs
//
// Game persistence. Cheats have their own repository; deleting a game
// cascades through cheats and their data.

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Game};
use crate::error::{AppError, AppResult};
use crate::repositories::row_to_audit;

#[cfg_attr(test, mockall::automock)]
pub trait GameRepository: Send + Sync {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Game>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Game>>;
    fn add(&self, game: &Game, user: Uuid) -> AppResult<i64>;
    fn update(&self, game: &Game, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteGameRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteGameRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_game(row: &Row) -> Result<Game, rusqlite::Error> {
        Ok(Game {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            wiki_en: row.get("wiki_en")?,
            wiki_cz: row.get("wiki_cz")?,
            media_count: row.get("media_count")?,
            crack: row.get("crack")?,
            serial_key: row.get("serial_key")?,
            patch: row.get("patch")?,
            trainer: row.get("trainer")?,
            trainer_data: row.get("trainer_data")?,
            editor: row.get("editor")?,
            saves: row.get("saves")?,
            other_data: row.get("other_data")?,
            note: row.get("note")?,
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }
}

impl GameRepository for SqliteGameRepository {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Game>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, wiki_en, wiki_cz, media_count, crack, serial_key, patch,
                    trainer, trainer_data, editor, saves, other_data, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM games
             WHERE created_user = ?1
             ORDER BY position, id",
        )?;

        let games: Vec<Game> = stmt
            .query_map(params![user.to_string()], Self::row_to_game)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(games)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Game>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, wiki_en, wiki_cz, media_count, crack, serial_key, patch,
                    trainer, trainer_data, editor, saves, other_data, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM games
             WHERE id = ?1 AND created_user = ?2",
        )?;

        match stmt.query_row(params![id, user.to_string()], Self::row_to_game) {
            Ok(game) => Ok(Some(game)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, game: &Game, user: Uuid) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let audit = AuditStamp::new(user);

        conn.execute(
            "INSERT INTO games (name, wiki_en, wiki_cz, media_count, crack, serial_key, patch,
                                trainer, trainer_data, editor, saves, other_data, note, position,
                                created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                game.name,
                game.wiki_en,
                game.wiki_cz,
                game.media_count,
                game.crack,
                game.serial_key,
                game.patch,
                game.trainer,
                game.trainer_data,
                game.editor,
                game.saves,
                game.other_data,
                game.note,
                game.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, game: &Game, user: Uuid) -> AppResult<()> {
        let id = game.id.ok_or(AppError::NotFound)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE games
             SET name = ?1, wiki_en = ?2, wiki_cz = ?3, media_count = ?4, crack = ?5,
                 serial_key = ?6, patch = ?7, trainer = ?8, trainer_data = ?9, editor = ?10,
                 saves = ?11, other_data = ?12, note = ?13, updated_user = ?14, updated_time = ?15
             WHERE id = ?16",
            params![
                game.name,
                game.wiki_en,
                game.wiki_cz,
                game.media_count,
                game.crack,
                game.serial_key,
                game.patch,
                game.trainer,
                game.trainer_data,
                game.editor,
                game.saves,
                game.other_data,
                game.note,
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
            "UPDATE games SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM games WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};

    fn repository() -> SqliteGameRepository {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        SqliteGameRepository::new(pool)
    }

    fn game(name: &str) -> Game {
        Game {
            id: None,
            name: name.to_string(),
            wiki_en: None,
            wiki_cz: None,
            media_count: 2,
            crack: true,
            serial_key: false,
            patch: true,
            trainer: false,
            trainer_data: false,
            editor: false,
            saves: true,
            other_data: Some("bonus maps".to_string()),
            note: None,
            position: 0,
            audit: None,
        }
    }

    #[test]
    fn test_flags_round_trip() {
        let repo = repository();
        let user = Uuid::new_v4();

        let id = repo.add(&game("Doom"), user).unwrap();
        let stored = repo.find_by_id_and_user(id, user).unwrap().unwrap();

        assert!(stored.crack);
        assert!(!stored.serial_key);
        assert!(stored.saves);
        assert_eq!(
            stored.additional_data(),
            "Crack, patch, saves, bonus maps"
        );
    }

    #[test]
    fn test_update_changes_flags() {
        let repo = repository();
        let user = Uuid::new_v4();

        let id = repo.add(&game("Doom"), user).unwrap();
        let mut stored = repo.find_by_id_and_user(id, user).unwrap().unwrap();
        stored.crack = false;
        stored.media_count = 3;
        repo.update(&stored, user).unwrap();

        let updated = repo.find_by_id_and_user(id, user).unwrap().unwrap();
        assert!(!updated.crack);
        assert_eq!(updated.media_count, 3);
    }
}
