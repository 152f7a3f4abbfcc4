// src/services/game_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Cheat, Game};
use crate::error::{AppError, AppResult};
use crate::forms::{CheatForm, GameForm};
use crate::repositories::{CheatRepository, GameRepository};
use crate::services::cache::ListCache;
use crate::services::{compact_positions, neighbor_swap, next_position};

/// Games with their cheats. Only the root game list is cached, cheat
/// reads go to the repository.
pub struct GameService {
    games: Arc<dyn GameRepository>,
    cheats: Arc<dyn CheatRepository>,
    cache: ListCache<Game>,
}

impl GameService {
    pub fn new(
        games: Arc<dyn GameRepository>,
        cheats: Arc<dyn CheatRepository>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            games,
            cheats,
            cache: ListCache::new(cache_capacity),
        }
    }

    // ========================================================================
    // GAMES
    // ========================================================================

    pub fn list(&self, user: Uuid) -> AppResult<Vec<Game>> {
        self.cache
            .get_or_load(user, || self.games.find_all_by_user(user))
    }

    pub fn get(&self, id: i64, user: Uuid) -> AppResult<Game> {
        self.games
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add(&self, form: &GameForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }

        let mut game = form.to_record()?;
        game.position = next_position(&self.games.find_all_by_user(user)?);

        let id = self.games.add(&game, user)?;
        self.cache.invalidate(user);
        log::info!("Added game {id}");
        Ok(id)
    }

    pub fn update(&self, form: &GameForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        self.get(id, user)?;

        let game = form.to_record()?;
        self.games.update(&game, user)?;
        self.cache.invalidate(user);
        Ok(())
    }

    pub fn remove(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.get(id, user)?;
        self.games.delete(id)?;

        let remaining = self.games.find_all_by_user(user)?;
        compact_positions(&remaining, |id, position| {
            self.games.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        log::info!("Removed game {id}");
        Ok(())
    }

    /// Copies the game together with its cheats and their data rows.
    pub fn duplicate(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let game = self.get(id, user)?;

        let mut copy = game.duplicated();
        copy.position = next_position(&self.games.find_all_by_user(user)?);
        let new_id = self.games.add(&copy, user)?;

        for cheat in self.cheats.find_all_by_game_and_user(id, user)? {
            let mut cheat_copy = cheat.duplicated();
            cheat_copy.game_id = new_id;
            self.cheats.add(&cheat_copy, user)?;
        }

        self.cache.invalidate(user);
        Ok(new_id)
    }

    pub fn move_up(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_games(id, -1, user)
    }

    pub fn move_down(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_games(id, 1, user)
    }

    pub fn update_positions(&self, user: Uuid) -> AppResult<()> {
        let games = self.games.find_all_by_user(user)?;
        compact_positions(&games, |id, position| {
            self.games.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        Ok(())
    }

    // ========================================================================
    // CHEATS
    // ========================================================================

    pub fn list_cheats(&self, game_id: i64, user: Uuid) -> AppResult<Vec<Cheat>> {
        self.get(game_id, user)?;
        self.cheats.find_all_by_game_and_user(game_id, user)
    }

    pub fn get_cheat(&self, id: i64, user: Uuid) -> AppResult<Cheat> {
        self.cheats
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add_cheat(&self, game_id: i64, form: &CheatForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }
        self.get(game_id, user)?;

        let mut cheat = form.to_record(game_id)?;
        cheat.position = next_position(&self.cheats.find_all_by_game_and_user(game_id, user)?);

        self.cheats.add(&cheat, user)
    }

    pub fn update_cheat(&self, form: &CheatForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        let existing = self.get_cheat(id, user)?;

        let cheat = form.to_record(existing.game_id)?;
        self.cheats.update(&cheat, user)
    }

    pub fn remove_cheat(&self, id: i64, user: Uuid) -> AppResult<()> {
        let cheat = self.get_cheat(id, user)?;
        self.cheats.delete(id)?;

        let siblings = self.cheats.find_all_by_game_and_user(cheat.game_id, user)?;
        compact_positions(&siblings, |id, position| {
            self.cheats.update_position(id, position, user)
        })
    }

    pub fn duplicate_cheat(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let cheat = self.get_cheat(id, user)?;

        let mut copy = cheat.duplicated();
        copy.position =
            next_position(&self.cheats.find_all_by_game_and_user(cheat.game_id, user)?);

        self.cheats.add(&copy, user)
    }

    pub fn move_cheat_up(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_cheats(id, -1, user)
    }

    pub fn move_cheat_down(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_cheats(id, 1, user)
    }

    pub fn update_cheat_positions(&self, game_id: i64, user: Uuid) -> AppResult<()> {
        let cheats = self.cheats.find_all_by_game_and_user(game_id, user)?;
        compact_positions(&cheats, |id, position| {
            self.cheats.update_position(id, position, user)
        })
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn swap_games(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let games = self.games.find_all_by_user(user)?;
        for (id, position) in neighbor_swap(&games, id, step)? {
            self.games.update_position(id, position, user)?;
        }
        self.cache.invalidate(user);
        Ok(())
    }

    fn swap_cheats(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let cheat = self.get_cheat(id, user)?;
        let siblings = self.cheats.find_all_by_game_and_user(cheat.game_id, user)?;
        for (id, position) in neighbor_swap(&siblings, id, step)? {
            self.cheats.update_position(id, position, user)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};
    use crate::forms::CheatDataForm;
    use crate::repositories::{SqliteCheatRepository, SqliteGameRepository};

    fn service() -> GameService {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        GameService::new(
            Arc::new(SqliteGameRepository::new(pool.clone())),
            Arc::new(SqliteCheatRepository::new(pool.clone())),
            4,
        )
    }

    fn game_form(name: &str) -> GameForm {
        GameForm {
            name: name.to_string(),
            media_count: "1".to_string(),
            crack: true,
            ..GameForm::default()
        }
    }

    fn cheat_form() -> CheatForm {
        CheatForm {
            game_setting: "any difficulty".to_string(),
            cheat_setting: "type during play".to_string(),
            data: vec![CheatDataForm {
                action: "IDDQD".to_string(),
                description: "god mode".to_string(),
            }],
            ..CheatForm::default()
        }
    }

    #[test]
    fn test_add_and_update_game() {
        let service = service();
        let user = Uuid::new_v4();
        let id = service.add(&game_form("Doom"), user).unwrap();

        let mut renamed = game_form("Doom II");
        renamed.id = Some(id);
        service.update(&renamed, user).unwrap();

        let stored = service.get(id, user).unwrap();
        assert_eq!(stored.name, "Doom II");
        assert_eq!(stored.additional_data(), "Crack");
    }

    #[test]
    fn test_cheat_requires_owned_game() {
        let service = service();
        let user = Uuid::new_v4();
        let game_id = service.add(&game_form("Doom"), user).unwrap();

        let err = service
            .add_cheat(game_id, &cheat_form(), Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        service.add_cheat(game_id, &cheat_form(), user).unwrap();
        assert_eq!(service.list_cheats(game_id, user).unwrap().len(), 1);
    }

    #[test]
    fn test_update_cheat_replaces_data_rows() {
        let service = service();
        let user = Uuid::new_v4();
        let game_id = service.add(&game_form("Doom"), user).unwrap();
        let cheat_id = service.add_cheat(game_id, &cheat_form(), user).unwrap();

        let mut changed = cheat_form();
        changed.id = Some(cheat_id);
        changed.data = vec![CheatDataForm {
            action: "IDCLIP".to_string(),
            description: "walk through walls".to_string(),
        }];
        service.update_cheat(&changed, user).unwrap();

        let stored = service.get_cheat(cheat_id, user).unwrap();
        assert_eq!(stored.data.len(), 1);
        assert_eq!(stored.data[0].action, "IDCLIP");
    }

    #[test]
    fn test_duplicate_game_copies_cheats() {
        let service = service();
        let user = Uuid::new_v4();
        let game_id = service.add(&game_form("Doom"), user).unwrap();
        service.add_cheat(game_id, &cheat_form(), user).unwrap();

        let copy_id = service.duplicate(game_id, user).unwrap();

        let copied_cheats = service.list_cheats(copy_id, user).unwrap();
        assert_eq!(copied_cheats.len(), 1);
        assert_eq!(copied_cheats[0].data.len(), 1);
        assert_eq!(service.list_cheats(game_id, user).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_cheat_compacts_siblings() {
        let service = service();
        let user = Uuid::new_v4();
        let game_id = service.add(&game_form("Doom"), user).unwrap();
        let first = service.add_cheat(game_id, &cheat_form(), user).unwrap();
        service.add_cheat(game_id, &cheat_form(), user).unwrap();

        service.remove_cheat(first, user).unwrap();

        let cheats = service.list_cheats(game_id, user).unwrap();
        assert_eq!(cheats.len(), 1);
        assert_eq!(cheats[0].position, 0);
    }

    #[test]
    fn test_cheat_moves_swap_neighbors() {
        let service = service();
        let user = Uuid::new_v4();
        let game_id = service.add(&game_form("Doom"), user).unwrap();
        let first = service.add_cheat(game_id, &cheat_form(), user).unwrap();
        let second = service.add_cheat(game_id, &cheat_form(), user).unwrap();

        service.move_cheat_up(second, user).unwrap();

        let ids: Vec<Option<i64>> = service
            .list_cheats(game_id, user)
            .unwrap()
            .iter()
            .map(|cheat| cheat.id)
            .collect();
        assert_eq!(ids, vec![Some(second), Some(first)]);

        assert!(matches!(
            service.move_cheat_up(second, user),
            Err(AppError::NotMovable)
        ));
    }

    #[test]
    fn test_remove_game_takes_cheats_with_it() {
        let service = service();
        let user = Uuid::new_v4();
        let game_id = service.add(&game_form("Doom"), user).unwrap();
        let cheat_id = service.add_cheat(game_id, &cheat_form(), user).unwrap();

        service.remove(game_id, user).unwrap();

        assert!(matches!(
            service.get_cheat(cheat_id, user),
            Err(AppError::NotFound)
        ));
    }
}
