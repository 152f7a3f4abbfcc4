// src/services/genre_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Genre;
use crate::error::{AppError, AppResult};
use crate::forms::GenreForm;
use crate::repositories::GenreRepository;
use crate::services::cache::ListCache;
use crate::services::{compact_positions, neighbor_swap, next_position};

pub struct GenreService {
    repository: Arc<dyn GenreRepository>,
    cache: ListCache<Genre>,
}

impl GenreService {
    pub fn new(repository: Arc<dyn GenreRepository>, cache_capacity: usize) -> Self {
        Self {
            repository,
            cache: ListCache::new(cache_capacity),
        }
    }

    pub fn list(&self, user: Uuid) -> AppResult<Vec<Genre>> {
        self.cache
            .get_or_load(user, || self.repository.find_all_by_user(user))
    }

    pub fn get(&self, id: i64, user: Uuid) -> AppResult<Genre> {
        self.repository
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add(&self, form: &GenreForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }

        let mut genre = form.to_record()?;
        genre.position = next_position(&self.repository.find_all_by_user(user)?);

        let id = self.repository.add(&genre, user)?;
        self.cache.invalidate(user);
        log::info!("Added genre {id}");
        Ok(id)
    }

    pub fn update(&self, form: &GenreForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        self.get(id, user)?;

        let genre = form.to_record()?;
        self.repository.update(&genre, user)?;
        self.cache.invalidate(user);
        Ok(())
    }

    pub fn remove(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.get(id, user)?;
        self.repository.delete(id)?;

        let remaining = self.repository.find_all_by_user(user)?;
        compact_positions(&remaining, |id, position| {
            self.repository.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        log::info!("Removed genre {id}");
        Ok(())
    }

    pub fn duplicate(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let genre = self.get(id, user)?;

        let mut copy = genre.duplicated();
        copy.position = next_position(&self.repository.find_all_by_user(user)?);

        let new_id = self.repository.add(&copy, user)?;
        self.cache.invalidate(user);
        Ok(new_id)
    }

    pub fn move_up(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_with_neighbor(id, -1, user)
    }

    pub fn move_down(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_with_neighbor(id, 1, user)
    }

    pub fn update_positions(&self, user: Uuid) -> AppResult<()> {
        let genres = self.repository.find_all_by_user(user)?;
        compact_positions(&genres, |id, position| {
            self.repository.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        Ok(())
    }

    fn swap_with_neighbor(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let genres = self.repository.find_all_by_user(user)?;
        for (id, position) in neighbor_swap(&genres, id, step)? {
            self.repository.update_position(id, position, user)?;
        }
        self.cache.invalidate(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};
    use crate::repositories::genre_repository::{MockGenreRepository, SqliteGenreRepository};

    fn service() -> GenreService {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        GenreService::new(Arc::new(SqliteGenreRepository::new(pool)), 4)
    }

    fn form(name: &str) -> GenreForm {
        GenreForm {
            id: None,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_added_genres_take_consecutive_positions() {
        let service = service();
        let user = Uuid::new_v4();

        service.add(&form("Action"), user).unwrap();
        service.add(&form("Comedy"), user).unwrap();

        let genres = service.list(user).unwrap();
        assert_eq!(genres[0].position, 0);
        assert_eq!(genres[1].position, 1);
    }

    #[test]
    fn test_add_rejects_invalid_form() {
        let service = service();
        let user = Uuid::new_v4();

        let err = service.add(&form(""), user).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_add_rejects_form_with_id() {
        let service = service();
        let user = Uuid::new_v4();

        let mut stored = form("Action");
        stored.id = Some(1);

        let err = service.add(&stored, user).unwrap_err();
        assert!(matches!(err, AppError::FormContract("id")));
    }

    #[test]
    fn test_update_requires_ownership() {
        let service = service();
        let user = Uuid::new_v4();
        let id = service.add(&form("Action"), user).unwrap();

        let mut renamed = form("Adventure");
        renamed.id = Some(id);

        let err = service.update(&renamed, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        service.update(&renamed, user).unwrap();
        assert_eq!(service.get(id, user).unwrap().name, "Adventure");
    }

    #[test]
    fn test_remove_compacts_positions() {
        let service = service();
        let user = Uuid::new_v4();
        service.add(&form("Action"), user).unwrap();
        let middle = service.add(&form("Comedy"), user).unwrap();
        service.add(&form("Drama"), user).unwrap();

        service.remove(middle, user).unwrap();

        let positions: Vec<i32> = service
            .list(user)
            .unwrap()
            .iter()
            .map(|genre| genre.position)
            .collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn test_duplicate_appends_copy() {
        let service = service();
        let user = Uuid::new_v4();
        let id = service.add(&form("Action"), user).unwrap();

        let copy_id = service.duplicate(id, user).unwrap();
        assert_ne!(copy_id, id);

        let genres = service.list(user).unwrap();
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[1].name, "Action");
        assert_eq!(genres[1].position, 1);
    }

    #[test]
    fn test_moves_swap_neighbors_and_fail_at_edges() {
        let service = service();
        let user = Uuid::new_v4();
        let first = service.add(&form("Action"), user).unwrap();
        let second = service.add(&form("Comedy"), user).unwrap();

        assert!(matches!(
            service.move_up(first, user),
            Err(AppError::NotMovable)
        ));

        service.move_up(second, user).unwrap();
        let names: Vec<String> = service
            .list(user)
            .unwrap()
            .into_iter()
            .map(|genre| genre.name)
            .collect();
        assert_eq!(names, vec!["Comedy", "Action"]);
    }

    #[test]
    fn test_list_serves_second_read_from_cache() {
        let user = Uuid::new_v4();
        let mut repository = MockGenreRepository::new();
        repository
            .expect_find_all_by_user()
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = GenreService::new(Arc::new(repository), 4);
        service.list(user).unwrap();
        service.list(user).unwrap();
    }

    #[test]
    fn test_mutation_invalidates_only_that_account() {
        let service = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        service.add(&form("Action"), alice).unwrap();
        service.add(&form("Comedy"), bob).unwrap();
        assert_eq!(service.list(alice).unwrap().len(), 1);
        assert_eq!(service.list(bob).unwrap().len(), 1);

        service.add(&form("Drama"), alice).unwrap();
        assert_eq!(service.list(alice).unwrap().len(), 2);
        assert_eq!(service.list(bob).unwrap().len(), 1);
    }
}
