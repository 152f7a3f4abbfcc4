// src/services/program_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Program;
use crate::error::{AppError, AppResult};
use crate::forms::ProgramForm;
use crate::repositories::ProgramRepository;
use crate::services::cache::ListCache;
use crate::services::{compact_positions, neighbor_swap, next_position};

pub struct ProgramService {
    repository: Arc<dyn ProgramRepository>,
    cache: ListCache<Program>,
}

impl ProgramService {
    pub fn new(repository: Arc<dyn ProgramRepository>, cache_capacity: usize) -> Self {
        Self {
            repository,
            cache: ListCache::new(cache_capacity),
        }
    }

    pub fn list(&self, user: Uuid) -> AppResult<Vec<Program>> {
        self.cache
            .get_or_load(user, || self.repository.find_all_by_user(user))
    }

    pub fn get(&self, id: i64, user: Uuid) -> AppResult<Program> {
        self.repository
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add(&self, form: &ProgramForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }

        let mut program = form.to_record()?;
        program.position = next_position(&self.repository.find_all_by_user(user)?);

        let id = self.repository.add(&program, user)?;
        self.cache.invalidate(user);
        log::info!("Added program {id}");
        Ok(id)
    }

    pub fn update(&self, form: &ProgramForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        self.get(id, user)?;

        let program = form.to_record()?;
        self.repository.update(&program, user)?;
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
        log::info!("Removed program {id}");
        Ok(())
    }

    pub fn duplicate(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let program = self.get(id, user)?;

        let mut copy = program.duplicated();
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
        let programs = self.repository.find_all_by_user(user)?;
        compact_positions(&programs, |id, position| {
            self.repository.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        Ok(())
    }

    fn swap_with_neighbor(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let programs = self.repository.find_all_by_user(user)?;
        for (id, position) in neighbor_swap(&programs, id, step)? {
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
    use crate::domain::ProgramFormat;
    use crate::repositories::SqliteProgramRepository;

    fn service() -> ProgramService {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        ProgramService::new(Arc::new(SqliteProgramRepository::new(pool)), 4)
    }

    fn form(name: &str) -> ProgramForm {
        ProgramForm {
            name: name.to_string(),
            media_count: "1".to_string(),
            format: "ISO".to_string(),
            ..ProgramForm::default()
        }
    }

    #[test]
    fn test_add_and_get_program() {
        let service = service();
        let user = Uuid::new_v4();

        let id = service.add(&form("Turbo Pascal"), user).unwrap();

        let stored = service.get(id, user).unwrap();
        assert_eq!(stored.name, "Turbo Pascal");
        assert_eq!(stored.format, ProgramFormat::Iso);
        assert_eq!(stored.position, 0);
    }

    #[test]
    fn test_add_rejects_unknown_format() {
        let service = service();

        let mut invalid = form("Turbo Pascal");
        invalid.format = "FLOPPY".to_string();

        let err = service.add(&invalid, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_update_requires_stored_id() {
        let service = service();
        let user = Uuid::new_v4();

        let err = service.update(&form("Turbo Pascal"), user).unwrap_err();
        assert!(matches!(err, AppError::FormContract("id")));
    }

    #[test]
    fn test_duplicate_and_reorder() {
        let service = service();
        let user = Uuid::new_v4();
        let id = service.add(&form("Turbo Pascal"), user).unwrap();

        let copy_id = service.duplicate(id, user).unwrap();
        service.move_up(copy_id, user).unwrap();

        let programs = service.list(user).unwrap();
        assert_eq!(programs[0].id, Some(copy_id));
        assert_eq!(programs[1].id, Some(id));
    }
}
