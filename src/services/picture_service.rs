// src/services/picture_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Picture;
use crate::error::{AppError, AppResult};
use crate::forms::ValidationErrors;
use crate::repositories::PictureRepository;
use crate::services::cache::ListCache;
use crate::services::{compact_positions, neighbor_swap, next_position};

/// Stored cover images. Pictures have no form type: callers hand over the
/// raw upload bytes and everything else is derived here.
pub struct PictureService {
    repository: Arc<dyn PictureRepository>,
    cache: ListCache<Picture>,
}

impl PictureService {
    pub fn new(repository: Arc<dyn PictureRepository>, cache_capacity: usize) -> Self {
        Self {
            repository,
            cache: ListCache::new(cache_capacity),
        }
    }

    pub fn list(&self, user: Uuid) -> AppResult<Vec<Picture>> {
        self.cache
            .get_or_load(user, || self.repository.find_all_by_user(user))
    }

    pub fn get(&self, id: i64, user: Uuid) -> AppResult<Picture> {
        self.repository
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add(&self, content: Vec<u8>, user: Uuid) -> AppResult<i64> {
        validate_content(&content)?;

        let picture = Picture {
            id: None,
            content,
            position: next_position(&self.repository.find_all_by_user(user)?),
            audit: None,
        };

        let id = self.repository.add(&picture, user)?;
        self.cache.invalidate(user);
        log::info!("Added picture {id}");
        Ok(id)
    }

    pub fn update(&self, id: i64, content: Vec<u8>, user: Uuid) -> AppResult<()> {
        validate_content(&content)?;
        let mut picture = self.get(id, user)?;
        picture.content = content;

        self.repository.update(&picture, user)?;
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
        log::info!("Removed picture {id}");
        Ok(())
    }

    pub fn duplicate(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let picture = self.get(id, user)?;

        let mut copy = picture.duplicated();
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
        let pictures = self.repository.find_all_by_user(user)?;
        compact_positions(&pictures, |id, position| {
            self.repository.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        Ok(())
    }

    fn swap_with_neighbor(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let pictures = self.repository.find_all_by_user(user)?;
        for (id, position) in neighbor_swap(&pictures, id, step)? {
            self.repository.update_position(id, position, user)?;
        }
        self.cache.invalidate(user);
        Ok(())
    }
}

fn validate_content(content: &[u8]) -> AppResult<()> {
    let mut errors = ValidationErrors::new();
    if content.is_empty() {
        errors.add("content", "must not be empty");
    }
    errors.into_result()
}
