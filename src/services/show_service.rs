// src/services/show_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Episode, Genre, Season, Show};
use crate::error::{AppError, AppResult};
use crate::forms::{EpisodeForm, SeasonForm, ShowForm};
use crate::repositories::{
    EpisodeRepository, GenreRepository, PictureRepository, SeasonRepository, ShowRepository,
};
use crate::services::cache::ListCache;
use crate::services::{compact_positions, neighbor_swap, next_position};

/// Shows with their seasons and episodes. Child records are reached
/// through this service; they have no facade of their own. Only the root
/// show list is cached, season and episode reads go to the repositories.
pub struct ShowService {
    shows: Arc<dyn ShowRepository>,
    seasons: Arc<dyn SeasonRepository>,
    episodes: Arc<dyn EpisodeRepository>,
    genres: Arc<dyn GenreRepository>,
    pictures: Arc<dyn PictureRepository>,
    cache: ListCache<Show>,
}

impl ShowService {
    pub fn new(
        shows: Arc<dyn ShowRepository>,
        seasons: Arc<dyn SeasonRepository>,
        episodes: Arc<dyn EpisodeRepository>,
        genres: Arc<dyn GenreRepository>,
        pictures: Arc<dyn PictureRepository>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            shows,
            seasons,
            episodes,
            genres,
            pictures,
            cache: ListCache::new(cache_capacity),
        }
    }

    // ========================================================================
    // SHOWS
    // ========================================================================

    pub fn list(&self, user: Uuid) -> AppResult<Vec<Show>> {
        self.cache
            .get_or_load(user, || self.shows.find_all_by_user(user))
    }

    pub fn get(&self, id: i64, user: Uuid) -> AppResult<Show> {
        self.shows
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add(&self, form: &ShowForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }

        let mut show = form.to_record(self.resolve_genres(form.genre_ids(), user)?)?;
        self.check_picture(show.picture, user)?;
        show.position = next_position(&self.shows.find_all_by_user(user)?);

        let id = self.shows.add(&show, user)?;
        self.cache.invalidate(user);
        log::info!("Added show {id}");
        Ok(id)
    }

    pub fn update(&self, form: &ShowForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        self.get(id, user)?;

        let show = form.to_record(self.resolve_genres(form.genre_ids(), user)?)?;
        self.check_picture(show.picture, user)?;

        self.shows.update(&show, user)?;
        self.cache.invalidate(user);
        Ok(())
    }

    pub fn remove(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.get(id, user)?;
        self.shows.delete(id)?;

        let remaining = self.shows.find_all_by_user(user)?;
        compact_positions(&remaining, |id, position| {
            self.shows.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        log::info!("Removed show {id}");
        Ok(())
    }

    /// Copies the show together with all its seasons and their episodes.
    pub fn duplicate(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let show = self.get(id, user)?;

        let mut copy = show.duplicated();
        copy.position = next_position(&self.shows.find_all_by_user(user)?);
        let new_id = self.shows.add(&copy, user)?;

        for season in self.seasons.find_all_by_show_and_user(id, user)? {
            self.copy_season(&season, new_id, season.position, user)?;
        }

        self.cache.invalidate(user);
        Ok(new_id)
    }

    pub fn move_up(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_shows(id, -1, user)
    }

    pub fn move_down(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_shows(id, 1, user)
    }

    pub fn update_positions(&self, user: Uuid) -> AppResult<()> {
        let shows = self.shows.find_all_by_user(user)?;
        compact_positions(&shows, |id, position| {
            self.shows.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        Ok(())
    }

    // ========================================================================
    // SEASONS
    // ========================================================================

    pub fn list_seasons(&self, show_id: i64, user: Uuid) -> AppResult<Vec<Season>> {
        self.get(show_id, user)?;
        self.seasons.find_all_by_show_and_user(show_id, user)
    }

    pub fn get_season(&self, id: i64, user: Uuid) -> AppResult<Season> {
        self.seasons
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add_season(&self, show_id: i64, form: &SeasonForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }
        self.get(show_id, user)?;

        let mut season = form.to_record(show_id)?;
        season.position = next_position(&self.seasons.find_all_by_show_and_user(show_id, user)?);

        self.seasons.add(&season, user)
    }

    pub fn update_season(&self, form: &SeasonForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        let existing = self.get_season(id, user)?;

        let season = form.to_record(existing.show_id)?;
        self.seasons.update(&season, user)
    }

    pub fn remove_season(&self, id: i64, user: Uuid) -> AppResult<()> {
        let season = self.get_season(id, user)?;
        self.seasons.delete(id)?;

        let siblings = self
            .seasons
            .find_all_by_show_and_user(season.show_id, user)?;
        compact_positions(&siblings, |id, position| {
            self.seasons.update_position(id, position, user)
        })
    }

    /// Copies the season with its episodes, appended after its siblings.
    pub fn duplicate_season(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let season = self.get_season(id, user)?;
        let position = next_position(
            &self
                .seasons
                .find_all_by_show_and_user(season.show_id, user)?,
        );

        self.copy_season(&season, season.show_id, position, user)
    }

    pub fn move_season_up(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_seasons(id, -1, user)
    }

    pub fn move_season_down(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_seasons(id, 1, user)
    }

    pub fn update_season_positions(&self, show_id: i64, user: Uuid) -> AppResult<()> {
        let seasons = self.seasons.find_all_by_show_and_user(show_id, user)?;
        compact_positions(&seasons, |id, position| {
            self.seasons.update_position(id, position, user)
        })
    }

    // ========================================================================
    // EPISODES
    // ========================================================================

    pub fn list_episodes(&self, season_id: i64, user: Uuid) -> AppResult<Vec<Episode>> {
        self.get_season(season_id, user)?;
        self.episodes.find_all_by_season_and_user(season_id, user)
    }

    pub fn get_episode(&self, id: i64, user: Uuid) -> AppResult<Episode> {
        self.episodes
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add_episode(&self, season_id: i64, form: &EpisodeForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }
        self.get_season(season_id, user)?;

        let mut episode = form.to_record(season_id)?;
        episode.position =
            next_position(&self.episodes.find_all_by_season_and_user(season_id, user)?);

        self.episodes.add(&episode, user)
    }

    pub fn update_episode(&self, form: &EpisodeForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        let existing = self.get_episode(id, user)?;

        let episode = form.to_record(existing.season_id)?;
        self.episodes.update(&episode, user)
    }

    pub fn remove_episode(&self, id: i64, user: Uuid) -> AppResult<()> {
        let episode = self.get_episode(id, user)?;
        self.episodes.delete(id)?;

        let siblings = self
            .episodes
            .find_all_by_season_and_user(episode.season_id, user)?;
        compact_positions(&siblings, |id, position| {
            self.episodes.update_position(id, position, user)
        })
    }

    pub fn duplicate_episode(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let episode = self.get_episode(id, user)?;

        let mut copy = episode.duplicated();
        copy.position = next_position(
            &self
                .episodes
                .find_all_by_season_and_user(episode.season_id, user)?,
        );

        self.episodes.add(&copy, user)
    }

    pub fn move_episode_up(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_episodes(id, -1, user)
    }

    pub fn move_episode_down(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_episodes(id, 1, user)
    }

    pub fn update_episode_positions(&self, season_id: i64, user: Uuid) -> AppResult<()> {
        let episodes = self.episodes.find_all_by_season_and_user(season_id, user)?;
        compact_positions(&episodes, |id, position| {
            self.episodes.update_position(id, position, user)
        })
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn resolve_genres(&self, ids: &[i64], user: Uuid) -> AppResult<Vec<Genre>> {
        ids.iter()
            .map(|&id| {
                self.genres
                    .find_by_id_and_user(id, user)?
                    .ok_or(AppError::NotFound)
            })
            .collect()
    }

    fn check_picture(&self, picture: Option<i64>, user: Uuid) -> AppResult<()> {
        if let Some(id) = picture {
            self.pictures
                .find_by_id_and_user(id, user)?
                .ok_or(AppError::NotFound)?;
        }
        Ok(())
    }

    /// Stores a detached copy of `season` under `show_id` and copies its
    /// episodes across.
    fn copy_season(
        &self,
        season: &Season,
        show_id: i64,
        position: i32,
        user: Uuid,
    ) -> AppResult<i64> {
        let season_id = season.id.ok_or(AppError::NotFound)?;

        let mut copy = season.duplicated();
        copy.show_id = show_id;
        copy.position = position;
        let new_id = self.seasons.add(&copy, user)?;

        for episode in self.episodes.find_all_by_season_and_user(season_id, user)? {
            let mut episode_copy = episode.duplicated();
            episode_copy.season_id = new_id;
            self.episodes.add(&episode_copy, user)?;
        }

        Ok(new_id)
    }

    fn swap_shows(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let shows = self.shows.find_all_by_user(user)?;
        for (id, position) in neighbor_swap(&shows, id, step)? {
            self.shows.update_position(id, position, user)?;
        }
        self.cache.invalidate(user);
        Ok(())
    }

    fn swap_seasons(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let season = self.get_season(id, user)?;
        let siblings = self
            .seasons
            .find_all_by_show_and_user(season.show_id, user)?;
        for (id, position) in neighbor_swap(&siblings, id, step)? {
            self.seasons.update_position(id, position, user)?;
        }
        Ok(())
    }

    fn swap_episodes(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let episode = self.get_episode(id, user)?;
        let siblings = self
            .episodes
            .find_all_by_season_and_user(episode.season_id, user)?;
        for (id, position) in neighbor_swap(&siblings, id, step)? {
            self.episodes.update_position(id, position, user)?;
        }
        Ok(())
    }
}
