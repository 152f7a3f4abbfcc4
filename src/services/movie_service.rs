// src/services/movie_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Genre, Movie};
use crate::error::{AppError, AppResult};
use crate::forms::MovieForm;
use crate::repositories::{GenreRepository, MovieRepository, PictureRepository};
use crate::services::cache::ListCache;
use crate::services::{compact_positions, neighbor_swap, next_position};

/// Movies reference genres and an optional picture owned by the same
/// account; the form carries bare ids and this service resolves them.
pub struct MovieService {
    movies: Arc<dyn MovieRepository>,
    genres: Arc<dyn GenreRepository>,
    pictures: Arc<dyn PictureRepository>,
    cache: ListCache<Movie>,
}

impl MovieService {
    pub fn new(
        movies: Arc<dyn MovieRepository>,
        genres: Arc<dyn GenreRepository>,
        pictures: Arc<dyn PictureRepository>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            movies,
            genres,
            pictures,
            cache: ListCache::new(cache_capacity),
        }
    }

    pub fn list(&self, user: Uuid) -> AppResult<Vec<Movie>> {
        self.cache
            .get_or_load(user, || self.movies.find_all_by_user(user))
    }

    pub fn get(&self, id: i64, user: Uuid) -> AppResult<Movie> {
        self.movies
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add(&self, form: &MovieForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }

        let mut movie = form.to_record(self.resolve_genres(form.genre_ids(), user)?)?;
        self.check_picture(movie.picture, user)?;
        movie.position = next_position(&self.movies.find_all_by_user(user)?);

        let id = self.movies.add(&movie, user)?;
        self.cache.invalidate(user);
        log::info!("Added movie {id}");
        Ok(id)
    }

    pub fn update(&self, form: &MovieForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        self.get(id, user)?;

        let movie = form.to_record(self.resolve_genres(form.genre_ids(), user)?)?;
        self.check_picture(movie.picture, user)?;

        self.movies.update(&movie, user)?;
        self.cache.invalidate(user);
        Ok(())
    }

    pub fn remove(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.get(id, user)?;
        self.movies.delete(id)?;

        let remaining = self.movies.find_all_by_user(user)?;
        compact_positions(&remaining, |id, position| {
            self.movies.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        log::info!("Removed movie {id}");
        Ok(())
    }

    pub fn duplicate(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let movie = self.get(id, user)?;

        let mut copy = movie.duplicated();
        copy.position = next_position(&self.movies.find_all_by_user(user)?);

        let new_id = self.movies.add(&copy, user)?;
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
        let movies = self.movies.find_all_by_user(user)?;
        compact_positions(&movies, |id, position| {
            self.movies.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        Ok(())
    }

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

    fn swap_with_neighbor(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let movies = self.movies.find_all_by_user(user)?;
        for (id, position) in neighbor_swap(&movies, id, step)? {
            self.movies.update_position(id, position, user)?;
        }
        self.cache.invalidate(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database, ConnectionPool};
    use crate::domain::Time;
    use crate::forms::{GenreForm, TimeForm};
    use crate::repositories::{
        SqliteGenreRepository, SqliteMovieRepository, SqlitePictureRepository,
    };
    use crate::services::GenreService;

    fn setup() -> (MovieService, GenreService) {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        (movie_service(&pool), genre_service(&pool))
    }

    fn movie_service(pool: &Arc<ConnectionPool>) -> MovieService {
        MovieService::new(
            Arc::new(SqliteMovieRepository::new(pool.clone())),
            Arc::new(SqliteGenreRepository::new(pool.clone())),
            Arc::new(SqlitePictureRepository::new(pool.clone())),
            4,
        )
    }

    fn genre_service(pool: &Arc<ConnectionPool>) -> GenreService {
        GenreService::new(Arc::new(SqliteGenreRepository::new(pool.clone())), 4)
    }

    fn stored_genre(genres: &GenreService, user: Uuid, name: &str) -> i64 {
        let form = GenreForm {
            id: None,
            name: name.to_string(),
        };
        genres.add(&form, user).unwrap()
    }

    fn form(genres: Vec<i64>) -> MovieForm {
        MovieForm {
            czech_name: "Vetřelec".to_string(),
            original_name: "Alien".to_string(),
            year: "1979".to_string(),
            language: "EN".to_string(),
            subtitles: vec!["CZ".to_string()],
            media: vec![TimeForm::from_time(Time::from_parts(1, 57, 0))],
            imdb_code: "78748".to_string(),
            genres,
            ..MovieForm::default()
        }
    }

    #[test]
    fn test_add_resolves_genres_by_id() {
        let (movies, genres) = setup();
        let user = Uuid::new_v4();
        let horror = stored_genre(&genres, user, "Horror");
        let scifi = stored_genre(&genres, user, "Sci-fi");

        let id = movies.add(&form(vec![horror, scifi]), user).unwrap();

        let stored = movies.get(id, user).unwrap();
        let names: Vec<String> = stored.genres.into_iter().map(|g| g.name).collect();
        assert_eq!(names, ["Horror", "Sci-fi"]);
    }

    #[test]
    fn test_add_rejects_foreign_genre() {
        let (movies, genres) = setup();
        let user = Uuid::new_v4();
        let foreign = stored_genre(&genres, Uuid::new_v4(), "Horror");

        let err = movies.add(&form(vec![foreign]), user).unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[test]
    fn test_add_rejects_unknown_picture() {
        let (movies, genres) = setup();
        let user = Uuid::new_v4();
        let horror = stored_genre(&genres, user, "Horror");

        let mut stored = form(vec![horror]);
        stored.picture = Some(99);

        let err = movies.add(&stored, user).unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[test]
    fn test_update_keeps_position() {
        let (movies, genres) = setup();
        let user = Uuid::new_v4();
        let horror = stored_genre(&genres, user, "Horror");
        movies.add(&form(vec![horror]), user).unwrap();
        let id = movies.add(&form(vec![horror]), user).unwrap();

        let mut renamed = form(vec![horror]);
        renamed.id = Some(id);
        renamed.czech_name = "Vetřelec 2".to_string();
        movies.update(&renamed, user).unwrap();

        let stored = movies.get(id, user).unwrap();
        assert_eq!(stored.czech_name, "Vetřelec 2");
        assert_eq!(stored.position, 1);
    }

    #[test]
    fn test_duplicate_copies_media_and_genres() {
        let (movies, genres) = setup();
        let user = Uuid::new_v4();
        let horror = stored_genre(&genres, user, "Horror");
        let id = movies.add(&form(vec![horror]), user).unwrap();

        let copy_id = movies.duplicate(id, user).unwrap();

        let copy = movies.get(copy_id, user).unwrap();
        assert_eq!(copy.media.len(), 1);
        assert_eq!(copy.genres.len(), 1);
        assert_eq!(copy.position, 1);
        assert_eq!(copy.total_length(), Time::from_parts(1, 57, 0));
    }

    #[test]
    fn test_remove_compacts_positions() {
        let (movies, genres) = setup();
        let user = Uuid::new_v4();
        let horror = stored_genre(&genres, user, "Horror");
        let first = movies.add(&form(vec![horror]), user).unwrap();
        movies.add(&form(vec![horror]), user).unwrap();

        movies.remove(first, user).unwrap();

        let remaining = movies.list(user).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].position, 0);
    }

    #[test]
    fn test_moves_reorder_the_list() {
        let (movies, genres) = setup();
        let user = Uuid::new_v4();
        let horror = stored_genre(&genres, user, "Horror");

        let mut first = form(vec![horror]);
        first.czech_name = "První".to_string();
        let mut second = form(vec![horror]);
        second.czech_name = "Druhý".to_string();
        movies.add(&first, user).unwrap();
        let second_id = movies.add(&second, user).unwrap();

        movies.move_up(second_id, user).unwrap();

        let names: Vec<String> = movies
            .list(user)
            .unwrap()
            .into_iter()
            .map(|movie| movie.czech_name)
            .collect();
        assert_eq!(names, ["Druhý", "První"]);

        assert!(matches!(
            movies.move_up(second_id, user),
            Err(AppError::NotMovable)
        ));
    }
}
