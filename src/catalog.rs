// src/catalog.rs
use std::sync::Arc;

use crate::config::Settings;
use crate::db::{
    create_connection_pool, create_memory_pool, get_database_path, initialize_database,
    ConnectionPool,
};
use crate::error::AppResult;
use crate::repositories::{
    AccountRepository, CheatRepository, EpisodeRepository, GameRepository, GenreRepository,
    MovieRepository, MusicRepository, PictureRepository, ProgramRepository, SeasonRepository,
    ShowRepository, SongRepository, SqliteAccountRepository, SqliteCheatRepository,
    SqliteEpisodeRepository, SqliteGameRepository, SqliteGenreRepository, SqliteMovieRepository,
    SqliteMusicRepository, SqlitePictureRepository, SqliteProgramRepository,
    SqliteSeasonRepository, SqliteShowRepository, SqliteSongRepository,
};
use crate::services::{
    AccountService, GameService, GenreService, MovieService, MusicService, PictureService,
    ProgramService, ShowService, StatisticsService,
};

/// The wired catalog: one service per shelf, all sharing a single
/// connection pool. Fields are Arc-wrapped so callers can hand a
/// service to another thread without cloning the catalog itself.
pub struct Catalog {
    pub movies: Arc<MovieService>,
    pub shows: Arc<ShowService>,
    pub games: Arc<GameService>,
    pub music: Arc<MusicService>,
    pub programs: Arc<ProgramService>,
    pub genres: Arc<GenreService>,
    pub pictures: Arc<PictureService>,
    pub accounts: Arc<AccountService>,
    pub statistics: Arc<StatisticsService>,
}

impl Catalog {
    /// Opens (creating if needed) the database named by `settings` and
    /// wires every repository and service on top of it.
    pub fn open(settings: &Settings) -> AppResult<Catalog> {
        let db_path = match &settings.database_path {
            Some(path) => path.clone(),
            None => get_database_path()?,
        };
        let pool = Arc::new(create_connection_pool(&db_path)?);

        // Apply schema (idempotent)
        {
            let conn = pool.get()?;
            initialize_database(&conn)?;
        }

        Ok(Catalog::wire(pool, settings.cache_capacity))
    }

    /// Opens a catalog backed by an in-memory database. Nothing
    /// survives the catalog being dropped.
    pub fn open_in_memory() -> AppResult<Catalog> {
        let pool = Arc::new(create_memory_pool()?);

        {
            let conn = pool.get()?;
            initialize_database(&conn)?;
        }

        Ok(Catalog::wire(pool, Settings::default().cache_capacity))
    }

    fn wire(pool: Arc<ConnectionPool>, cache_capacity: usize) -> Catalog {
        // 1. REPOSITORIES
        // The type `Arc<dyn Trait>` is used to match the service
        // constructor signatures exactly.
        let movie_repo: Arc<dyn MovieRepository> =
            Arc::new(SqliteMovieRepository::new(pool.clone()));
        let show_repo: Arc<dyn ShowRepository> = Arc::new(SqliteShowRepository::new(pool.clone()));
        let season_repo: Arc<dyn SeasonRepository> =
            Arc::new(SqliteSeasonRepository::new(pool.clone()));
        let episode_repo: Arc<dyn EpisodeRepository> =
            Arc::new(SqliteEpisodeRepository::new(pool.clone()));
        let game_repo: Arc<dyn GameRepository> = Arc::new(SqliteGameRepository::new(pool.clone()));
        let cheat_repo: Arc<dyn CheatRepository> =
            Arc::new(SqliteCheatRepository::new(pool.clone()));
        let music_repo: Arc<dyn MusicRepository> =
            Arc::new(SqliteMusicRepository::new(pool.clone()));
        let song_repo: Arc<dyn SongRepository> = Arc::new(SqliteSongRepository::new(pool.clone()));
        let program_repo: Arc<dyn ProgramRepository> =
            Arc::new(SqliteProgramRepository::new(pool.clone()));
        let genre_repo: Arc<dyn GenreRepository> =
            Arc::new(SqliteGenreRepository::new(pool.clone()));
        let picture_repo: Arc<dyn PictureRepository> =
            Arc::new(SqlitePictureRepository::new(pool.clone()));
        let account_repo: Arc<dyn AccountRepository> =
            Arc::new(SqliteAccountRepository::new(pool.clone()));

        // 2. SERVICES
        let movies = Arc::new(MovieService::new(
            movie_repo.clone(),
            genre_repo.clone(),
            picture_repo.clone(),
            cache_capacity,
        ));
        let shows = Arc::new(ShowService::new(
            show_repo.clone(),
            season_repo.clone(),
            episode_repo.clone(),
            genre_repo.clone(),
            picture_repo.clone(),
            cache_capacity,
        ));
        let games = Arc::new(GameService::new(
            game_repo.clone(),
            cheat_repo.clone(),
            cache_capacity,
        ));
        let music = Arc::new(MusicService::new(
            music_repo.clone(),
            song_repo.clone(),
            cache_capacity,
        ));
        let programs = Arc::new(ProgramService::new(program_repo.clone(), cache_capacity));
        let genres = Arc::new(GenreService::new(genre_repo.clone(), cache_capacity));
        let pictures = Arc::new(PictureService::new(picture_repo.clone(), cache_capacity));
        let accounts = Arc::new(AccountService::new(account_repo));
        let statistics = Arc::new(StatisticsService::new(
            movie_repo,
            show_repo,
            season_repo,
            episode_repo,
            game_repo,
            cheat_repo,
            music_repo,
            song_repo,
            program_repo,
            genre_repo,
            picture_repo,
        ));

        Catalog {
            movies,
            shows,
            games,
            music,
            programs,
            genres,
            pictures,
            accounts,
            statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{GenreForm, RegistrationForm};
    use uuid::Uuid;

    #[test]
    fn test_open_in_memory_serves_a_round_trip() {
        let catalog = Catalog::open_in_memory().unwrap();
        let user = Uuid::new_v4();

        let form = GenreForm {
            id: None,
            name: "Jazz".to_string(),
        };
        let id = catalog.genres.add(&form, user).unwrap();

        let listed = catalog.genres.list(user).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, Some(id));

        let stats = catalog.statistics.summarize(user).unwrap();
        assert_eq!(stats.genre_count, 1);
    }

    #[test]
    fn test_accounts_register_and_authenticate_through_the_catalog() {
        let catalog = Catalog::open_in_memory().unwrap();

        let form = RegistrationForm {
            username: "frodo".to_string(),
            password: "second breakfast".to_string(),
            confirm_password: "second breakfast".to_string(),
        };
        let registered = catalog.accounts.register(&form).unwrap();

        let authenticated = catalog
            .accounts
            .authenticate("frodo", "second breakfast")
            .unwrap();
        assert_eq!(authenticated.uuid, registered.uuid);
    }
}
