// src/services/statistics_service.rs
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Time;
use crate::error::AppResult;
use crate::repositories::{
    CheatRepository, EpisodeRepository, GameRepository, GenreRepository, MovieRepository,
    MusicRepository, PictureRepository, ProgramRepository, SeasonRepository, ShowRepository,
    SongRepository,
};

/// Per-account totals across the whole catalog.
///
/// Counts cover every stored type; media totals sum the stored medium
/// rows (movies) or the declared media counts (games, music, programs);
/// lengths sum movie media, show episodes and album songs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub movie_count: usize,
    pub movie_media_count: usize,
    pub movie_length: Time,
    pub show_count: usize,
    pub season_count: usize,
    pub episode_count: usize,
    pub show_length: Time,
    pub game_count: usize,
    pub game_media_count: i64,
    pub cheat_count: usize,
    pub music_count: usize,
    pub music_media_count: i64,
    pub song_count: usize,
    pub music_length: Time,
    pub program_count: usize,
    pub program_media_count: i64,
    pub genre_count: usize,
    pub picture_count: usize,
}

pub struct StatisticsService {
    movies: Arc<dyn MovieRepository>,
    shows: Arc<dyn ShowRepository>,
    seasons: Arc<dyn SeasonRepository>,
    episodes: Arc<dyn EpisodeRepository>,
    games: Arc<dyn GameRepository>,
    cheats: Arc<dyn CheatRepository>,
    music: Arc<dyn MusicRepository>,
    songs: Arc<dyn SongRepository>,
    programs: Arc<dyn ProgramRepository>,
    genres: Arc<dyn GenreRepository>,
    pictures: Arc<dyn PictureRepository>,
}

impl StatisticsService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        movies: Arc<dyn MovieRepository>,
        shows: Arc<dyn ShowRepository>,
        seasons: Arc<dyn SeasonRepository>,
        episodes: Arc<dyn EpisodeRepository>,
        games: Arc<dyn GameRepository>,
        cheats: Arc<dyn CheatRepository>,
        music: Arc<dyn MusicRepository>,
        songs: Arc<dyn SongRepository>,
        programs: Arc<dyn ProgramRepository>,
        genres: Arc<dyn GenreRepository>,
        pictures: Arc<dyn PictureRepository>,
    ) -> Self {
        Self {
            movies,
            shows,
            seasons,
            episodes,
            games,
            cheats,
            music,
            songs,
            programs,
            genres,
            pictures,
        }
    }

    /// Walks the account's records and totals them up. Always computed
    /// fresh; nothing here is cached.
    pub fn summarize(&self, user: Uuid) -> AppResult<Statistics> {
        let mut stats = Statistics::default();

        let movies = self.movies.find_all_by_user(user)?;
        stats.movie_count = movies.len();
        for movie in &movies {
            stats.movie_media_count += movie.media.len();
            stats.movie_length = stats.movie_length + movie.total_length();
        }

        let shows = self.shows.find_all_by_user(user)?;
        stats.show_count = shows.len();
        for show in &shows {
            let Some(show_id) = show.id else { continue };
            for season in self.seasons.find_all_by_show_and_user(show_id, user)? {
                stats.season_count += 1;
                let Some(season_id) = season.id else { continue };
                for episode in self.episodes.find_all_by_season_and_user(season_id, user)? {
                    stats.episode_count += 1;
                    stats.show_length = stats.show_length + episode.length;
                }
            }
        }

        let games = self.games.find_all_by_user(user)?;
        stats.game_count = games.len();
        for game in &games {
            stats.game_media_count += i64::from(game.media_count);
            let Some(game_id) = game.id else { continue };
            stats.cheat_count += self.cheats.find_all_by_game_and_user(game_id, user)?.len();
        }

        let albums = self.music.find_all_by_user(user)?;
        stats.music_count = albums.len();
        for album in &albums {
            stats.music_media_count += i64::from(album.media_count);
            let Some(music_id) = album.id else { continue };
            for song in self.songs.find_all_by_music_and_user(music_id, user)? {
                stats.song_count += 1;
                stats.music_length = stats.music_length + song.length;
            }
        }

        let programs = self.programs.find_all_by_user(user)?;
        stats.program_count = programs.len();
        for program in &programs {
            stats.program_media_count += i64::from(program.media_count);
        }

        stats.genre_count = self.genres.find_all_by_user(user)?.len();
        stats.picture_count = self.pictures.find_all_by_user(user)?.len();

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database, ConnectionPool};
    use crate::domain::{
        Cheat, CheatData, Episode, Game, Genre, Language, Medium, Movie, Music, Picture, Program,
        ProgramFormat, Season, Show, Song,
    };
    use crate::repositories::{
        SqliteCheatRepository, SqliteEpisodeRepository, SqliteGameRepository,
        SqliteGenreRepository, SqliteMovieRepository, SqliteMusicRepository,
        SqlitePictureRepository, SqliteProgramRepository, SqliteSeasonRepository,
        SqliteShowRepository, SqliteSongRepository,
    };

    fn setup() -> (Arc<ConnectionPool>, StatisticsService) {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();

        let service = StatisticsService::new(
            Arc::new(SqliteMovieRepository::new(pool.clone())),
            Arc::new(SqliteShowRepository::new(pool.clone())),
            Arc::new(SqliteSeasonRepository::new(pool.clone())),
            Arc::new(SqliteEpisodeRepository::new(pool.clone())),
            Arc::new(SqliteGameRepository::new(pool.clone())),
            Arc::new(SqliteCheatRepository::new(pool.clone())),
            Arc::new(SqliteMusicRepository::new(pool.clone())),
            Arc::new(SqliteSongRepository::new(pool.clone())),
            Arc::new(SqliteProgramRepository::new(pool.clone())),
            Arc::new(SqliteGenreRepository::new(pool.clone())),
            Arc::new(SqlitePictureRepository::new(pool.clone())),
        );

        (pool, service)
    }

    fn seed_catalog(pool: &Arc<ConnectionPool>, user: Uuid) {
        SqliteGenreRepository::new(pool.clone())
            .add(
                &Genre {
                    id: None,
                    name: "Sci-fi".to_string(),
                    position: 0,
                    audit: None,
                },
                user,
            )
            .unwrap();

        SqlitePictureRepository::new(pool.clone())
            .add(
                &Picture {
                    id: None,
                    content: vec![1],
                    position: 0,
                    audit: None,
                },
                user,
            )
            .unwrap();

        SqliteMovieRepository::new(pool.clone())
            .add(
                &Movie {
                    id: None,
                    czech_name: "Vetřelec".to_string(),
                    original_name: "Alien".to_string(),
                    year: 1979,
                    language: Language::EN,
                    subtitles: Vec::new(),
                    media: vec![
                        Medium {
                            id: None,
                            number: 1,
                            length: Time::from_parts(1, 0, 0),
                        },
                        Medium {
                            id: None,
                            number: 2,
                            length: Time::from_parts(0, 57, 0),
                        },
                    ],
                    csfd: None,
                    imdb_code: None,
                    wiki_en: None,
                    wiki_cz: None,
                    picture: None,
                    note: None,
                    genres: Vec::new(),
                    position: 0,
                    audit: None,
                },
                user,
            )
            .unwrap();

        let show_id = SqliteShowRepository::new(pool.clone())
            .add(
                &Show {
                    id: None,
                    czech_name: "Červený trpaslík".to_string(),
                    original_name: "Red Dwarf".to_string(),
                    csfd: None,
                    imdb_code: None,
                    wiki_en: None,
                    wiki_cz: None,
                    picture: None,
                    note: None,
                    genres: Vec::new(),
                    position: 0,
                    audit: None,
                },
                user,
            )
            .unwrap();
        let season_id = SqliteSeasonRepository::new(pool.clone())
            .add(
                &Season {
                    id: None,
                    show_id,
                    number: 1,
                    start_year: 1988,
                    end_year: 1988,
                    language: Language::EN,
                    subtitles: Vec::new(),
                    note: None,
                    position: 0,
                    audit: None,
                },
                user,
            )
            .unwrap();
        let episodes = SqliteEpisodeRepository::new(pool.clone());
        for (number, name) in [(1, "The End"), (2, "Future Echoes")] {
            episodes
                .add(
                    &Episode {
                        id: None,
                        season_id,
                        number,
                        name: name.to_string(),
                        length: Time::from_parts(0, 28, 0),
                        note: None,
                        position: number - 1,
                        audit: None,
                    },
                    user,
                )
                .unwrap();
        }

        let game_id = SqliteGameRepository::new(pool.clone())
            .add(
                &Game {
                    id: None,
                    name: "Doom".to_string(),
                    wiki_en: None,
                    wiki_cz: None,
                    media_count: 2,
                    crack: false,
                    serial_key: false,
                    patch: false,
                    trainer: false,
                    trainer_data: false,
                    editor: false,
                    saves: false,
                    other_data: None,
                    note: None,
                    position: 0,
                    audit: None,
                },
                user,
            )
            .unwrap();
        SqliteCheatRepository::new(pool.clone())
            .add(
                &Cheat {
                    id: None,
                    game_id,
                    game_setting: "any".to_string(),
                    cheat_setting: "console".to_string(),
                    data: vec![CheatData {
                        id: None,
                        action: "IDDQD".to_string(),
                        description: "god mode".to_string(),
                        position: 0,
                    }],
                    position: 0,
                    audit: None,
                },
                user,
            )
            .unwrap();

        let music_id = SqliteMusicRepository::new(pool.clone())
            .add(
                &Music {
                    id: None,
                    name: "The Wall".to_string(),
                    wiki_en: None,
                    wiki_cz: None,
                    media_count: 2,
                    note: None,
                    position: 0,
                    audit: None,
                },
                user,
            )
            .unwrap();
        let songs = SqliteSongRepository::new(pool.clone());
        for (position, name) in [(0, "In the Flesh?"), (1, "The Thin Ice")] {
            songs
                .add(
                    &Song {
                        id: None,
                        music_id,
                        name: name.to_string(),
                        length: Time::from_parts(0, 3, 30),
                        note: None,
                        position,
                        audit: None,
                    },
                    user,
                )
                .unwrap();
        }

        SqliteProgramRepository::new(pool.clone())
            .add(
                &Program {
                    id: None,
                    name: "Turbo Pascal".to_string(),
                    wiki_en: None,
                    wiki_cz: None,
                    media_count: 1,
                    format: ProgramFormat::Iso,
                    crack: false,
                    serial_key: false,
                    other_data: None,
                    note: None,
                    position: 0,
                    audit: None,
                },
                user,
            )
            .unwrap();
    }

    #[test]
    fn test_summarize_totals_the_whole_catalog() {
        let (pool, service) = setup();
        let user = Uuid::new_v4();
        seed_catalog(&pool, user);

        let stats = service.summarize(user).unwrap();

        assert_eq!(stats.movie_count, 1);
        assert_eq!(stats.movie_media_count, 2);
        assert_eq!(stats.movie_length, Time::from_parts(1, 57, 0));
        assert_eq!(stats.show_count, 1);
        assert_eq!(stats.season_count, 1);
        assert_eq!(stats.episode_count, 2);
        assert_eq!(stats.show_length, Time::from_parts(0, 56, 0));
        assert_eq!(stats.game_count, 1);
        assert_eq!(stats.game_media_count, 2);
        assert_eq!(stats.cheat_count, 1);
        assert_eq!(stats.music_count, 1);
        assert_eq!(stats.music_media_count, 2);
        assert_eq!(stats.song_count, 2);
        assert_eq!(stats.music_length, Time::from_parts(0, 7, 0));
        assert_eq!(stats.program_count, 1);
        assert_eq!(stats.program_media_count, 1);
        assert_eq!(stats.genre_count, 1);
        assert_eq!(stats.picture_count, 1);
    }

    #[test]
    fn test_summarize_is_scoped_to_the_account() {
        let (pool, service) = setup();
        let owner = Uuid::new_v4();
        seed_catalog(&pool, owner);

        let stats = service.summarize(Uuid::new_v4()).unwrap();

        assert_eq!(stats, Statistics::default());
    }
}
