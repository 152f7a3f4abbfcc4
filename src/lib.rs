// src/lib.rs
// MediaShelf - personal media catalog core
//
// Architecture:
// - Domain-centric: records and their derived display labels live in `domain`
// - Form-driven: string-typed forms validate and convert at the user boundary
// - Account-scoped: every query carries the owning account; services enforce it
// - Local-first: one SQLite file under the user's data directory

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod forms;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Records
// ============================================================================

pub use domain::{
    imdb_label,
    // Accounts
    Account,
    // Audit metadata
    AuditStamp,
    CatalogRecord,
    Cheat,
    CheatData,
    Episode,
    // Games
    Game,
    Genre,
    Language,
    Medium,
    // Movies
    Movie,
    // Music
    Music,
    Picture,
    // Programs
    Program,
    ProgramFormat,
    Role,
    Season,
    // Shows
    Show,
    Song,
    // Value types
    Time,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Forms
// ============================================================================

pub use forms::{
    CheatDataForm, CheatForm, EpisodeForm, GameForm, GenreForm, MovieForm, MusicForm, ProgramForm,
    RegistrationForm, SeasonForm, ShowForm, SongForm, TimeForm, ValidationErrors,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{
    create_connection_pool, create_memory_pool, get_database_path, initialize_database,
    ConnectionPool,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    AccountRepository,
    CheatRepository,
    EpisodeRepository,
    GameRepository,
    GenreRepository,
    MovieRepository,
    MusicRepository,
    PictureRepository,
    ProgramRepository,
    SeasonRepository,
    ShowRepository,
    SongRepository,
    // SQLite implementations
    SqliteAccountRepository,
    SqliteCheatRepository,
    SqliteEpisodeRepository,
    SqliteGameRepository,
    SqliteGenreRepository,
    SqliteMovieRepository,
    SqliteMusicRepository,
    SqlitePictureRepository,
    SqliteProgramRepository,
    SqliteSeasonRepository,
    SqliteShowRepository,
    SqliteSongRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AccountService, GameService, GenreService, MovieService, MusicService, PictureService,
    ProgramService, ShowService, Statistics, StatisticsService,
};

// ============================================================================
// PUBLIC API - Wiring
// ============================================================================

pub use catalog::Catalog;
pub use config::Settings;
