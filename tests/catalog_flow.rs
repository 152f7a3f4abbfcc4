use mediashelf::{
    AppError, Catalog, CheatDataForm, CheatForm, EpisodeForm, GameForm, GenreForm, MovieForm,
    RegistrationForm, SeasonForm, Settings, ShowForm, TimeForm,
};
use uuid::Uuid;

fn genre_form(name: &str) -> GenreForm {
    GenreForm {
        id: None,
        name: name.to_string(),
    }
}

fn movie_form(czech: &str, original: &str, genres: Vec<i64>) -> MovieForm {
    MovieForm {
        czech_name: czech.to_string(),
        original_name: original.to_string(),
        year: "1979".to_string(),
        language: "EN".to_string(),
        subtitles: vec!["CZ".to_string()],
        media: vec![TimeForm {
            hours: "1".to_string(),
            minutes: "57".to_string(),
            seconds: "0".to_string(),
        }],
        imdb_code: "78748".to_string(),
        genres,
        ..MovieForm::default()
    }
}

fn show_form(czech: &str, original: &str, genres: Vec<i64>) -> ShowForm {
    ShowForm {
        czech_name: czech.to_string(),
        original_name: original.to_string(),
        genres,
        ..ShowForm::default()
    }
}

fn season_form(number: u32) -> SeasonForm {
    SeasonForm {
        number: number.to_string(),
        start_year: "1993".to_string(),
        end_year: "1994".to_string(),
        language: "EN".to_string(),
        subtitles: vec!["CZ".to_string()],
        ..SeasonForm::default()
    }
}

fn episode_form(number: u32, name: &str) -> EpisodeForm {
    EpisodeForm {
        number: number.to_string(),
        name: name.to_string(),
        length: TimeForm {
            hours: "0".to_string(),
            minutes: "45".to_string(),
            seconds: "0".to_string(),
        },
        ..EpisodeForm::default()
    }
}

#[test]
fn test_movie_shelf_round_trip() {
    let catalog = Catalog::open_in_memory().unwrap();
    let user = Uuid::new_v4();

    let genre_id = catalog.genres.add(&genre_form("Sci-fi"), user).unwrap();
    let picture_id = catalog.pictures.add(vec![0xFF, 0xD8], user).unwrap();

    let mut form = movie_form("Vetřelec", "Alien", vec![genre_id]);
    form.picture = Some(picture_id);
    let alien = catalog.movies.add(&form, user).unwrap();
    let second = catalog
        .movies
        .add(&movie_form("Vetřelci", "Aliens", vec![genre_id]), user)
        .unwrap();

    let listed = catalog.movies.list(user).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, Some(alien));
    assert_eq!(listed[0].genres[0].name, "Sci-fi");
    assert_eq!(listed[0].imdb_label(), Some("tt0078748".to_string()));

    // Edit through the same form the UI would post back.
    let mut edit = MovieForm::from_record(&listed[1]);
    edit.year = "1986".to_string();
    catalog.movies.update(&edit, user).unwrap();
    assert_eq!(catalog.movies.get(second, user).unwrap().year, 1986);

    // Reorder, then duplicate the head of the list.
    catalog.movies.move_down(alien, user).unwrap();
    let reordered = catalog.movies.list(user).unwrap();
    assert_eq!(reordered[0].id, Some(second));

    let copy = catalog.movies.duplicate(alien, user).unwrap();
    assert_eq!(catalog.movies.list(user).unwrap().len(), 3);
    let copied = catalog.movies.get(copy, user).unwrap();
    assert_eq!(copied.original_name, "Alien");
    assert_eq!(copied.media.len(), 1);

    // Removal closes the position gap.
    catalog.movies.remove(second, user).unwrap();
    let remaining = catalog.movies.list(user).unwrap();
    assert_eq!(remaining.len(), 2);
    let positions: Vec<i32> = remaining.iter().map(|movie| movie.position).collect();
    assert_eq!(positions, vec![0, 1]);
}

#[test]
fn test_show_hierarchy_survives_duplication_and_cascade() {
    let catalog = Catalog::open_in_memory().unwrap();
    let user = Uuid::new_v4();

    let genre_id = catalog.genres.add(&genre_form("Mystery"), user).unwrap();
    let show = catalog
        .shows
        .add(&show_form("Akta X", "The X-Files", vec![genre_id]), user)
        .unwrap();

    let season_one = catalog.shows.add_season(show, &season_form(1), user).unwrap();
    catalog.shows.add_season(show, &season_form(2), user).unwrap();
    catalog
        .shows
        .add_episode(season_one, &episode_form(1, "Pilot"), user)
        .unwrap();
    catalog
        .shows
        .add_episode(season_one, &episode_form(2, "Deep Throat"), user)
        .unwrap();

    // Duplicating the show deep-copies seasons and episodes.
    let copy = catalog.shows.duplicate(show, user).unwrap();
    let copied_seasons = catalog.shows.list_seasons(copy, user).unwrap();
    assert_eq!(copied_seasons.len(), 2);
    let copied_episodes = catalog
        .shows
        .list_episodes(copied_seasons[0].id.unwrap(), user)
        .unwrap();
    assert_eq!(copied_episodes.len(), 2);
    assert_eq!(copied_episodes[0].name, "Pilot");

    let stats = catalog.statistics.summarize(user).unwrap();
    assert_eq!(stats.show_count, 2);
    assert_eq!(stats.season_count, 4);
    assert_eq!(stats.episode_count, 4);

    // Removing the original takes its children with it, the copy stays.
    catalog.shows.remove(show, user).unwrap();
    let stats = catalog.statistics.summarize(user).unwrap();
    assert_eq!(stats.show_count, 1);
    assert_eq!(stats.season_count, 2);
    assert_eq!(stats.episode_count, 2);
}

#[test]
fn test_game_cheats_follow_their_game() {
    let catalog = Catalog::open_in_memory().unwrap();
    let user = Uuid::new_v4();

    let game = catalog
        .games
        .add(
            &GameForm {
                name: "Doom".to_string(),
                media_count: "4".to_string(),
                ..GameForm::default()
            },
            user,
        )
        .unwrap();

    let cheat = CheatForm {
        id: None,
        game_setting: "doom.wad in the game directory".to_string(),
        cheat_setting: "type during play".to_string(),
        data: vec![CheatDataForm {
            action: "iddqd".to_string(),
            description: "god mode".to_string(),
        }],
    };
    catalog.games.add_cheat(game, &cheat, user).unwrap();

    let copy = catalog.games.duplicate(game, user).unwrap();
    let copied_cheats = catalog.games.list_cheats(copy, user).unwrap();
    assert_eq!(copied_cheats.len(), 1);
    assert_eq!(copied_cheats[0].data[0].action, "iddqd");

    catalog.games.remove(game, user).unwrap();
    let err = catalog.games.list_cheats(game, user).unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert_eq!(catalog.statistics.summarize(user).unwrap().cheat_count, 1);
}

#[test]
fn test_accounts_see_only_their_own_shelves() {
    let catalog = Catalog::open_in_memory().unwrap();
    let mulder = Uuid::new_v4();
    let scully = Uuid::new_v4();

    let genre_id = catalog.genres.add(&genre_form("Horror"), mulder).unwrap();
    catalog
        .movies
        .add(&movie_form("Věc", "The Thing", vec![genre_id]), mulder)
        .unwrap();

    assert_eq!(catalog.movies.list(scully).unwrap().len(), 0);
    assert_eq!(catalog.genres.list(scully).unwrap().len(), 0);

    // Foreign records stay invisible even when addressed by id.
    let movie_id = catalog.movies.list(mulder).unwrap()[0].id.unwrap();
    let err = catalog.movies.get(movie_id, scully).unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = catalog
        .movies
        .add(&movie_form("Věc", "The Thing", vec![genre_id]), scully)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[test]
fn test_catalog_reopens_from_the_settings_database() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        database_path: Some(dir.path().join("shelf.db")),
        cache_capacity: 4,
    };

    let user;
    {
        let catalog = Catalog::open(&settings).unwrap();
        let account = catalog
            .accounts
            .register(&RegistrationForm {
                username: "mulder".to_string(),
                password: "trustno1!".to_string(),
                confirm_password: "trustno1!".to_string(),
            })
            .unwrap();
        user = account.uuid;
        catalog.genres.add(&genre_form("Thriller"), user).unwrap();
    }

    let reopened = Catalog::open(&settings).unwrap();
    let account = reopened
        .accounts
        .authenticate("mulder", "trustno1!")
        .unwrap();
    assert_eq!(account.uuid, user);

    let genres = reopened.genres.list(user).unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Thriller");
    assert!(genres[0].audit.is_some());
}
