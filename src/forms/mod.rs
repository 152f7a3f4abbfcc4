// src/forms/mod.rs
//
// Form objects mirroring the server-rendered HTML forms. Numeric and enum
// fields stay strings here so a rejected submission can be shown again
// exactly as the user typed it. `validate` runs over the raw strings;
// `to_record` parses them only after validation has passed, which is why
// a parse failure there is a contract violation and not a user error.

use std::str::FromStr;

use crate::error::{AppError, AppResult};

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod validation;

mod cheat_form;
mod episode_form;
mod game_form;
mod genre_form;
mod movie_form;
mod music_form;
mod program_form;
mod registration_form;
mod season_form;
mod show_form;
mod song_form;
mod time_form;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use cheat_form::{CheatDataForm, CheatForm};
pub use episode_form::EpisodeForm;
pub use game_form::GameForm;
pub use genre_form::GenreForm;
pub use movie_form::MovieForm;
pub use music_form::MusicForm;
pub use program_form::ProgramForm;
pub use registration_form::RegistrationForm;
pub use season_form::SeasonForm;
pub use show_form::ShowForm;
pub use song_form::SongForm;
pub use time_form::TimeForm;
pub use validation::ValidationErrors;

// ============================================================================
// SHARED FIELD CONVERSION
// ============================================================================

/// Parses a numeric form field that validation has already accepted.
pub(crate) fn parse_field<T: FromStr>(field: &'static str, value: &str) -> AppResult<T> {
    value.parse().map_err(|_| AppError::FormContract(field))
}

/// Parses an optional numeric form field; an empty string means absent.
pub(crate) fn parse_optional_field<T: FromStr>(
    field: &'static str,
    value: &str,
) -> AppResult<Option<T>> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_field(field, value).map(Some)
}

/// An empty string posted from an optional input means "no value".
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Renders an optional field back into its form representation.
pub(crate) fn or_blank(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}
