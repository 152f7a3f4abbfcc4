// src/forms/movie_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::{Genre, Language, Medium, Movie};
use crate::error::{AppError, AppResult};
use crate::forms::validation::{
    check_imdb_code, check_link, check_name, check_year, ValidationErrors,
};
use crate::forms::{non_empty, or_blank, parse_field, parse_optional_field, TimeForm};

/// Movie form. Media are entered as plain lengths; the 1-based medium
/// number comes from the row order on conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovieForm {
    pub id: Option<i64>,
    pub czech_name: String,
    pub original_name: String,
    pub year: String,
    pub language: String,
    pub subtitles: Vec<String>,
    pub media: Vec<TimeForm>,
    pub csfd: String,
    pub imdb_code: String,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub picture: Option<i64>,
    pub note: String,
    pub genres: Vec<i64>,
}

impl MovieForm {
    pub fn from_record(movie: &Movie) -> MovieForm {
        MovieForm {
            id: movie.id,
            czech_name: movie.czech_name.clone(),
            original_name: movie.original_name.clone(),
            year: movie.year.to_string(),
            language: movie.language.code().to_string(),
            subtitles: movie
                .subtitles
                .iter()
                .map(|language| language.code().to_string())
                .collect(),
            media: movie
                .media
                .iter()
                .map(|medium| TimeForm::from_time(medium.length))
                .collect(),
            csfd: or_blank(movie.csfd.as_deref()),
            imdb_code: movie
                .imdb_code
                .map(|code| code.to_string())
                .unwrap_or_default(),
            wiki_en: or_blank(movie.wiki_en.as_deref()),
            wiki_cz: or_blank(movie.wiki_cz.as_deref()),
            picture: movie.picture,
            note: or_blank(movie.note.as_deref()),
            genres: movie.genres.iter().filter_map(|genre| genre.id).collect(),
        }
    }

    /// Genres are passed in already resolved; the form only carries ids.
    pub fn to_record(&self, genres: Vec<Genre>) -> AppResult<Movie> {
        let language =
            Language::from_code(&self.language).ok_or(AppError::FormContract("language"))?;
        let subtitles = self
            .subtitles
            .iter()
            .map(|code| Language::from_code(code).ok_or(AppError::FormContract("subtitles")))
            .collect::<AppResult<Vec<_>>>()?;
        let media = self
            .media
            .iter()
            .enumerate()
            .map(|(index, length)| {
                Ok(Medium {
                    id: None,
                    number: index as i32 + 1,
                    length: length.to_time()?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Movie {
            id: self.id,
            czech_name: self.czech_name.clone(),
            original_name: self.original_name.clone(),
            year: parse_field("year", &self.year)?,
            language,
            subtitles,
            media,
            csfd: non_empty(&self.csfd),
            imdb_code: parse_optional_field("imdbCode", &self.imdb_code)?,
            wiki_en: non_empty(&self.wiki_en),
            wiki_cz: non_empty(&self.wiki_cz),
            picture: self.picture,
            note: non_empty(&self.note),
            genres,
            position: 0,
            audit: None,
        })
    }

    pub fn genre_ids(&self) -> &[i64] {
        &self.genres
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, "czechName", &self.czech_name);
        check_name(&mut errors, "originalName", &self.original_name);
        check_year(&mut errors, "year", &self.year);
        if Language::from_code(&self.language).is_none() {
            errors.add("language", "must be selected");
        }
        for code in &self.subtitles {
            if Language::from_code(code).is_none() {
                errors.add("subtitles", "must be known languages");
            }
        }
        if self.media.is_empty() {
            errors.add("media", "at least one medium is required");
        }
        for (index, length) in self.media.iter().enumerate() {
            length.validate_into(&mut errors, &format!("media[{index}]"));
        }
        check_link(&mut errors, "csfd", &self.csfd);
        check_imdb_code(&mut errors, "imdbCode", &self.imdb_code);
        check_link(&mut errors, "wikiEn", &self.wiki_en);
        check_link(&mut errors, "wikiCz", &self.wiki_cz);
        check_link(&mut errors, "note", &self.note);
        if self.genres.is_empty() {
            errors.add("genres", "at least one genre must be selected");
        }
        errors.into_result()
    }
}
