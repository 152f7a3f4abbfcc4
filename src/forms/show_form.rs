// src/forms/show_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::{Genre, Show};
use crate::error::AppResult;
use crate::forms::validation::{check_imdb_code, check_link, check_name, ValidationErrors};
use crate::forms::{non_empty, or_blank, parse_optional_field};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowForm {
    pub id: Option<i64>,
    pub czech_name: String,
    pub original_name: String,
    pub csfd: String,
    pub imdb_code: String,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub picture: Option<i64>,
    pub note: String,
    pub genres: Vec<i64>,
}

impl ShowForm {
    pub fn from_record(show: &Show) -> ShowForm {
        ShowForm {
            id: show.id,
            czech_name: show.czech_name.clone(),
            original_name: show.original_name.clone(),
            csfd: or_blank(show.csfd.as_deref()),
            imdb_code: show
                .imdb_code
                .map(|code| code.to_string())
                .unwrap_or_default(),
            wiki_en: or_blank(show.wiki_en.as_deref()),
            wiki_cz: or_blank(show.wiki_cz.as_deref()),
            picture: show.picture,
            note: or_blank(show.note.as_deref()),
            genres: show.genres.iter().filter_map(|genre| genre.id).collect(),
        }
    }

    /// Genres are passed in already resolved; the form only carries ids.
    pub fn to_record(&self, genres: Vec<Genre>) -> AppResult<Show> {
        Ok(Show {
            id: self.id,
            czech_name: self.czech_name.clone(),
            original_name: self.original_name.clone(),
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
