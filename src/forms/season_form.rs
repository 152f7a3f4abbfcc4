// src/forms/season_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::{Language, Season};
use crate::error::{AppError, AppResult};
use crate::forms::validation::{
    check_link, check_positive_int, check_year, check_year_range, ValidationErrors,
};
use crate::forms::{non_empty, or_blank, parse_field};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeasonForm {
    pub id: Option<i64>,
    pub number: String,
    pub start_year: String,
    pub end_year: String,
    pub language: String,
    pub subtitles: Vec<String>,
    pub note: String,
}

impl SeasonForm {
    pub fn from_record(season: &Season) -> SeasonForm {
        SeasonForm {
            id: season.id,
            number: season.number.to_string(),
            start_year: season.start_year.to_string(),
            end_year: season.end_year.to_string(),
            language: season.language.code().to_string(),
            subtitles: season
                .subtitles
                .iter()
                .map(|language| language.code().to_string())
                .collect(),
            note: or_blank(season.note.as_deref()),
        }
    }

    pub fn to_record(&self, show_id: i64) -> AppResult<Season> {
        let language =
            Language::from_code(&self.language).ok_or(AppError::FormContract("language"))?;
        let subtitles = self
            .subtitles
            .iter()
            .map(|code| Language::from_code(code).ok_or(AppError::FormContract("subtitles")))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Season {
            id: self.id,
            show_id,
            number: parse_field("number", &self.number)?,
            start_year: parse_field("startYear", &self.start_year)?,
            end_year: parse_field("endYear", &self.end_year)?,
            language,
            subtitles,
            note: non_empty(&self.note),
            position: 0,
            audit: None,
        })
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        check_positive_int(&mut errors, "number", &self.number);
        check_year(&mut errors, "startYear", &self.start_year);
        check_year(&mut errors, "endYear", &self.end_year);
        check_year_range(&mut errors, "endYear", &self.start_year, &self.end_year);
        if Language::from_code(&self.language).is_none() {
            errors.add("language", "must be selected");
        }
        for code in &self.subtitles {
            if Language::from_code(code).is_none() {
                errors.add("subtitles", "must be known languages");
            }
        }
        check_link(&mut errors, "note", &self.note);
        errors.into_result()
    }
}
