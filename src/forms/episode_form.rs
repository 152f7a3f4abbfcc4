// src/forms/episode_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::Episode;
use crate::error::AppResult;
use crate::forms::validation::{check_link, check_name, check_positive_int, ValidationErrors};
use crate::forms::{non_empty, or_blank, parse_field, TimeForm};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodeForm {
    pub id: Option<i64>,
    pub number: String,
    pub name: String,
    pub length: TimeForm,
    pub note: String,
}

impl EpisodeForm {
    pub fn from_record(episode: &Episode) -> EpisodeForm {
        EpisodeForm {
            id: episode.id,
            number: episode.number.to_string(),
            name: episode.name.clone(),
            length: TimeForm::from_time(episode.length),
            note: or_blank(episode.note.as_deref()),
        }
    }

    pub fn to_record(&self, season_id: i64) -> AppResult<Episode> {
        Ok(Episode {
            id: self.id,
            season_id,
            number: parse_field("number", &self.number)?,
            name: self.name.clone(),
            length: self.length.to_time()?,
            note: non_empty(&self.note),
            position: 0,
            audit: None,
        })
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        check_positive_int(&mut errors, "number", &self.number);
        check_name(&mut errors, "name", &self.name);
        self.length.validate_into(&mut errors, "length");
        check_link(&mut errors, "note", &self.note);
        errors.into_result()
    }
}
