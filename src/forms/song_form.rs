// src/forms/song_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::Song;
use crate::error::AppResult;
use crate::forms::validation::{check_link, check_name, ValidationErrors};
use crate::forms::{non_empty, or_blank, TimeForm};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SongForm {
    pub id: Option<i64>,
    pub name: String,
    pub length: TimeForm,
    pub note: String,
}

impl SongForm {
    pub fn from_record(song: &Song) -> SongForm {
        SongForm {
            id: song.id,
            name: song.name.clone(),
            length: TimeForm::from_time(song.length),
            note: or_blank(song.note.as_deref()),
        }
    }

    pub fn to_record(&self, music_id: i64) -> AppResult<Song> {
        Ok(Song {
            id: self.id,
            music_id,
            name: self.name.clone(),
            length: self.length.to_time()?,
            note: non_empty(&self.note),
            position: 0,
            audit: None,
        })
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, "name", &self.name);
        self.length.validate_into(&mut errors, "length");
        check_link(&mut errors, "note", &self.note);
        errors.into_result()
    }
}
