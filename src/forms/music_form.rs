// src/forms/music_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::Music;
use crate::error::AppResult;
use crate::forms::validation::{check_link, check_name, check_positive_int, ValidationErrors};
use crate::forms::{non_empty, or_blank, parse_field};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MusicForm {
    pub id: Option<i64>,
    pub name: String,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub media_count: String,
    pub note: String,
}

impl MusicForm {
    pub fn from_record(music: &Music) -> MusicForm {
        MusicForm {
            id: music.id,
            name: music.name.clone(),
            wiki_en: or_blank(music.wiki_en.as_deref()),
            wiki_cz: or_blank(music.wiki_cz.as_deref()),
            media_count: music.media_count.to_string(),
            note: or_blank(music.note.as_deref()),
        }
    }

    pub fn to_record(&self) -> AppResult<Music> {
        Ok(Music {
            id: self.id,
            name: self.name.clone(),
            wiki_en: non_empty(&self.wiki_en),
            wiki_cz: non_empty(&self.wiki_cz),
            media_count: parse_field("mediaCount", &self.media_count)?,
            note: non_empty(&self.note),
            position: 0,
            audit: None,
        })
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, "name", &self.name);
        check_link(&mut errors, "wikiEn", &self.wiki_en);
        check_link(&mut errors, "wikiCz", &self.wiki_cz);
        check_positive_int(&mut errors, "mediaCount", &self.media_count);
        check_link(&mut errors, "note", &self.note);
        errors.into_result()
    }
}
