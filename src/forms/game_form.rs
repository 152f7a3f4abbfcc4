// src/forms/game_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::Game;
use crate::error::AppResult;
use crate::forms::validation::{check_link, check_name, check_positive_int, ValidationErrors};
use crate::forms::{non_empty, or_blank, parse_field};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameForm {
    pub id: Option<i64>,
    pub name: String,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub media_count: String,
    pub crack: bool,
    pub serial_key: bool,
    pub patch: bool,
    pub trainer: bool,
    pub trainer_data: bool,
    pub editor: bool,
    pub saves: bool,
    pub other_data: String,
    pub note: String,
}

impl GameForm {
    pub fn from_record(game: &Game) -> GameForm {
        GameForm {
            id: game.id,
            name: game.name.clone(),
            wiki_en: or_blank(game.wiki_en.as_deref()),
            wiki_cz: or_blank(game.wiki_cz.as_deref()),
            media_count: game.media_count.to_string(),
            crack: game.crack,
            serial_key: game.serial_key,
            patch: game.patch,
            trainer: game.trainer,
            trainer_data: game.trainer_data,
            editor: game.editor,
            saves: game.saves,
            other_data: or_blank(game.other_data.as_deref()),
            note: or_blank(game.note.as_deref()),
        }
    }

    pub fn to_record(&self) -> AppResult<Game> {
        Ok(Game {
            id: self.id,
            name: self.name.clone(),
            wiki_en: non_empty(&self.wiki_en),
            wiki_cz: non_empty(&self.wiki_cz),
            media_count: parse_field("mediaCount", &self.media_count)?,
            crack: self.crack,
            serial_key: self.serial_key,
            patch: self.patch,
            trainer: self.trainer,
            trainer_data: self.trainer_data,
            editor: self.editor,
            saves: self.saves,
            other_data: non_empty(&self.other_data),
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
        check_link(&mut errors, "otherData", &self.other_data);
        check_link(&mut errors, "note", &self.note);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_zero_media_count_is_rejected() {
        let form = GameForm {
            name: "Game 1".to_string(),
            media_count: "0".to_string(),
            ..GameForm::default()
        };

        let err = form.validate().unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.get("mediaCount"), Some("must be a positive number"));
            }
            other => panic!("expected validation errors, got {other}"),
        }
    }

    #[test]
    fn test_round_trip_preserves_flags() {
        let form = GameForm {
            name: "Doom".to_string(),
            media_count: "3".to_string(),
            crack: true,
            saves: true,
            other_data: "bonus maps".to_string(),
            ..GameForm::default()
        };
        assert!(form.validate().is_ok());

        let game = form.to_record().unwrap();
        assert_eq!(game.media_count, 3);
        assert_eq!(game.additional_data(), "Crack, saves, bonus maps");
        assert_eq!(GameForm::from_record(&game), form);
    }
}
