// src/forms/genre_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::Genre;
use crate::error::AppResult;
use crate::forms::validation::{check_name, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenreForm {
    pub id: Option<i64>,
    pub name: String,
}

impl GenreForm {
    pub fn from_record(genre: &Genre) -> GenreForm {
        GenreForm {
            id: genre.id,
            name: genre.name.clone(),
        }
    }

    pub fn to_record(&self) -> AppResult<Genre> {
        Ok(Genre {
            id: self.id,
            name: self.name.clone(),
            position: 0,
            audit: None,
        })
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, "name", &self.name);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(GenreForm::default().validate().is_err());

        let form = GenreForm {
            id: None,
            name: "Sci-fi".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
