// src/forms/program_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::{Program, ProgramFormat};
use crate::error::{AppError, AppResult};
use crate::forms::validation::{check_link, check_name, check_positive_int, ValidationErrors};
use crate::forms::{non_empty, or_blank, parse_field};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramForm {
    pub id: Option<i64>,
    pub name: String,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub media_count: String,
    pub format: String,
    pub crack: bool,
    pub serial_key: bool,
    pub other_data: String,
    pub note: String,
}

impl ProgramForm {
    pub fn from_record(program: &Program) -> ProgramForm {
        ProgramForm {
            id: program.id,
            name: program.name.clone(),
            wiki_en: or_blank(program.wiki_en.as_deref()),
            wiki_cz: or_blank(program.wiki_cz.as_deref()),
            media_count: program.media_count.to_string(),
            format: program.format.code().to_string(),
            crack: program.crack,
            serial_key: program.serial_key,
            other_data: or_blank(program.other_data.as_deref()),
            note: or_blank(program.note.as_deref()),
        }
    }

    pub fn to_record(&self) -> AppResult<Program> {
        let format =
            ProgramFormat::from_code(&self.format).ok_or(AppError::FormContract("format"))?;

        Ok(Program {
            id: self.id,
            name: self.name.clone(),
            wiki_en: non_empty(&self.wiki_en),
            wiki_cz: non_empty(&self.wiki_cz),
            media_count: parse_field("mediaCount", &self.media_count)?,
            format,
            crack: self.crack,
            serial_key: self.serial_key,
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
        if ProgramFormat::from_code(&self.format).is_none() {
            errors.add("format", "must be selected");
        }
        check_link(&mut errors, "otherData", &self.other_data);
        check_link(&mut errors, "note", &self.note);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_fields() {
        let form = ProgramForm {
            name: "Turbo Pascal".to_string(),
            media_count: "1".to_string(),
            format: "ISO".to_string(),
            serial_key: true,
            ..ProgramForm::default()
        };
        assert!(form.validate().is_ok());

        let program = form.to_record().unwrap();
        assert_eq!(program.format, ProgramFormat::Iso);
        assert_eq!(ProgramForm::from_record(&program), form);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let form = ProgramForm {
            name: "Turbo Pascal".to_string(),
            media_count: "1".to_string(),
            format: "FLOPPY".to_string(),
            ..ProgramForm::default()
        };

        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("format"));
    }
}
