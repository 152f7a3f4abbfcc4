use serde::{Deserialize, Serialize};
use std::fmt;

use super::{additional_data_summary, catalog_record, AuditStamp};

/// How a program is distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProgramFormat {
    Iso,
    Binary,
    Steam,
}

impl ProgramFormat {
    /// All formats, in the order pickers offer them.
    pub const ALL: [ProgramFormat; 3] = [
        ProgramFormat::Iso,
        ProgramFormat::Binary,
        ProgramFormat::Steam,
    ];

    pub fn from_code(code: &str) -> Option<ProgramFormat> {
        match code {
            "ISO" => Some(ProgramFormat::Iso),
            "BINARY" => Some(ProgramFormat::Binary),
            "STEAM" => Some(ProgramFormat::Steam),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            ProgramFormat::Iso => "ISO",
            ProgramFormat::Binary => "BINARY",
            ProgramFormat::Steam => "STEAM",
        }
    }
}

impl fmt::Display for ProgramFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A program in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: Option<i64>,
    pub name: String,
    pub wiki_en: Option<String>,
    pub wiki_cz: Option<String>,
    pub media_count: i32,
    pub format: ProgramFormat,
    pub crack: bool,
    pub serial_key: bool,
    pub other_data: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

catalog_record!(Program);

impl Program {
    /// Display summary of the extras shipped with the program.
    pub fn additional_data(&self) -> String {
        additional_data_summary(
            &[("crack", self.crack), ("serial key", self.serial_key)],
            self.other_data.as_deref(),
        )
    }

    /// Copy detached from its stored identity, used when duplicating.
    pub fn duplicated(&self) -> Program {
        Program {
            id: None,
            audit: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_codes_round_trip() {
        for format in ProgramFormat::ALL {
            assert_eq!(ProgramFormat::from_code(format.code()), Some(format));
        }
        assert_eq!(ProgramFormat::from_code("FLOPPY"), None);
    }

    #[test]
    fn test_additional_data_covers_crack_and_serial_key() {
        let program = Program {
            id: Some(1),
            name: "Turbo Pascal".to_string(),
            wiki_en: None,
            wiki_cz: None,
            media_count: 1,
            format: ProgramFormat::Iso,
            crack: true,
            serial_key: true,
            other_data: None,
            note: None,
            position: 0,
            audit: None,
        };

        assert_eq!(program.additional_data(), "Crack, serial key");
    }
}
