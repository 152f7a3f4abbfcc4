use serde::{Deserialize, Serialize};
use std::fmt;

/// Audio or subtitle language of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    CZ,
    EN,
    FR,
    JP,
    SK,
}

impl Language {
    /// All languages, in the order pickers offer them.
    pub const ALL: [Language; 5] = [
        Language::CZ,
        Language::EN,
        Language::FR,
        Language::JP,
        Language::SK,
    ];

    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "CZ" => Some(Language::CZ),
            "EN" => Some(Language::EN),
            "FR" => Some(Language::FR),
            "JP" => Some(Language::JP),
            "SK" => Some(Language::SK),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Language::CZ => "CZ",
            Language::EN => "EN",
            Language::FR => "FR",
            Language::JP => "JP",
            Language::SK => "SK",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
