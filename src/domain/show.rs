use serde::{Deserialize, Serialize};

use super::{catalog_record, imdb_label, AuditStamp, Genre, Language, Time};

/// A TV show in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: Option<i64>,
    pub czech_name: String,
    pub original_name: String,
    pub csfd: Option<String>,
    pub imdb_code: Option<u32>,
    pub wiki_en: Option<String>,
    pub wiki_cz: Option<String>,
    pub picture: Option<i64>,
    pub note: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

/// One season of a show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub id: Option<i64>,
    pub show_id: i64,
    pub number: i32,
    pub start_year: i32,
    pub end_year: i32,
    pub language: Language,
    #[serde(default)]
    pub subtitles: Vec<Language>,
    pub note: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

/// One episode of a season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: Option<i64>,
    pub season_id: i64,
    pub number: i32,
    pub name: String,
    pub length: Time,
    pub note: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

catalog_record!(Show, Season, Episode);

impl Show {
    /// Display label of the IMDB code, if the show has one.
    pub fn imdb_label(&self) -> Option<String> {
        self.imdb_code.map(imdb_label)
    }

    /// Copy detached from its stored identity, used when duplicating.
    pub fn duplicated(&self) -> Show {
        Show {
            id: None,
            audit: None,
            ..self.clone()
        }
    }
}

impl Season {
    /// Label for the run of years, collapsed when the season fits one year.
    pub fn years_label(&self) -> String {
        if self.start_year == self.end_year {
            self.start_year.to_string()
        } else {
            format!("{} - {}", self.start_year, self.end_year)
        }
    }

    /// Copy detached from its stored identity, used when duplicating.
    pub fn duplicated(&self) -> Season {
        Season {
            id: None,
            audit: None,
            ..self.clone()
        }
    }
}

impl Episode {
    /// Copy detached from its stored identity, used when duplicating.
    pub fn duplicated(&self) -> Episode {
        Episode {
            id: None,
            audit: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season(start_year: i32, end_year: i32) -> Season {
        Season {
            id: Some(1),
            show_id: 1,
            number: 1,
            start_year,
            end_year,
            language: Language::EN,
            subtitles: Vec::new(),
            note: None,
            position: 0,
            audit: None,
        }
    }

    #[test]
    fn test_years_label_collapses_single_year() {
        assert_eq!(season(2005, 2005).years_label(), "2005");
    }

    #[test]
    fn test_years_label_joins_distinct_years() {
        assert_eq!(season(2005, 2008).years_label(), "2005 - 2008");
    }
}
