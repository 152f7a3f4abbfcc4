use serde::{Deserialize, Serialize};

use super::{catalog_record, imdb_label, AuditStamp, Genre, Language, Time};

/// One physical or digital medium a movie is stored on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medium {
    pub id: Option<i64>,
    /// 1-based order of the medium within the movie.
    pub number: i32,
    pub length: Time,
}

/// A movie in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: Option<i64>,
    pub czech_name: String,
    pub original_name: String,
    pub year: i32,
    pub language: Language,
    #[serde(default)]
    pub subtitles: Vec<Language>,
    #[serde(default)]
    pub media: Vec<Medium>,
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

catalog_record!(Movie);

impl Movie {
    /// Total running time across all media.
    pub fn total_length(&self) -> Time {
        self.media.iter().map(|medium| medium.length).sum()
    }

    /// Display label of the IMDB code, if the movie has one.
    pub fn imdb_label(&self) -> Option<String> {
        self.imdb_code.map(imdb_label)
    }

    /// Copy detached from its stored identity, used when duplicating.
    /// Media lose their ids as well so they are stored as new rows.
    pub fn duplicated(&self) -> Movie {
        let mut copy = self.clone();
        copy.id = None;
        copy.audit = None;
        for medium in &mut copy.media {
            medium.id = None;
        }
        copy
    }
}
