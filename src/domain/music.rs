use serde::{Deserialize, Serialize};

use super::{catalog_record, AuditStamp, Time};

/// A music album in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Music {
    pub id: Option<i64>,
    pub name: String,
    pub wiki_en: Option<String>,
    pub wiki_cz: Option<String>,
    pub media_count: i32,
    pub note: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

/// A song on an album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: Option<i64>,
    pub music_id: i64,
    pub name: String,
    pub length: Time,
    pub note: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

catalog_record!(Music, Song);

impl Music {
    /// Copy detached from its stored identity, used when duplicating.
    pub fn duplicated(&self) -> Music {
        Music {
            id: None,
            audit: None,
            ..self.clone()
        }
    }
}

impl Song {
    /// Copy detached from its stored identity, used when duplicating.
    pub fn duplicated(&self) -> Song {
        Song {
            id: None,
            audit: None,
            ..self.clone()
        }
    }
}
