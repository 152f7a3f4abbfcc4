use serde::{Deserialize, Serialize};

use super::{catalog_record, AuditStamp};

/// A genre movies and shows can be tagged with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

catalog_record!(Genre);

impl Genre {
    /// Copy detached from its stored identity, used when duplicating.
    pub fn duplicated(&self) -> Genre {
        Genre {
            id: None,
            audit: None,
            ..self.clone()
        }
    }
}
