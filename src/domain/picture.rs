use serde::{Deserialize, Serialize};

use super::{catalog_record, AuditStamp};

/// An uploaded cover image, stored as raw bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Picture {
    pub id: Option<i64>,
    pub content: Vec<u8>,
    #[serde(default)]
    pub position: i32,
    #[serde(skip)]
    pub audit: Option<AuditStamp>,
}

catalog_record!(Picture);

impl Picture {
    /// Copy detached from its stored identity, used when duplicating.
    pub fn duplicated(&self) -> Picture {
        Picture {
            id: None,
            audit: None,
            ..self.clone()
        }
    }
}
