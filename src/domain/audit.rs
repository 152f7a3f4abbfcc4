use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Who created and last changed a stored record, and when.
///
/// Lives only on the persistence side; the serialized record shapes skip it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditStamp {
    pub created_user: Uuid,
    pub created_time: DateTime<Utc>,
    pub updated_user: Uuid,
    pub updated_time: DateTime<Utc>,
}

impl AuditStamp {
    /// Stamp for a record being stored for the first time.
    pub fn new(user: Uuid) -> Self {
        let now = Utc::now();
        AuditStamp {
            created_user: user,
            created_time: now,
            updated_user: user,
            updated_time: now,
        }
    }
}
