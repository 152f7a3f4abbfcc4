// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod account;
pub mod audit;
pub mod game;
pub mod genre;
pub mod language;
pub mod movie;
pub mod music;
pub mod picture;
pub mod program;
pub mod show;
pub mod time;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Accounts
pub use account::{Account, Role};

// Audit metadata
pub use audit::AuditStamp;

// Catalog records
pub use game::{Cheat, CheatData, Game};
pub use genre::Genre;
pub use language::Language;
pub use movie::{Medium, Movie};
pub use music::{Music, Song};
pub use picture::Picture;
pub use program::{Program, ProgramFormat};
pub use show::{Episode, Season, Show};

// Value types
pub use time::Time;

// ============================================================================
// SHARED RECORD BEHAVIOR
// ============================================================================

/// Common surface of the positioned catalog records.
///
/// Lists are kept ordered by `position`, then id; the services renumber
/// and reorder records through this trait without knowing their type.
pub trait CatalogRecord {
    fn record_id(&self) -> Option<i64>;
    fn position(&self) -> i32;
}

/// Implements identity-based equality and [`CatalogRecord`] for a record
/// struct with `id: Option<i64>` and `position: i32` fields.
///
/// Two records are equal only when both are persisted under the same id;
/// an unsaved record equals nothing, itself included.
macro_rules! catalog_record {
    ($($record:ty),+ $(,)?) => {$(
        impl PartialEq for $record {
            fn eq(&self, other: &Self) -> bool {
                matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
            }
        }

        impl $crate::domain::CatalogRecord for $record {
            fn record_id(&self) -> Option<i64> {
                self.id
            }

            fn position(&self) -> i32 {
                self.position
            }
        }
    )+};
}

pub(crate) use catalog_record;

// ============================================================================
// SHARED DISPLAY HELPERS
// ============================================================================

/// Display label for an IMDB code, zero-padded to the canonical seven digits.
pub fn imdb_label(code: u32) -> String {
    format!("tt{code:07}")
}

/// Joins the labels of set flags and the free-form other-data text into one
/// display summary, upper-casing the first character when there is one.
pub(crate) fn additional_data_summary(flags: &[(&str, bool)], other_data: Option<&str>) -> String {
    let mut parts: Vec<&str> = flags
        .iter()
        .filter(|(_, set)| *set)
        .map(|(label, _)| *label)
        .collect();
    if let Some(other) = other_data.map(str::trim).filter(|other| !other.is_empty()) {
        parts.push(other);
    }
    capitalize_first(&parts.join(", "))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imdb_label_pads_to_seven_digits() {
        assert_eq!(imdb_label(123), "tt0000123");
        assert_eq!(imdb_label(9_999_999), "tt9999999");
    }

    #[test]
    fn test_additional_data_joins_set_flags_in_order() {
        let summary = additional_data_summary(
            &[("crack", true), ("serial key", false), ("patch", true)],
            None,
        );
        assert_eq!(summary, "Crack, patch");
    }

    #[test]
    fn test_additional_data_appends_other_data_last() {
        let summary = additional_data_summary(&[("crack", false)], Some("map editor"));
        assert_eq!(summary, "Map editor");
    }

    #[test]
    fn test_additional_data_is_empty_when_nothing_is_set() {
        assert_eq!(additional_data_summary(&[("crack", false)], None), "");
        assert_eq!(additional_data_summary(&[], Some("   ")), "");
    }
}
