// src/services/mod.rs
//
// Catalog facades over the repositories. Every operation is scoped to the
// calling account; mutations keep sibling positions dense and drop the
// account's cached list.

pub mod cache;

mod account_service;
mod game_service;
mod genre_service;
mod movie_service;
mod music_service;
mod picture_service;
mod program_service;
mod show_service;
mod statistics_service;

// Re-export all services and their types
pub use account_service::AccountService;
pub use game_service::GameService;
pub use genre_service::GenreService;
pub use movie_service::MovieService;
pub use music_service::MusicService;
pub use picture_service::PictureService;
pub use program_service::ProgramService;
pub use show_service::ShowService;
pub use statistics_service::{Statistics, StatisticsService};

use crate::domain::CatalogRecord;
use crate::error::{AppError, AppResult};

// ============================================================================
// SHARED ORDERING HELPERS
// ============================================================================

/// Position for a record appended to an ordered sibling list.
pub(crate) fn next_position<T: CatalogRecord>(records: &[T]) -> i32 {
    records
        .last()
        .map(|record| record.position() + 1)
        .unwrap_or(0)
}

/// Renumbers an ordered sibling list to dense positions `0..n`, storing
/// only the positions that actually changed.
pub(crate) fn compact_positions<T, F>(records: &[T], mut store: F) -> AppResult<()>
where
    T: CatalogRecord,
    F: FnMut(i64, i32) -> AppResult<()>,
{
    for (index, record) in records.iter().enumerate() {
        let id = record.record_id().ok_or(AppError::NotFound)?;
        let position = index as i32;
        if record.position() != position {
            store(id, position)?;
        }
    }
    Ok(())
}

/// Position swaps that move a record one step within its ordered sibling
/// list; `step` is -1 toward the front, 1 toward the back. At the edge of
/// the list there is no neighbor to swap with and the move fails.
pub(crate) fn neighbor_swap<T: CatalogRecord>(
    records: &[T],
    id: i64,
    step: isize,
) -> AppResult<[(i64, i32); 2]> {
    let index = records
        .iter()
        .position(|record| record.record_id() == Some(id))
        .ok_or(AppError::NotFound)?;
    let neighbor = index
        .checked_add_signed(step)
        .filter(|&neighbor| neighbor < records.len())
        .ok_or(AppError::NotMovable)?;

    let record_id = records[index].record_id().ok_or(AppError::NotFound)?;
    let neighbor_id = records[neighbor].record_id().ok_or(AppError::NotFound)?;

    Ok([
        (record_id, records[neighbor].position()),
        (neighbor_id, records[index].position()),
    ])
}
