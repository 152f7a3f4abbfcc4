// src/repositories/movie_repository.rs
//
// Movie persistence. Media and genre links live in their own tables and
// are written together with the movie row in one transaction.

use rusqlite::{params, Connection, Row, Transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{AuditStamp, Genre, Medium, Movie, Time};
use crate::error::{AppError, AppResult};
use crate::repositories::genre_repository::row_to_genre;
use crate::repositories::{language_from_code, row_to_audit, subtitles_from_json};

#[cfg_attr(test, mockall::automock)]
pub trait MovieRepository: Send + Sync {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Movie>>;
    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Movie>>;
    fn add(&self, movie: &Movie, user: Uuid) -> AppResult<i64>;
    fn update(&self, movie: &Movie, user: Uuid) -> AppResult<()>;
    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteMovieRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map a movie row; media and genres are attached by the callers.
    fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
        let language: String = row.get("language")?;
        let subtitles: String = row.get("subtitles")?;

        Ok(Movie {
            id: Some(row.get("id")?),
            czech_name: row.get("czech_name")?,
            original_name: row.get("original_name")?,
            year: row.get("year")?,
            language: language_from_code(&language)?,
            subtitles: subtitles_from_json(&subtitles)?,
            media: Vec::new(),
            csfd: row.get("csfd")?,
            imdb_code: row.get("imdb_code")?,
            wiki_en: row.get("wiki_en")?,
            wiki_cz: row.get("wiki_cz")?,
            picture: row.get("picture_id")?,
            note: row.get("note")?,
            genres: Vec::new(),
            position: row.get("position")?,
            audit: Some(row_to_audit(row)?),
        })
    }

    fn load_media(conn: &Connection, movie_id: i64) -> AppResult<Vec<Medium>> {
        let mut stmt = conn.prepare(
            "SELECT id, number, length FROM movie_media WHERE movie_id = ?1 ORDER BY number",
        )?;

        let media: Vec<Medium> = stmt
            .query_map(params![movie_id], |row| {
                Ok(Medium {
                    id: Some(row.get("id")?),
                    number: row.get("number")?,
                    length: Time::from_seconds(row.get("length")?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(media)
    }

    fn load_genres(conn: &Connection, movie_id: i64) -> AppResult<Vec<Genre>> {
        let mut stmt = conn.prepare(
            "SELECT g.id, g.name, g.position,
                    g.created_user, g.created_time, g.updated_user, g.updated_time
             FROM genres g
             JOIN movie_genres mg ON mg.genre_id = g.id
             WHERE mg.movie_id = ?1
             ORDER BY mg.ord",
        )?;

        let genres: Vec<Genre> = stmt
            .query_map(params![movie_id], row_to_genre)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(genres)
    }

    fn attach_children(conn: &Connection, movie: &mut Movie) -> AppResult<()> {
        if let Some(id) = movie.id {
            movie.media = Self::load_media(conn, id)?;
            movie.genres = Self::load_genres(conn, id)?;
        }
        Ok(())
    }

    fn store_media(tx: &Transaction, movie_id: i64, media: &[Medium]) -> AppResult<()> {
        for medium in media {
            tx.execute(
                "INSERT INTO movie_media (movie_id, number, length) VALUES (?1, ?2, ?3)",
                params![movie_id, medium.number, medium.length.total_seconds()],
            )?;
        }
        Ok(())
    }

    fn store_genres(tx: &Transaction, movie_id: i64, genres: &[Genre]) -> AppResult<()> {
        for (ord, genre) in genres.iter().enumerate() {
            // Links can only reference stored genres
            let genre_id = genre.id.ok_or(AppError::NotFound)?;
            tx.execute(
                "INSERT INTO movie_genres (movie_id, genre_id, ord) VALUES (?1, ?2, ?3)",
                params![movie_id, genre_id, ord as i64],
            )?;
        }
        Ok(())
    }
}

impl MovieRepository for SqliteMovieRepository {
    fn find_all_by_user(&self, user: Uuid) -> AppResult<Vec<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, czech_name, original_name, year, language, subtitles, csfd,
                    imdb_code, wiki_en, wiki_cz, picture_id, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM movies
             WHERE created_user = ?1
             ORDER BY position, id",
        )?;

        let mut movies: Vec<Movie> = stmt
            .query_map(params![user.to_string()], Self::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        for movie in &mut movies {
            Self::attach_children(&conn, movie)?;
        }

        Ok(movies)
    }

    fn find_by_id_and_user(&self, id: i64, user: Uuid) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, czech_name, original_name, year, language, subtitles, csfd,
                    imdb_code, wiki_en, wiki_cz, picture_id, note, position,
                    created_user, created_time, updated_user, updated_time
             FROM movies
             WHERE id = ?1 AND created_user = ?2",
        )?;

        let mut movie = match stmt.query_row(params![id, user.to_string()], Self::row_to_movie) {
            Ok(movie) => movie,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(AppError::Database(e)),
        };

        Self::attach_children(&conn, &mut movie)?;

        Ok(Some(movie))
    }

    fn add(&self, movie: &Movie, user: Uuid) -> AppResult<i64> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let audit = AuditStamp::new(user);

        tx.execute(
            "INSERT INTO movies (czech_name, original_name, year, language, subtitles, csfd,
                                 imdb_code, wiki_en, wiki_cz, picture_id, note, position,
                                 created_user, created_time, updated_user, updated_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                movie.czech_name,
                movie.original_name,
                movie.year,
                movie.language.code(),
                serde_json::to_string(&movie.subtitles)?,
                movie.csfd,
                movie.imdb_code,
                movie.wiki_en,
                movie.wiki_cz,
                movie.picture,
                movie.note,
                movie.position,
                audit.created_user.to_string(),
                audit.created_time.to_rfc3339(),
                audit.updated_user.to_string(),
                audit.updated_time.to_rfc3339(),
            ],
        )?;

        let movie_id = tx.last_insert_rowid();
        Self::store_media(&tx, movie_id, &movie.media)?;
        Self::store_genres(&tx, movie_id, &movie.genres)?;
        tx.commit()?;

        Ok(movie_id)
    }

    fn update(&self, movie: &Movie, user: Uuid) -> AppResult<()> {
        let id = movie.id.ok_or(AppError::NotFound)?;
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let rows_affected = tx.execute(
            "UPDATE movies
             SET czech_name = ?1, original_name = ?2, year = ?3, language = ?4,
                 subtitles = ?5, csfd = ?6, imdb_code = ?7, wiki_en = ?8, wiki_cz = ?9,
                 picture_id = ?10, note = ?11, updated_user = ?12, updated_time = ?13
             WHERE id = ?14",
            params![
                movie.czech_name,
                movie.original_name,
                movie.year,
                movie.language.code(),
                serde_json::to_string(&movie.subtitles)?,
                movie.csfd,
                movie.imdb_code,
                movie.wiki_en,
                movie.wiki_cz,
                movie.picture,
                movie.note,
                user.to_string(),
                chrono::Utc::now().to_rfc3339(),
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        // Owned collections are replaced wholesale
        tx.execute("DELETE FROM movie_media WHERE movie_id = ?1", params![id])?;
        tx.execute("DELETE FROM movie_genres WHERE movie_id = ?1", params![id])?;
        Self::store_media(&tx, id, &movie.media)?;
        Self::store_genres(&tx, id, &movie.genres)?;
        tx.commit()?;

        Ok(())
    }

    fn update_position(&self, id: i64, position: i32, user: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE movies SET position = ?1, updated_user = ?2, updated_time = ?3 WHERE id = ?4",
            params![position, user.to_string(), chrono::Utc::now().to_rfc3339(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM movies WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
