// src/error/types.rs
use crate::forms::ValidationErrors;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    /// Field-keyed messages collected by the form validators.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A field that validation must have accepted could not be converted
    /// into its record type. Signals a gap in the validator, not bad input.
    #[error("Form contract violated on field '{0}'")]
    FormContract(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Record not found")]
    NotFound,

    #[error("Record is already at the edge of its list")]
    NotMovable,
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
