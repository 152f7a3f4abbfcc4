// src/forms/validation.rs
//
// Form field checks. Every rule that applies to a form runs; violations
// accumulate per field instead of stopping at the first one, so a rejected
// submission can show all of its problems at once.

use chrono::{Datelike, Utc};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{AppError, AppResult};

/// Earliest year a catalog record may carry.
pub const MIN_YEAR: i32 = 1930;

/// Highest IMDB code the catalog accepts (seven digits).
pub const MAX_IMDB_CODE: u32 = 9_999_999;

static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());
static IMDB_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,7}$").unwrap());

/// Messages keyed by form field, ordered by field name. Each field keeps
/// the first message reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Empty means the form passed; anything else becomes a validation error.
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// The field must contain something other than whitespace.
pub fn check_required(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "must not be empty");
    }
}

/// Required name or setting text, at most 200 characters.
pub fn check_name(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "must not be empty");
    } else if value.chars().count() > 200 {
        errors.add(field, "must not be longer than 200 characters");
    }
}

/// Optional link or note text, at most 100 characters.
pub fn check_link(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.chars().count() > 100 {
        errors.add(field, "must not be longer than 100 characters");
    }
}

/// Four digits, between [`MIN_YEAR`] and the current year.
pub fn check_year(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !YEAR_PATTERN.is_match(value) {
        errors.add(field, "must be a four-digit year");
        return;
    }
    let year = value.parse::<i32>().unwrap_or(0);
    if !(MIN_YEAR..=current_year()).contains(&year) {
        errors.add(
            field,
            format!("must be between {MIN_YEAR} and the current year"),
        );
    }
}

/// Empty means no code. Otherwise one to seven digits, at least 1.
pub fn check_imdb_code(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if !IMDB_PATTERN.is_match(value) {
        errors.add(field, "must be a number of at most seven digits");
        return;
    }
    let code = value.parse::<u32>().unwrap_or(0);
    if !(1..=MAX_IMDB_CODE).contains(&code) {
        errors.add(field, format!("must be between 1 and {MAX_IMDB_CODE}"));
    }
}

/// Start must not exceed end. Skipped while either bound has a field-level
/// problem of its own; that error is already reported against the bound.
pub fn check_year_range(errors: &mut ValidationErrors, field: &str, start: &str, end: &str) {
    if !valid_year(start) || !valid_year(end) {
        return;
    }
    let start = start.parse::<i32>().unwrap_or(0);
    let end = end.parse::<i32>().unwrap_or(0);
    if end < start {
        errors.add(field, "must not be before the start year");
    }
}

/// Required base-10 integer, strictly positive.
pub fn check_positive_int(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "must not be empty");
        return;
    }
    match value.parse::<i32>() {
        Ok(count) if count > 0 => {}
        Ok(_) => errors.add(field, "must be a positive number"),
        Err(_) => errors.add(field, "must be a number"),
    }
}

/// Required base-10 integer within an inclusive range.
pub fn check_int_range(errors: &mut ValidationErrors, field: &str, value: &str, min: i64, max: i64) {
    if value.trim().is_empty() {
        errors.add(field, "must not be empty");
        return;
    }
    match value.parse::<i64>() {
        Ok(number) if (min..=max).contains(&number) => {}
        Ok(_) => errors.add(field, format!("must be between {min} and {max}")),
        Err(_) => errors.add(field, "must be a number"),
    }
}

fn valid_year(value: &str) -> bool {
    if !YEAR_PATTERN.is_match(value) {
        return false;
    }
    let year = value.parse::<i32>().unwrap_or(0);
    (MIN_YEAR..=current_year()).contains(&year)
}

fn current_year() -> i32 {
    Utc::now().year()
}
