// src/forms/time_form.rs

use serde::{Deserialize, Serialize};

use crate::domain::Time;
use crate::error::AppResult;
use crate::forms::validation::{check_int_range, ValidationErrors};
use crate::forms::parse_field;

/// Length input split into three text fields, shared by every form that
/// carries a running time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeForm {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl TimeForm {
    pub fn from_time(time: Time) -> TimeForm {
        TimeForm {
            hours: time.hours().to_string(),
            minutes: time.minutes().to_string(),
            seconds: time.seconds().to_string(),
        }
    }

    pub fn to_time(&self) -> AppResult<Time> {
        Ok(Time::from_parts(
            parse_field("hours", &self.hours)?,
            parse_field("minutes", &self.minutes)?,
            parse_field("seconds", &self.seconds)?,
        ))
    }

    /// Checks the three parts under `prefix`, e.g. `length.hours`.
    pub fn validate_into(&self, errors: &mut ValidationErrors, prefix: &str) {
        check_int_range(errors, &format!("{prefix}.hours"), &self.hours, 0, 23);
        check_int_range(errors, &format!("{prefix}.minutes"), &self.minutes, 0, 59);
        check_int_range(errors, &format!("{prefix}.seconds"), &self.seconds, 0, 59);
    }
}
