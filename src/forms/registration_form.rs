// src/forms/registration_form.rs

use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::forms::validation::{check_name, check_required, ValidationErrors};

/// New account form. Uniqueness of the username is checked against the
/// store by the account service, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = ValidationErrors::new();
        check_name(&mut errors, "username", &self.username);
        check_required(&mut errors, "password", &self.password);
        check_required(&mut errors, "confirmPassword", &self.confirm_password);
        if !self.password.trim().is_empty()
            && !self.confirm_password.trim().is_empty()
            && self.password != self.confirm_password
        {
            errors.add("confirmPassword", "must match the password");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn form(username: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_matching_passwords_pass() {
        assert!(form("alice", "secret", "secret").validate().is_ok());
    }

    #[test]
    fn test_mismatched_passwords_are_rejected() {
        let err = form("alice", "secret", "other").validate().unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.get("confirmPassword"), Some("must match the password"));
            }
            other => panic!("expected validation errors, got {other}"),
        }
    }

    #[test]
    fn test_match_check_deferred_while_a_field_is_empty() {
        let err = form("alice", "secret", "").validate().unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.get("confirmPassword"), Some("must not be empty"));
            }
            other => panic!("expected validation errors, got {other}"),
        }
    }
}
