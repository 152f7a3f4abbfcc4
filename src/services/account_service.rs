// src/services/account_service.rs
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Account, Role};
use crate::error::{AppError, AppResult};
use crate::forms::{RegistrationForm, ValidationErrors};
use crate::repositories::AccountRepository;

/// Account registration and lookup. Passwords are stored as salted
/// SHA-256 hex digests; the salt is a fresh uuid per account.
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    /// Creates an account with the USER role. The username must not be
    /// taken; that violation is reported like any other field error.
    pub fn register(&self, form: &RegistrationForm) -> AppResult<Account> {
        form.validate()?;

        if self.repository.find_by_username(&form.username)?.is_some() {
            let mut errors = ValidationErrors::new();
            errors.add("username", "is already taken");
            return Err(AppError::Validation(errors));
        }

        let salt = Uuid::new_v4().simple().to_string();
        let mut account = Account {
            id: None,
            uuid: Uuid::new_v4(),
            username: form.username.clone(),
            password_hash: hash_password(&form.password, &salt),
            password_salt: salt,
            roles: vec![Role::User],
        };

        let id = self.repository.add(&account)?;
        account.id = Some(id);
        log::info!("Registered account {id}");
        Ok(account)
    }

    /// Looks the account up and checks the password against the stored
    /// hash. Unknown usernames and wrong passwords fail the same way.
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<Account> {
        let account = self
            .repository
            .find_by_username(username)?
            .ok_or(AppError::NotFound)?;

        if hash_password(password, &account.password_salt) != account.password_hash {
            return Err(AppError::NotFound);
        }

        Ok(account)
    }

    pub fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Account> {
        self.repository
            .find_by_uuid(uuid)?
            .ok_or(AppError::NotFound)
    }

    pub fn list(&self) -> AppResult<Vec<Account>> {
        self.repository.find_all()
    }

    /// Replaces the granted roles. An account always keeps at least one.
    pub fn update_roles(&self, uuid: Uuid, roles: Vec<Role>) -> AppResult<()> {
        if roles.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("roles", "must not be empty");
            return Err(AppError::Validation(errors));
        }

        let mut account = self.find_by_uuid(uuid)?;
        account.roles = roles;
        self.repository.update(&account)
    }
}

fn hash_password(password: &str, salt: &str) -> String {
    let digest = Sha256::digest(format!("{salt}{password}").as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
