// src/repositories/account_repository.rs
//
// Account persistence

use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Account, Role};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait AccountRepository: Send + Sync {
    fn find_all(&self) -> AppResult<Vec<Account>>;
    fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Account>>;
    fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;
    fn add(&self, account: &Account) -> AppResult<i64>;
    fn update(&self, account: &Account) -> AppResult<()>;
}

pub struct SqliteAccountRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteAccountRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
        let uuid: String = row.get("uuid")?;
        let uuid = Uuid::parse_str(&uuid)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let roles: String = row.get("roles")?;
        let roles = roles
            .split(',')
            .map(Role::from_code)
            .collect::<Option<Vec<_>>>()
            .ok_or(rusqlite::Error::InvalidQuery)?;

        Ok(Account {
            id: Some(row.get("id")?),
            uuid,
            username: row.get("username")?,
            password_hash: row.get("password_hash")?,
            password_salt: row.get("password_salt")?,
            roles,
        })
    }

    fn roles_to_column(roles: &[Role]) -> String {
        roles
            .iter()
            .map(|role| role.code())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl AccountRepository for SqliteAccountRepository {
    fn find_all(&self) -> AppResult<Vec<Account>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, uuid, username, password_hash, password_salt, roles
             FROM accounts
             ORDER BY username",
        )?;

        let accounts: Vec<Account> = stmt
            .query_map([], Self::row_to_account)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Account>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, uuid, username, password_hash, password_salt, roles
             FROM accounts
             WHERE uuid = ?1",
        )?;

        match stmt.query_row(params![uuid.to_string()], Self::row_to_account) {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, uuid, username, password_hash, password_salt, roles
             FROM accounts
             WHERE username = ?1",
        )?;

        match stmt.query_row(params![username], Self::row_to_account) {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn add(&self, account: &Account) -> AppResult<i64> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO accounts (uuid, username, password_hash, password_salt, roles)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.uuid.to_string(),
                account.username,
                account.password_hash,
                account.password_salt,
                Self::roles_to_column(&account.roles),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update(&self, account: &Account) -> AppResult<()> {
        let id = account.id.ok_or(AppError::NotFound)?;
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE accounts
             SET username = ?1, password_hash = ?2, password_salt = ?3, roles = ?4
             WHERE id = ?5",
            params![
                account.username,
                account.password_hash,
                account.password_salt,
                Self::roles_to_column(&account.roles),
                id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
