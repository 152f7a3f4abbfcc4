use std::fmt;
use uuid::Uuid;

/// Permission level granted to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn from_code(code: &str) -> Option<Role> {
        match code {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A registered user of the catalog. Every catalog record is scoped to
/// the account (by uuid) that created it.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Option<i64>,
    pub uuid: Uuid,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
    pub roles: Vec<Role>,
}

impl Account {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes_round_trip() {
        assert_eq!(Role::from_code("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_code("USER"), Some(Role::User));
        assert_eq!(Role::from_code("ROOT"), None);
    }

    #[test]
    fn test_has_role_checks_granted_roles() {
        let account = Account {
            id: Some(1),
            uuid: Uuid::new_v4(),
            username: "admin".to_string(),
            password_hash: String::new(),
            password_salt: String::new(),
            roles: vec![Role::Admin, Role::User],
        };

        assert!(account.has_role(Role::Admin));
        assert!(Account {
            roles: vec![Role::User],
            ..account
        }
        .has_role(Role::User));
    }
}
