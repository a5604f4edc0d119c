use serde::{Deserialize, Serialize};

use crate::secrets::Secret;
use crate::validate::{validate_database_name, validate_username, ValidationError};

/// Built-in database-scoped roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Read,
    #[default]
    ReadWrite,
    DbAdmin,
    DbOwner,
    UserAdmin,
}

#[derive(Debug)]
pub struct EnumParseError {
    enum_name: &'static str,
    value: String,
}

impl EnumParseError {
    fn new(enum_name: &'static str, value: impl Into<String>) -> Self {
        Self {
            enum_name,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} value: {}", self.enum_name, self.value)
    }
}

impl std::error::Error for EnumParseError {}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::ReadWrite => "readWrite",
            Self::DbAdmin => "dbAdmin",
            Self::DbOwner => "dbOwner",
            Self::UserAdmin => "userAdmin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = EnumParseError;

    // Accepts "readWrite", "read_write", "read-write" and any casing of those.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| *ch != '_' && *ch != '-')
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "read" => Ok(Self::Read),
            "readwrite" => Ok(Self::ReadWrite),
            "dbadmin" => Ok(Self::DbAdmin),
            "dbowner" => Ok(Self::DbOwner),
            "useradmin" => Ok(Self::UserAdmin),
            _ => Err(EnumParseError::new("role", value)),
        }
    }
}

/// A role as the server stores it: a role name scoped to a database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

impl RoleGrant {
    pub fn new(role: Role, db: impl Into<String>) -> Self {
        Self {
            role: role.as_str().to_string(),
            db: db.into(),
        }
    }
}

/// Account to be created on the target database.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: Secret,
    pub database: String,
    pub roles: Vec<RoleGrant>,
}

impl NewUser {
    pub fn new(
        username: &str,
        password: Secret,
        database: &str,
        role: Role,
    ) -> Result<Self, ValidationError> {
        let username = validate_username("username", username)?;
        if password.is_blank() {
            return Err(ValidationError::Missing("password"));
        }
        let database = validate_database_name(database)?;
        let roles = vec![RoleGrant::new(role, database.as_str())];
        Ok(Self {
            username,
            password,
            database,
            roles,
        })
    }

    pub fn read_write(
        username: &str,
        password: Secret,
        database: &str,
    ) -> Result<Self, ValidationError> {
        Self::new(username, password, database, Role::ReadWrite)
    }
}

/// An existing account as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub database: String,
    pub roles: Vec<RoleGrant>,
}

impl UserInfo {
    /// True when the account holds `role` on `db` and nothing else.
    pub fn has_exactly(&self, role: Role, db: &str) -> bool {
        matches!(self.roles.as_slice(), [grant] if grant.role == role.as_str() && grant.db == db)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStatus {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionOutcome {
    pub username: String,
    pub database: String,
    pub roles: Vec<RoleGrant>,
    pub status: ProvisionStatus,
}

impl ProvisionOutcome {
    pub fn for_user(user: &NewUser, status: ProvisionStatus) -> Self {
        Self {
            username: user.username.clone(),
            database: user.database.clone(),
            roles: user.roles.clone(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_parse_accepts_common_spellings() {
        for value in ["readWrite", "readwrite", "read_write", "READ-WRITE", " readWrite "] {
            assert_eq!(Role::from_str(value).expect(value), Role::ReadWrite);
        }
        assert_eq!(Role::from_str("dbOwner").expect("dbOwner"), Role::DbOwner);
        assert!(Role::from_str("root").is_err());
    }

    #[test]
    fn role_serializes_with_server_names() {
        let json = serde_json::to_string(&Role::ReadWrite).expect("serialize");
        assert_eq!(json, "\"readWrite\"");
        assert_eq!(Role::default(), Role::ReadWrite);
    }

    #[test]
    fn read_write_user_has_single_grant_on_target() {
        let user = NewUser::read_write("app", Secret::new("apppw"), "orders").expect("user");
        assert_eq!(user.roles, vec![RoleGrant::new(Role::ReadWrite, "orders")]);
        assert_eq!(user.roles[0].role, "readWrite");
    }

    #[test]
    fn new_user_requires_every_field() {
        assert_eq!(
            NewUser::read_write("", Secret::new("pw"), "orders").expect_err("user"),
            ValidationError::Missing("username")
        );
        assert_eq!(
            NewUser::read_write("app", Secret::new(""), "orders").expect_err("password"),
            ValidationError::Missing("password")
        );
        assert_eq!(
            NewUser::read_write("app", Secret::new("pw"), " ").expect_err("database"),
            ValidationError::Missing("database")
        );
    }

    #[test]
    fn has_exactly_rejects_extra_roles() {
        let mut info = UserInfo {
            username: "app".to_string(),
            database: "orders".to_string(),
            roles: vec![RoleGrant::new(Role::ReadWrite, "orders")],
        };
        assert!(info.has_exactly(Role::ReadWrite, "orders"));
        assert!(!info.has_exactly(Role::ReadWrite, "other"));
        info.roles.push(RoleGrant::new(Role::DbAdmin, "orders"));
        assert!(!info.has_exactly(Role::ReadWrite, "orders"));
    }

    #[test]
    fn outcome_serializes_status_snake_case() {
        let user = NewUser::read_write("app", Secret::new("pw"), "orders").expect("user");
        let outcome = ProvisionOutcome::for_user(&user, ProvisionStatus::AlreadyExists);
        let value = serde_json::to_value(&outcome).expect("serialize");
        assert_eq!(value["status"], "already_exists");
        assert_eq!(value["roles"][0]["role"], "readWrite");
        assert!(value.get("password").is_none());
    }
}
