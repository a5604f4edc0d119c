//! User management commands and their replies.

use mongodb::bson::{doc, Bson, Document};
use mongoinit_core::{NewUser, ProvisionError, RoleGrant, UserInfo};
use serde::Deserialize;

use crate::errors::is_duplicate_user_code;

pub fn create_user_command(user: &NewUser) -> Document {
    let roles = user
        .roles
        .iter()
        .map(|grant| Bson::Document(doc! { "role": grant.role.as_str(), "db": grant.db.as_str() }))
        .collect::<Vec<_>>();
    doc! {
        "createUser": user.username.as_str(),
        "pwd": user.password.expose(),
        "roles": Bson::Array(roles),
    }
}

pub fn users_info_command(database: &str, username: &str) -> Document {
    doc! {
        "usersInfo": { "user": username, "db": database },
    }
}

/// Turns a duplicate-key style command failure into `UserExists`.
pub fn create_user_error(err: ProvisionError, user: &NewUser) -> ProvisionError {
    match err {
        ProvisionError::Command { code, .. } if is_duplicate_user_code(code) => {
            ProvisionError::UserExists {
                username: user.username.clone(),
                database: user.database.clone(),
            }
        }
        other => other,
    }
}

#[derive(Debug, Deserialize)]
struct UsersInfoReply {
    #[serde(default)]
    users: Vec<UsersInfoEntry>,
}

#[derive(Debug, Deserialize)]
struct UsersInfoEntry {
    user: String,
    db: String,
    #[serde(default)]
    roles: Vec<RoleGrant>,
}

pub fn parse_users_info(reply: Document) -> Result<Option<UserInfo>, ProvisionError> {
    let reply: UsersInfoReply =
        mongodb::bson::from_document(reply).map_err(|err| ProvisionError::Driver {
            message: format!("unexpected usersInfo reply: {err}"),
        })?;
    Ok(reply.users.into_iter().next().map(|entry| UserInfo {
        username: entry.user,
        database: entry.db,
        roles: entry.roles,
    }))
}
