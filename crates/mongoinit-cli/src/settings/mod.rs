use std::str::FromStr;

use mongoinit_core::{NewUser, Role, RootCredentials, Secret};
use mongoinit_db::{ConnectOptions, DEFAULT_APP_NAME, DEFAULT_URI};
use thiserror::Error;

use crate::config::FileConfig;

mod env_config;

pub const ROOT_USERNAME_ENV: &str = "MONGO_INITDB_ROOT_USERNAME";
pub const ROOT_PASSWORD_ENV: &str = "MONGO_INITDB_ROOT_PASSWORD";
pub const APP_USERNAME_ENV: &str = "DB_USER";
pub const APP_PASSWORD_ENV: &str = "DB_PASS";
pub const DATABASE_ENV: &str = "MONGO_INITDB_DATABASE";
pub const SERVER_SELECTION_TIMEOUT_ENV: &str = "MONGOINIT_SERVER_SELECTION_TIMEOUT_SECONDS";
pub const DEFAULT_CONFIG_PATH: &str = "mongoinit.yaml";

/// Serializes tests that read or mutate process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Values taken from the command line. Flags win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub uri: Option<String>,
    pub config_path: Option<String>,
    pub role: Option<Role>,
    pub skip_existing: Option<bool>,
}

#[derive(Debug)]
pub struct Settings {
    pub connection: ConnectOptions,
    pub root: RootCredentials,
    pub user: NewUser,
    pub role: Role,
    pub skip_existing: bool,
    pub config_path: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("required configuration missing: {}", .0.join("; "))]
    Missing(Vec<String>),
    #[error("invalid configuration {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl Settings {
    pub fn load(overrides: &Overrides) -> Result<Self, SettingsError> {
        let config_path = overrides
            .config_path
            .clone()
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let config = env_config::load_config(&config_path);

        let mut missing = Vec::new();
        let root_username = required_secret(ROOT_USERNAME_ENV, &mut missing);
        let root_password = required_secret(ROOT_PASSWORD_ENV, &mut missing);
        let app_username = required_secret(APP_USERNAME_ENV, &mut missing);
        let app_password = required_secret(APP_PASSWORD_ENV, &mut missing);
        let database = env_config::env_value(DATABASE_ENV);
        if database.is_none() {
            missing.push(format!("{DATABASE_ENV} is required (target database)"));
        }
        let (
            Some(root_username),
            Some(root_password),
            Some(app_username),
            Some(app_password),
            Some(database),
        ) = (root_username, root_password, app_username, app_password, database)
        else {
            return Err(SettingsError::Missing(missing));
        };

        let role = resolve_role(overrides, &config)?;
        let root = RootCredentials::new(&root_username, Secret::new(root_password)).map_err(
            |err| SettingsError::Invalid {
                field: ROOT_USERNAME_ENV,
                message: err.to_string(),
            },
        )?;
        let user = NewUser::new(&app_username, Secret::new(app_password), &database, role)
            .map_err(|err| SettingsError::Invalid {
                field: "application user",
                message: err.to_string(),
            })?;

        Ok(Self {
            connection: connect_options(overrides, &config),
            root,
            user,
            role,
            skip_existing: overrides
                .skip_existing
                .unwrap_or(config.provision.skip_existing),
            config_path,
        })
    }
}

fn required_secret(var_name: &'static str, missing: &mut Vec<String>) -> Option<String> {
    let file_var_name = format!("{var_name}_FILE");
    match env_config::load_secret_env_or_file(var_name, &file_var_name) {
        Ok(Some(value)) if !value.trim().is_empty() => Some(value),
        Ok(_) => {
            missing.push(format!("{var_name} or {file_var_name} is required"));
            None
        }
        Err(err) => {
            missing.push(err);
            None
        }
    }
}

fn resolve_role(overrides: &Overrides, config: &FileConfig) -> Result<Role, SettingsError> {
    if let Some(role) = overrides.role {
        return Ok(role);
    }
    match config.provision.role.as_deref() {
        Some(value) => Role::from_str(value).map_err(|err| SettingsError::Invalid {
            field: "provision.role",
            message: err.to_string(),
        }),
        None => Ok(Role::default()),
    }
}

fn connect_options(overrides: &Overrides, config: &FileConfig) -> ConnectOptions {
    let uri = overrides
        .uri
        .clone()
        .or_else(|| config.connection.uri.clone())
        .unwrap_or_else(|| DEFAULT_URI.to_string());
    let app_name = config
        .connection
        .app_name
        .clone()
        .or_else(|| Some(DEFAULT_APP_NAME.to_string()));
    let server_selection_timeout = env_config::env_value(SERVER_SELECTION_TIMEOUT_ENV)
        .and_then(|value| env_config::parse_seconds(SERVER_SELECTION_TIMEOUT_ENV, &value))
        .or_else(|| {
            config
                .connection
                .server_selection_timeout_seconds
                .and_then(|seconds| {
                    env_config::positive_seconds(
                        "connection.server_selection_timeout_seconds",
                        seconds,
                    )
                })
        });
    let connect_timeout = config
        .connection
        .connect_timeout_seconds
        .and_then(|seconds| {
            env_config::positive_seconds("connection.connect_timeout_seconds", seconds)
        });

    ConnectOptions {
        uri,
        app_name,
        server_selection_timeout,
        connect_timeout,
    }
}
