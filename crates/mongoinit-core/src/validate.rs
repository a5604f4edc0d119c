//! Input checks applied before anything is sent to the server.

use thiserror::Error;

/// Characters MongoDB rejects in database names on every platform.
pub const FORBIDDEN_DATABASE_CHARS: &[char] = &['/', '\\', '.', ' ', '"', '$', '\0'];

/// Database names must be strictly shorter than this many bytes.
pub const MAX_DATABASE_NAME_BYTES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing_value: {0}")]
    Missing(&'static str),
    #[error("invalid_username: {0}")]
    InvalidUsername(String),
    #[error("invalid_database_name: {name} ({reason})")]
    InvalidDatabaseName { name: String, reason: &'static str },
}

/// Returns the trimmed value, or `Missing(field)` when nothing is left.
pub fn require_value<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed)
}

/// Usernames are taken as given: surrounding whitespace is an error, not trimmed.
pub fn validate_username(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let username = require_value(field, value)?;
    if username.len() != value.len() || username.contains('\0') {
        return Err(ValidationError::InvalidUsername(value.escape_default().to_string()));
    }
    Ok(username.to_string())
}

pub fn validate_database_name(value: &str) -> Result<String, ValidationError> {
    let name = require_value("database", value)?;
    if name.len() >= MAX_DATABASE_NAME_BYTES {
        return Err(ValidationError::InvalidDatabaseName {
            name: name.to_string(),
            reason: "too_long",
        });
    }
    if name.contains(FORBIDDEN_DATABASE_CHARS) {
        return Err(ValidationError::InvalidDatabaseName {
            name: name.escape_default().to_string(),
            reason: "forbidden_character",
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_value_trims() {
        assert_eq!(require_value("username", "  app "), Ok("app"));
        assert_eq!(
            require_value("username", "   "),
            Err(ValidationError::Missing("username"))
        );
    }

    #[test]
    fn database_name_rejects_dots_and_spaces() {
        for name in ["my.db", "my db", "a/b", "a\\b", "cash$", "quo\"te"] {
            let err = validate_database_name(name).expect_err(name);
            assert!(matches!(
                err,
                ValidationError::InvalidDatabaseName {
                    reason: "forbidden_character",
                    ..
                }
            ));
        }
    }

    #[test]
    fn database_name_length_limit() {
        let ok = "d".repeat(MAX_DATABASE_NAME_BYTES - 1);
        assert_eq!(validate_database_name(&ok).as_deref(), Ok(ok.as_str()));
        let too_long = "d".repeat(MAX_DATABASE_NAME_BYTES);
        assert!(matches!(
            validate_database_name(&too_long),
            Err(ValidationError::InvalidDatabaseName {
                reason: "too_long",
                ..
            })
        ));
    }

    #[test]
    fn username_rejects_nul() {
        assert!(matches!(
            validate_username("username", "ap\0p"),
            Err(ValidationError::InvalidUsername(_))
        ));
        assert_eq!(validate_username("username", "app").as_deref(), Ok("app"));
    }

    #[test]
    fn username_rejects_surrounding_whitespace() {
        for name in [" app", "app ", "\tapp\n"] {
            assert_eq!(
                validate_username("username", name),
                Err(ValidationError::InvalidUsername(name.escape_default().to_string()))
            );
        }
        assert_eq!(validate_username("username", "my app").as_deref(), Ok("my app"));
        assert_eq!(
            validate_username("username", "   "),
            Err(ValidationError::Missing("username"))
        );
    }
}
