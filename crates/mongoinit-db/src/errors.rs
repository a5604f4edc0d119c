//! Mapping from driver failures onto `ProvisionError`.

use mongodb::error::{Error as MongoError, ErrorKind};
use mongoinit_core::ProvisionError;

pub const UNAUTHORIZED: i32 = 13;
pub const AUTHENTICATION_FAILED: i32 = 18;
pub const DUPLICATE_KEY: i32 = 11000;
pub const USER_ALREADY_EXISTS: i32 = 51003;

/// Servers before 4.4 report an existing user as a plain duplicate key.
pub const fn is_duplicate_user_code(code: i32) -> bool {
    matches!(code, USER_ALREADY_EXISTS | DUPLICATE_KEY)
}

pub fn classify(err: &MongoError) -> ProvisionError {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => {
            classify_command(command.code, &command.code_name, &command.message)
        }
        ErrorKind::Authentication { message, .. } => ProvisionError::AuthenticationFailed {
            message: message.clone(),
        },
        ErrorKind::ServerSelection { message, .. } => ProvisionError::Unreachable {
            message: message.clone(),
        },
        ErrorKind::Io(io) => ProvisionError::Unreachable {
            message: io.to_string(),
        },
        _ => ProvisionError::Driver {
            message: err.to_string(),
        },
    }
}

pub fn classify_command(code: i32, code_name: &str, message: &str) -> ProvisionError {
    match code {
        AUTHENTICATION_FAILED => ProvisionError::AuthenticationFailed {
            message: message.to_string(),
        },
        UNAUTHORIZED => ProvisionError::Unauthorized {
            message: message.to_string(),
        },
        _ => ProvisionError::Command {
            code,
            code_name: code_name.to_string(),
            message: message.to_string(),
        },
    }
}
