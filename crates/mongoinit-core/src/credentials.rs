use crate::secrets::Secret;
use crate::validate::{validate_username, ValidationError};

/// Root account used to authenticate against the administrative database.
#[derive(Debug, Clone)]
pub struct RootCredentials {
    username: String,
    password: Secret,
}

impl RootCredentials {
    pub fn new(username: &str, password: Secret) -> Result<Self, ValidationError> {
        let username = validate_username("root_username", username)?;
        if password.is_blank() {
            return Err(ValidationError::Missing("root_password"));
        }
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Secret {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_username() {
        let err = RootCredentials::new("", Secret::new("secret")).expect_err("empty user");
        assert_eq!(err, ValidationError::Missing("root_username"));
    }

    #[test]
    fn rejects_blank_password() {
        let err = RootCredentials::new("root", Secret::new(" ")).expect_err("blank password");
        assert_eq!(err, ValidationError::Missing("root_password"));
    }

    #[test]
    fn keeps_password_verbatim() {
        let creds = RootCredentials::new("root", Secret::new(" secret ")).expect("creds");
        assert_eq!(creds.username(), "root");
        assert_eq!(creds.password().expose(), " secret ");
    }

    #[test]
    fn padded_username_is_rejected() {
        let err = RootCredentials::new(" root ", Secret::new("secret")).expect_err("padded user");
        assert!(matches!(err, ValidationError::InvalidUsername(_)));
    }
}
