use tracing::{info, instrument, warn};

use crate::backend::AdminBackend;
use crate::credentials::RootCredentials;
use crate::error::ProvisionError;
use crate::models::{NewUser, ProvisionOutcome, ProvisionStatus, UserInfo};
use crate::validate::{validate_database_name, validate_username};

#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    pub root: RootCredentials,
    pub user: NewUser,
    /// Report an existing account as `AlreadyExists` instead of failing.
    pub skip_existing: bool,
}

/// Authenticates as root, then creates the application user.
///
/// User creation is only attempted once authentication succeeded. The
/// session is closed before returning, whatever the creation result.
#[instrument(
    level = "info",
    skip_all,
    fields(database = %request.user.database, username = %request.user.username)
)]
pub async fn provision<B: AdminBackend>(
    backend: &B,
    request: &ProvisionRequest,
) -> Result<ProvisionOutcome, ProvisionError> {
    info!(event = "provision_started", root_username = %request.root.username());

    let session = backend.authenticate(&request.root).await?;
    info!(event = "authenticated", root_username = %request.root.username());

    let created = backend.create_user(&session, &request.user).await;
    backend.close(session).await;

    match created {
        Ok(()) => {
            info!(
                event = "user_created",
                roles = ?request.user.roles,
                "application user created"
            );
            Ok(ProvisionOutcome::for_user(&request.user, ProvisionStatus::Created))
        }
        Err(ProvisionError::UserExists { .. }) if request.skip_existing => {
            warn!(event = "user_exists", "application user already present; skipping");
            Ok(ProvisionOutcome::for_user(
                &request.user,
                ProvisionStatus::AlreadyExists,
            ))
        }
        Err(err) => Err(err),
    }
}

/// Authenticates as root and looks the application user up. Read only.
#[instrument(level = "info", skip(backend, root))]
pub async fn check<B: AdminBackend>(
    backend: &B,
    root: &RootCredentials,
    database: &str,
    username: &str,
) -> Result<Option<UserInfo>, ProvisionError> {
    let database = validate_database_name(database)?;
    let username = validate_username("username", username)?;

    let session = backend.authenticate(root).await?;
    let found = backend.find_user(&session, &database, &username).await;
    backend.close(session).await;
    found
}
