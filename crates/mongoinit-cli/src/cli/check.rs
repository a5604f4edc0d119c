use mongoinit_core::{check, AdminBackend, Role, UserInfo};

use crate::settings::Settings;

pub async fn run<B: AdminBackend>(settings: &Settings, backend: &B) -> anyhow::Result<()> {
    let database = settings.user.database.as_str();
    let username = settings.user.username.as_str();
    let found = check(backend, &settings.root, database, username)
        .await
        .map_err(|err| {
            tracing::error!(event = "check_failed", reason = err.kind(), error = %err);
            err
        })?;
    println!("{}", serde_json::to_string_pretty(&found)?);
    verify(found.as_ref(), settings.role, database, username)
}

pub(crate) fn verify(
    found: Option<&UserInfo>,
    role: Role,
    database: &str,
    username: &str,
) -> anyhow::Result<()> {
    match found {
        Some(info) if info.has_exactly(role, database) => {
            tracing::info!(event = "user_verified", database, username, %role);
            Ok(())
        }
        Some(info) => {
            anyhow::bail!(
                "user {username}@{database} has roles {:?}, expected only {role}@{database}",
                info.roles
            )
        }
        None => anyhow::bail!("user {username}@{database} not found"),
    }
}
