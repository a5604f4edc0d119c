use mongoinit_db::MongoAdmin;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::settings::Settings;

pub fn init_tracing(verbosity: u8) -> anyhow::Result<()> {
    let default_filter = match verbosity {
        0 => "mongoinit=info,mongoinit_core=info,mongoinit_db=info,mongodb=warn",
        1 => "mongoinit=debug,mongoinit_core=debug,mongoinit_db=debug,mongodb=info",
        _ => "debug",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };
    let format_json = std::env::var("LOG_FORMAT").unwrap_or_default() == "json";

    // stdout is reserved for the JSON result.
    let registry = tracing_subscriber::registry().with(filter);
    if format_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }
    Ok(())
}

pub fn log_startup(settings: &Settings) {
    tracing::info!(
        event = "settings_loaded",
        uri = %redact_uri(&settings.connection.uri),
        database = %settings.user.database,
        username = %settings.user.username,
        role = %settings.role,
        skip_existing = settings.skip_existing,
        config_path = %settings.config_path,
        server_selection_timeout = ?settings.connection.server_selection_timeout,
        "Provisioning configuration loaded"
    );
}

pub fn build_backend(settings: &Settings) -> MongoAdmin {
    MongoAdmin::new(settings.connection.clone())
}

/// Hides any `user:password@` part of a connection string.
pub fn redact_uri(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };
    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://***@{}", &rest[at + 1..]),
        None => uri.to_string(),
    }
}
