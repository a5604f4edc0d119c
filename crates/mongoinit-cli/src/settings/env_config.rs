use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::config::FileConfig;

pub(super) fn load_config(path: &str) -> FileConfig {
    if !Path::new(path).exists() {
        return FileConfig::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(event = "config_read_failed", path, error = %err);
            return FileConfig::default();
        }
    };
    match serde_yaml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            warn!(event = "config_parse_failed", path, error = %err);
            FileConfig::default()
        }
    }
}

/// Reads a variable, treating an empty value the same as an unset one.
pub(super) fn env_value(var_name: &str) -> Option<String> {
    env::var(var_name).ok().filter(|value| !value.is_empty())
}

/// `VAR` wins over `VAR_FILE`; file contents are trimmed and must not be empty.
pub(super) fn load_secret_env_or_file(
    var_name: &str,
    file_var_name: &str,
) -> Result<Option<String>, String> {
    if let Some(value) = env_value(var_name) {
        return Ok(Some(value));
    }
    let Some(path) = env_value(file_var_name) else {
        return Ok(None);
    };
    read_secret_file(&path)
        .map(Some)
        .map_err(|err| format!("{file_var_name} invalid: {err}"))
}

fn read_secret_file(path: &str) -> Result<String, String> {
    let value = fs::read_to_string(path)
        .map_err(|err| format!("secret file not accessible ({}): {}", path, err))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("secret file is empty ({})", path));
    }
    Ok(trimmed.to_string())
}

pub(super) fn parse_seconds(field: &'static str, value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(seconds) => positive_seconds(field, seconds),
        Err(_) => {
            warn!(event = "config_invalid", field, value = %value);
            None
        }
    }
}

/// Zero is not a usable timeout; it falls back to the driver default.
pub(super) fn positive_seconds(field: &'static str, seconds: u64) -> Option<Duration> {
    if seconds == 0 {
        warn!(event = "config_invalid", field, value = seconds);
        return None;
    }
    Some(Duration::from_secs(seconds))
}
