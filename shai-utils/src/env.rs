use std::env;

use tracing::warn;

use crate::parse::parse_bool_flag;

/// Read a boolean flag, falling back to `default` when the variable is unset.
pub fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => parse_bool_flag(&value),
        Err(_) => default,
    }
}

/// Read an unsigned integer, falling back to `default` when unset or unparsable.
pub fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(env_key = key, value = %value, default, "ignoring unparsable integer");
                default
            }
        },
        Err(_) => default,
    }
}

/// Read a trimmed, non-empty string.
pub fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Read a trimmed, non-empty string or fall back to `default`.
pub fn env_string_or(key: &str, default: &str) -> String {
    env_string(key).unwrap_or_else(|| default.to_owned())
}
