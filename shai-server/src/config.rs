use std::path::PathBuf;

use shai_utils::env::{env_bool, env_string, env_string_or, env_u64};

/// Where history records are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryBackendKind {
    Memory,
    File,
    Redis,
}

impl HistoryBackendKind {
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "file" => Some(Self::File),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }
}

/// Runtime settings read from the environment (after `.env` is loaded).
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    pub web_dir: Option<PathBuf>,
    /// Raw `HISTORY_BACKEND` value, kept so an unknown name can be reported.
    pub history_backend: String,
    pub history_dir: PathBuf,
    pub history_key_prefix: String,
    pub redis_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = u16::try_from(env_u64("PORT", 5000)).unwrap_or(5000);

        Self {
            host: env_string_or("HOST", "0.0.0.0"),
            port,
            cors_enabled: env_bool("CORS_ENABLED", true),
            web_dir: env_string("WEB_DIR").map(PathBuf::from),
            history_backend: env_string_or("HISTORY_BACKEND", "memory"),
            history_dir: PathBuf::from(env_string_or("HISTORY_DIR", "data/history")),
            history_key_prefix: env_string_or("HISTORY_KEY_PREFIX", "shai:prod"),
            redis_url: env_string("REDIS_URL"),
        }
    }

    pub fn history_backend_kind(&self) -> Option<HistoryBackendKind> {
        HistoryBackendKind::from_str(&self.history_backend)
    }
}
