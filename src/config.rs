use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_backend")]
    pub backend: SessionBackend,
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_session_backend(),
            path: default_session_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    #[default]
    File,
    Memory,
}

impl std::fmt::Display for SessionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for SessionBackend {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("Unknown session backend: {s}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_session_backend() -> SessionBackend {
    SessionBackend::File
}
fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolforge")
        .join("session")
}
fn default_log_level() -> String {
    "info".to_string()
}

// ---------------------------------------------------------------------------
// Config loading and env overrides
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a TOML file, then apply environment variable
    /// overrides. Any setting prefixed with `TOOLFORGE_` takes precedence
    /// over the file value.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            config
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Build the session store selected by `[session]`.
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        match self.session.backend {
            SessionBackend::File => Arc::new(FileSessionStore::new(&self.session.path)),
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        }
    }

    fn apply_env_overrides(&mut self) {
        macro_rules! env_str {
            ($env:expr, $field:expr) => {
                if let Ok(val) = std::env::var($env) {
                    $field = val;
                }
            };
        }
        macro_rules! env_bool {
            ($env:expr, $field:expr) => {
                if let Ok(val) = std::env::var($env) {
                    $field = matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
                }
            };
        }
        macro_rules! env_parse {
            ($env:expr, $field:expr) => {
                if let Ok(val) = std::env::var($env) {
                    if let Ok(parsed) = val.parse() {
                        $field = parsed;
                    }
                }
            };
        }

        env_str!("TOOLFORGE_API_BASE_URL", self.api.base_url);
        env_parse!("TOOLFORGE_SESSION_BACKEND", self.session.backend);
        if let Ok(val) = std::env::var("TOOLFORGE_SESSION_PATH") {
            self.session.path = PathBuf::from(val);
        }
        env_str!("TOOLFORGE_LOG_LEVEL", self.logging.level);
        env_bool!("TOOLFORGE_LOG_JSON", self.logging.json);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// Helper for the default session directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session.backend, SessionBackend::File);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_session_backend_from_str() {
        assert_eq!("file".parse::<SessionBackend>().unwrap(), SessionBackend::File);
        assert_eq!("memory".parse::<SessionBackend>().unwrap(), SessionBackend::Memory);
        assert!("unknown".parse::<SessionBackend>().is_err());
    }

    #[test]
    fn test_session_backend_display() {
        assert_eq!(SessionBackend::File.to_string(), "file");
        assert_eq!(SessionBackend::Memory.to_string(), "memory");
    }

    #[test]
    fn test_env_overrides_apply() {
        // SAFETY: Tests are run sequentially for env-mutating tests.
        unsafe {
            std::env::set_var("TOOLFORGE_API_BASE_URL", "http://other.test/api");
            std::env::set_var("TOOLFORGE_SESSION_BACKEND", "memory");
            std::env::set_var("TOOLFORGE_LOG_LEVEL", "debug");
            std::env::set_var("TOOLFORGE_LOG_JSON", "true");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.api.base_url, "http://other.test/api");
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);

        unsafe {
            std::env::remove_var("TOOLFORGE_API_BASE_URL");
            std::env::remove_var("TOOLFORGE_SESSION_BACKEND");
            std::env::remove_var("TOOLFORGE_LOG_LEVEL");
            std::env::remove_var("TOOLFORGE_LOG_JSON");
        }
    }

    #[test]
    fn test_config_load_missing_file() {
        let path = Path::new("/tmp/nonexistent_toolforge_config_test.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://localhost:9000/api"

[session]
backend = "memory"

[logging]
level = "debug"
json = true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api");
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_session_store_matches_backend() {
        let mut config = Config::default();
        config.session.backend = SessionBackend::Memory;
        assert_eq!(config.session_store().name(), "memory");

        config.session.backend = SessionBackend::File;
        assert_eq!(config.session_store().name(), "file");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.session.backend, config.session.backend);
    }
}
