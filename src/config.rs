//! Configuration system for the admin console
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (ADMIN_CONSOLE_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Main console configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Admin backend connection
    pub server: ServerSettings,

    /// Notification behaviour
    pub ui: UiSettings,

    /// Persona board settings
    pub persona: PersonaSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Admin backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base URL the `/api/...` endpoints hang off
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Toast timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// How long a toast stays fully visible, in milliseconds
    pub toast_ms: u64,

    /// Fade-out length after the visible period, in milliseconds
    pub fade_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaSettings {
    /// Placeholder avatar service used when a persona has no image
    pub avatar_service: String,

    /// Prompt text given to freshly added personas
    pub placeholder_prompt: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            toast_ms: 3000,
            fade_ms: 300,
        }
    }
}

impl Default for PersonaSettings {
    fn default() -> Self {
        Self {
            avatar_service: "https://ui-avatars.com/api/".to_string(),
            placeholder_prompt: "Please enter a persona description...".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_files: 5,
            json_format: false,
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ConsoleConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e.message()),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        config.apply_env_overrides();
        config.expand_paths();
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            PathBuf::from("admin-console.toml"),
            dirs::config_dir()
                .map(|p| p.join("admin-console").join("config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".admin-console").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ADMIN_CONSOLE_SERVER_URL") {
            self.server.base_url = val;
        }
        if let Ok(val) = std::env::var("ADMIN_CONSOLE_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.server.timeout_secs = n;
            }
        }
        if let Ok(val) = std::env::var("ADMIN_CONSOLE_TOAST_MS") {
            if let Ok(n) = val.parse() {
                self.ui.toast_ms = n;
            }
        }
        if let Ok(val) = std::env::var("ADMIN_CONSOLE_AVATAR_SERVICE") {
            self.persona.avatar_service = val;
        }
        if let Ok(val) = std::env::var("ADMIN_CONSOLE_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("ADMIN_CONSOLE_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("ADMIN_CONSOLE_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Apply a `--server` flag on top of file and environment settings
    pub fn override_server(&mut self, base_url: &str) -> Result<()> {
        self.server.base_url = base_url.to_string();
        self.validate()
    }

    fn expand_paths(&mut self) {
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let url = &self.server.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::config_field_invalid(
                "server.base_url",
                format!("'{}' must start with http:// or https://", url),
            ));
        }
        url::Url::parse(url).map_err(|e| {
            Error::config_field_invalid("server.base_url", format!("'{}': {}", url, e))
        })?;

        if self.ui.toast_ms == 0 {
            return Err(Error::config_field_invalid(
                "ui.toast_ms",
                "toast_ms must be greater than zero",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or(std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".admin-console")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

const DEFAULT_CONFIG: &str = r#"# admin-console configuration

[server]
# Admin backend serving /api/config, /api/personas and /api/upload-image
base_url = "http://127.0.0.1:5000"

# Request timeout in seconds
timeout_secs = 10

[ui]
# Toast visibility and fade-out, in milliseconds
toast_ms = 3000
fade_ms = 300

[persona]
# Placeholder avatar service for personas without an image
avatar_service = "https://ui-avatars.com/api/"

# Prompt given to newly added personas
placeholder_prompt = "Please enter a persona description..."

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.admin-console/logs/console.log"

max_files = 5
json_format = false
"#;
