//! Configuration management for Quill.
//!
//! Loads configuration from ${QUILL_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for Quill configuration and data directories.
    //!
    //! QUILL_HOME resolution order:
    //! 1. QUILL_HOME environment variable (if set)
    //! 2. ~/.config/quill (default)

    use std::path::PathBuf;

    /// Returns the Quill home directory.
    ///
    /// Checks QUILL_HOME env var first, falls back to ~/.config/quill
    pub fn quill_home() -> PathBuf {
        if let Ok(home) = std::env::var("QUILL_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("quill"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        quill_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        quill_home().join("session.json")
    }

    /// Returns the directory for diagnostic log files.
    pub fn logs_dir() -> PathBuf {
        quill_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the blog backend.
    pub backend_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: Config::DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl Config {
    pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };

        config.backend_url = resolve_backend_url(&config.backend_url)?;
        Ok(config)
    }

    /// Base URL for backend-hosted image assets.
    ///
    /// Post photos are served from a fixed path under the backend host.
    pub fn images_url(&self) -> String {
        format!("{}/images", self.backend_url.trim_end_matches('/'))
    }
}

/// Resolves the backend base URL with precedence: env > config > default.
///
/// `QUILL_BACKEND_URL` overrides whatever the config file says, which is how
/// tests point the client at a mock server.
fn resolve_backend_url(config_url: &str) -> Result<String> {
    if let Ok(env_url) = std::env::var("QUILL_BACKEND_URL") {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }
    }

    let trimmed = config_url.trim();
    if trimmed.is_empty() {
        return Ok(Config::DEFAULT_BACKEND_URL.to_string());
    }
    validate_url(trimmed)?;
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Validates that a URL is well-formed.
fn validate_url(raw: &str) -> Result<()> {
    url::Url::parse(raw).with_context(|| format!("Invalid backend URL: {raw}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.backend_url, Config::DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "backend_url = \"http://blog.example.com:5000/\"").unwrap();

        let config = Config::load_from(&path).unwrap();
        // Trailing slash is normalized away so path joining stays simple.
        assert_eq!(config.backend_url, "http://blog.example.com:5000");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend_url = \"not a url\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_images_url() {
        let config = Config {
            backend_url: "http://localhost:5000".to_string(),
        };
        assert_eq!(config.images_url(), "http://localhost:5000/images");
    }
}
