//! Configuration management for version-helper

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Repository-relative artifact locations
    pub paths: PathsConfig,
    /// Changelog rendering settings
    pub changelog: ChangelogConfig,
    /// Dockerfile settings
    pub docker: DockerConfig,
}

/// Locations of the files touched by a release, relative to the repository root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// CMake file holding the `SET(VERSION_*)` constants
    pub version_file: PathBuf,
    /// Changelog template with `@PLACEHOLDER@` tokens
    pub changelog_template: PathBuf,
    /// Rendered changelog
    pub changelog: PathBuf,
    /// Directory the contributors script runs in
    pub contributors_dir: PathBuf,
    /// Contributors script, relative to `contributors_dir`
    pub contributors_script: String,
    /// Glob selecting the Dockerfiles to rewrite
    pub dockerfile_glob: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            version_file: PathBuf::from("cmake/autogenerated_versions.txt"),
            changelog_template: PathBuf::from("debian/changelog.in"),
            changelog: PathBuf::from("debian/changelog"),
            contributors_dir: PathBuf::from("src/Storages/System"),
            contributors_script: "./StorageSystemContributors.sh".to_string(),
            dockerfile_glob: "docker/*/Dockerfile".to_string(),
        }
    }
}

/// Changelog identity and date settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Value for `@AUTHOR@`
    pub author: String,
    /// Value for `@EMAIL@`
    pub email: String,
    /// Fixed UTC offset used for `@DATE@`
    pub utc_offset_hours: i32,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            author: "clickhouse-release".to_string(),
            email: "clickhouse-release@yandex-team.ru".to_string(),
            utc_offset_hours: 3,
        }
    }
}

/// Dockerfile configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DockerConfig {
    /// Name of the build argument carrying the version
    pub version_arg: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            version_arg: "version".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a path string
    pub fn load_from(path: &str) -> crate::Result<Self> {
        Self::load(std::path::Path::new(path))
    }

    /// Load configuration from the default location or create default
    pub fn load_or_default() -> Self {
        // Try ~/.config/version-helper/config.toml
        if let Ok(config_path) = Self::default_path() {
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Ignoring {}: {}", config_path.display(), e),
                }
            }
        }
        Self::default()
    }

    /// Get the default configuration path
    pub fn default_path() -> crate::Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("version-helper").join("config.toml"))
            .ok_or_else(|| crate::Error::Config("Could not determine config directory".to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| crate::Error::filesystem(parent, e))?;
        }

        crate::fsutil::write_atomic(path, &content)
    }
}
