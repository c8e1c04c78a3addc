//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order; the first existing file wins:
//! 1. `--config <path>` (must exist)
//! 2. `$CMTGEN_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/cmtgen/config.toml`
//! 4. `~/.cmtgen/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use cmtgen::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("mode: {}", config.mode());
//! println!("packages per project: up to {}", config.packages());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::mode::Mode;
use crate::core::uses::UsesList;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CMTGEN_CONFIG";

/// Default number of projects.
pub const DEFAULT_PROJECTS: usize = 1;

/// Default maximum packages per project.
pub const DEFAULT_PACKAGES: usize = 5;

/// Default output root, relative to the working directory.
pub const DEFAULT_DIR: &str = "test";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config file '{0}' already exists")]
    AlreadyExists(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Effective configuration from defaults and the config file.
///
/// Accessors apply the defaults for keys the file leaves out.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (all defaults if no file was found)
    pub file: FileConfig,
    /// Path the file was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// An `explicit` path must exist; otherwise the standard locations
    /// are searched and a missing file means defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read,
    /// parsed, or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let candidates = search_paths(
            std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        );

        match candidates.into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load and validate one config file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let file = Self::read_config(path)?;
        file.validate()?;
        Ok(Config {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for the config file.
    ///
    /// Returns `~/.cmtgen/config.toml`.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".cmtgen/config.toml"))
    }

    /// Write a config file atomically, refusing to replace an existing one.
    ///
    /// Creates parent directories if needed.
    pub fn write_new(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        config.validate()?;
        Self::write_config_atomic(path, config)
    }

    fn write_config_atomic(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        // Same directory, so the rename cannot cross filesystems.
        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Build system flavor. Defaults to CMake.
    pub fn mode(&self) -> Mode {
        self.file
            .mode
            .as_deref()
            .and_then(Mode::parse)
            .unwrap_or_default()
    }

    /// Number of projects. Defaults to 1.
    pub fn projects(&self) -> usize {
        self.file.projects.unwrap_or(DEFAULT_PROJECTS)
    }

    /// Maximum packages per project. Defaults to 5.
    pub fn packages(&self) -> usize {
        self.file.packages.unwrap_or(DEFAULT_PACKAGES)
    }

    /// Uses list. Defaults to empty.
    pub fn uses(&self) -> UsesList {
        self.file
            .uses
            .as_ref()
            .and_then(|entries| UsesList::from_entries(entries).ok())
            .unwrap_or_default()
    }

    /// Output root. Defaults to `test`.
    pub fn dir(&self) -> PathBuf {
        self.file
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR))
    }

    /// RNG seed, if pinned.
    pub fn seed(&self) -> Option<u64> {
        self.file.seed
    }

    /// CMT macros location, if configured.
    pub fn cmt_root(&self) -> Option<&Path> {
        self.file.cmt_root.as_deref()
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Candidate config locations, in search order.
fn search_paths(
    env_config: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    paths.extend(env_config.filter(|p| !p.as_os_str().is_empty()));
    paths.extend(
        xdg_config_home
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.join("cmtgen/config.toml")),
    );
    paths.extend(home.map(|h| h.join(".cmtgen/config.toml")));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let config = Config::default();

        assert_eq!(config.mode(), Mode::CMake);
        assert_eq!(config.projects(), 1);
        assert_eq!(config.packages(), 5);
        assert!(config.uses().is_empty());
        assert_eq!(config.dir(), PathBuf::from("test"));
        assert!(config.seed().is_none());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bench.toml");
        fs::write(
            &path,
            r#"
            projects = 3
            packages = 8
            uses = ["Pkg_0001"]
            seed = 7
            "#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.projects(), 3);
        assert_eq!(config.packages(), 8);
        assert_eq!(config.uses().len(), 1);
        assert_eq!(config.seed(), Some(7));
        assert_eq!(config.dir(), PathBuf::from("test"));
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn explicit_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(Some(&temp.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "packages = 0").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "parallel = true").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn search_order() {
        let paths = search_paths(
            Some(PathBuf::from("/env/config.toml")),
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/home/u")),
        );
        assert_eq!(
            paths,
            [
                PathBuf::from("/env/config.toml"),
                PathBuf::from("/xdg/cmtgen/config.toml"),
                PathBuf::from("/home/u/.cmtgen/config.toml"),
            ]
        );
    }

    #[test]
    fn search_skips_empty_env_values() {
        let paths = search_paths(Some(PathBuf::new()), Some(PathBuf::new()), None);
        assert!(paths.is_empty());
    }

    #[test]
    fn write_new_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");
        let file = FileConfig {
            packages: Some(4),
            dir: Some(PathBuf::from("/tmp/bench")),
            ..Default::default()
        };

        Config::write_new(&path, &file).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.file, file);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn write_new_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let result = Config::write_new(&path, &FileConfig::default());
        assert!(matches!(result, Err(ConfigError::AlreadyExists(_))));
    }
}
