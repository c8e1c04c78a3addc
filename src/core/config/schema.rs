//! core::config::schema
//!
//! Configuration file schema.
//!
//! Every key is optional; an absent key falls back to the built-in
//! default, and a CLI flag overrides either.
//!
//! # Validation
//!
//! Values are validated after parsing: the mode must be supported, the
//! package count positive, the output directory non-empty, and each uses
//! entry well formed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::mode::Mode;
use crate::core::uses::UsesList;

/// Contents of a config file.
///
/// # Example
///
/// ```toml
/// mode = "cmake"
/// projects = 2
/// packages = 10
/// uses = ["Pkg_0001", "Proj_0000"]
/// dir = "/tmp/cmt-bench"
/// seed = 42
/// cmt_root = "/opt/cmt"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Build system flavor (e.g., "cmake")
    pub mode: Option<String>,

    /// Number of projects
    pub projects: Option<usize>,

    /// Maximum packages per project
    pub packages: Option<usize>,

    /// Uses list entries
    pub uses: Option<Vec<String>>,

    /// Output root
    pub dir: Option<PathBuf>,

    /// RNG seed for package counts and prefixes
    pub seed: Option<u64>,

    /// CMT macros location, exported as CMTROOT to the build
    pub cmt_root: Option<PathBuf>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(mode) = &self.mode {
            mode.parse::<Mode>()
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if self.packages == Some(0) {
            return Err(ConfigError::InvalidValue(
                "packages must be at least 1".to_string(),
            ));
        }

        if let Some(dir) = &self.dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue("dir cannot be empty".to_string()));
            }
        }

        if let Some(uses) = &self.uses {
            UsesList::from_entries(uses)
                .map_err(|e| ConfigError::InvalidValue(format!("invalid uses entry: {}", e)))?;
        }

        if let Some(cmt_root) = &self.cmt_root {
            if cmt_root.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "cmt_root cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
