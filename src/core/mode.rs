//! core::mode
//!
//! Generation mode selection.
//!
//! # Design
//!
//! A [`Mode`] selects which build-descriptor templates are emitted and
//! how the external build tool is driven. Every variant must have a
//! descriptor set in [`crate::templates`] and a build recipe in
//! [`crate::runner`]; both dispatch with an exhaustive `match`, so adding
//! a variant is a compile error until both exist.
//!
//! Names that are not a known mode produce [`ModeError::Unsupported`]
//! rather than a panic.
//!
//! # Example
//!
//! ```
//! use cmtgen::core::mode::Mode;
//!
//! let mode: Mode = "cmake".parse().unwrap();
//! assert_eq!(mode, Mode::CMake);
//! assert_eq!(mode.descriptor_file_name(), "CMakeLists.txt");
//!
//! assert!("waf".parse::<Mode>().is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from mode selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("unsupported mode '{name}', must be one of: {valid}")]
    Unsupported { name: String, valid: String },
}

/// Output strategy for descriptors and the build invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// CMake descriptors driven through the CMT CMake macros.
    #[default]
    CMake,
}

impl Mode {
    /// All implemented modes.
    pub fn all() -> &'static [Mode] {
        &[Mode::CMake]
    }

    /// The mode name as used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::CMake => "cmake",
        }
    }

    /// Parse a mode from its name (case-insensitive).
    ///
    /// Returns `None` for names that are not an implemented mode.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cmake" => Some(Mode::CMake),
            _ => None,
        }
    }

    /// File name of the build descriptor emitted at every level
    /// (root, project, package).
    pub fn descriptor_file_name(&self) -> &'static str {
        match self {
            Mode::CMake => "CMakeLists.txt",
        }
    }
}

/// Names of all implemented modes.
pub fn valid_mode_names() -> Vec<&'static str> {
    Mode::all().iter().map(Mode::name).collect()
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::parse(s).ok_or_else(|| ModeError::Unsupported {
            name: s.to_string(),
            valid: valid_mode_names().join(", "),
        })
    }
}

impl TryFrom<String> for Mode {
    type Error = ModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.name().to_string()
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
