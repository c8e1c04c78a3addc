//! tree::writer
//!
//! The single place generated-tree side effects happen.
//!
//! Every directory creation, removal, and file write made by the
//! pipeline goes through [`TreeWriter`], which attaches the operation and
//! path to any I/O error and reports each action at debug verbosity.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::{FsOp, GenError};
use crate::core::mode::Mode;
use crate::core::paths::TreePaths;
use crate::ui::output::Output;

/// Writes the generated tree under a root.
#[derive(Debug, Clone)]
pub struct TreeWriter {
    paths: TreePaths,
    mode: Mode,
    output: Output,
}

impl TreeWriter {
    pub fn new(paths: TreePaths, mode: Mode, output: Output) -> Self {
        Self {
            paths,
            mode,
            output,
        }
    }

    pub fn paths(&self) -> &TreePaths {
        &self.paths
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn output(&self) -> Output {
        self.output
    }

    /// Create a directory and any missing parents.
    pub fn mkdir(&self, path: &Path) -> Result<(), GenError> {
        self.output
            .debug(format_args!("> mkdir [{}]", self.paths.relative(path).display()));
        fs::create_dir_all(path).map_err(|source| GenError::Io {
            op: FsOp::CreateDir,
            path: path.to_path_buf(),
            source,
        })
    }

    /// Remove a directory tree. A missing directory is not an error.
    pub fn remove_dir(&self, path: &Path) -> Result<(), GenError> {
        self.output
            .debug(format_args!("> rmdir [{}]", self.paths.relative(path).display()));
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(GenError::Io {
                op: FsOp::Remove,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Create (or truncate) a file and write `contents` to it.
    pub fn write(&self, path: &Path, contents: &str) -> Result<(), GenError> {
        self.output
            .debug(format_args!("> gen [{}]", self.paths.relative(path).display()));
        fs::write(path, contents).map_err(|source| GenError::Io {
            op: FsOp::Write,
            path: path.to_path_buf(),
            source,
        })
    }
}
