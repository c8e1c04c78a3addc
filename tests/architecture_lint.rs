//! Architecture enforcement tests.
//!
//! Every filesystem mutation of a generated tree must go through
//! `tree::writer::TreeWriter`, and templates must stay pure renderers.
//! These tests scan the non-test portion of each source file so that
//! violations are caught in CI.

use std::fs;
use std::path::{Path, PathBuf};

/// Calls that mutate the filesystem.
const MUTATING_CALLS: &[&str] = &[
    "fs::write(",
    "fs::create_dir(",
    "fs::create_dir_all(",
    "fs::remove_dir_all(",
    "fs::remove_file(",
    "fs::rename(",
    "File::create(",
];

/// Files allowed to mutate the filesystem directly.
///
/// - `tree/writer.rs` - the single writer for generated trees
/// - `core/config/mod.rs` - config file writes, outside any generated tree
const ALLOWED_MUTATORS: &[&str] = &["tree/writer.rs", "core/config/mod.rs"];

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            rust_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            out.push(path);
        }
    }
}

/// Source text up to the first `#[cfg(test)]` module.
fn non_test_source(path: &Path) -> String {
    let text = fs::read_to_string(path).unwrap();
    match text.find("#[cfg(test)]") {
        Some(pos) => text[..pos].to_string(),
        None => text,
    }
}

fn relative(path: &Path) -> String {
    path.strip_prefix(src_dir())
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/")
}

#[test]
fn only_the_writer_mutates_the_filesystem() {
    let mut files = Vec::new();
    rust_files(&src_dir(), &mut files);

    let mut violations = Vec::new();
    for file in &files {
        let rel = relative(file);
        if ALLOWED_MUTATORS.contains(&rel.as_str()) {
            continue;
        }
        let source = non_test_source(file);
        for call in MUTATING_CALLS {
            if source.contains(call) {
                violations.push(format!("{}: {}", rel, call));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "filesystem mutations outside the writer:\n{}",
        violations.join("\n")
    );
}

#[test]
fn templates_do_not_touch_the_filesystem() {
    let mut files = Vec::new();
    rust_files(&src_dir().join("templates"), &mut files);
    assert!(!files.is_empty());

    for file in &files {
        let source = non_test_source(file);
        assert!(
            !source.contains("std::fs") && !source.contains("std::io"),
            "{} performs I/O",
            relative(file)
        );
    }
}

#[test]
fn generator_construction_does_not_write() {
    let source = non_test_source(&src_dir().join("tree/generator.rs"));
    let new_fn = source
        .split("pub fn new<")
        .nth(1)
        .and_then(|rest| rest.split("pub fn with_output").next())
        .unwrap();

    assert!(!new_fn.contains("TreeWriter"));
    assert!(!new_fn.contains(".writer()"));
}
