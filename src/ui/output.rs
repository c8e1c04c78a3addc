//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! There is no process-wide verbosity flag. Callers build an [`Output`]
//! from the CLI flags and hand it to whatever needs to report progress
//! (the generator, projects, packages, the build runner). Two generators
//! in the same process can therefore log at different levels.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    #[default]
    Normal,
    /// Debug mode - verbose output, build tool output forwarded
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Output sink passed through the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Output {
    verbosity: Verbosity,
}

impl Output {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// An output that prints nothing but errors.
    pub fn quiet() -> Self {
        Self::new(Verbosity::Quiet)
    }

    /// Whether child process output should be forwarded to ours.
    pub fn forwards_tool_output(&self) -> bool {
        self.verbosity == Verbosity::Debug
    }

    /// Print a message (respects quiet mode).
    pub fn print(&self, message: impl Display) {
        print(message, self.verbosity);
    }

    /// Print a debug message (only in debug mode).
    pub fn debug(&self, message: impl Display) {
        debug(message, self.verbosity);
    }

    /// Print a warning message (respects quiet mode).
    pub fn warn(&self, message: impl Display) {
        warn(message, self.verbosity);
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn only_debug_forwards_tool_output() {
        assert!(Output::new(Verbosity::Debug).forwards_tool_output());
        assert!(!Output::new(Verbosity::Normal).forwards_tool_output());
        assert!(!Output::quiet().forwards_tool_output());
    }
}
