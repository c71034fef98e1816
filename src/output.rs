//! Verbosity-aware diagnostic output for vault-field.
//!
//! Field values themselves never go through these macros: they are written
//! through a [`crate::ui::Ui`] so scripts get exactly the raw value on stdout.
//! Everything here is chatter about what the CLI is doing.
//! Initialize once from main() with `output::init(verbosity)`.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
}

impl Verbosity {
    /// `--quiet` wins over `--verbose`.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

static VERBOSITY: OnceLock<Verbosity> = OnceLock::new();

/// Initialize the global verbosity level. Must be called once from main().
pub fn init(v: Verbosity) {
    VERBOSITY.set(v).expect("output::init called more than once");
}

/// Get the current verbosity level.
pub fn verbosity() -> Verbosity {
    *VERBOSITY.get().unwrap_or(&Verbosity::Normal)
}

/// Completion/success indicator. Shown at Normal+.
#[macro_export]
macro_rules! o_success {
    ($($arg:tt)*) => {
        if $crate::output::verbosity() >= $crate::output::Verbosity::Normal {
            eprintln!($($arg)*);
        }
    };
}

/// Fatal error. Always shown.
#[macro_export]
macro_rules! o_error {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

/// Debug/verbose info. Shown at Verbose only, on stderr so it never mixes
/// with field values.
#[macro_export]
macro_rules! o_debug {
    ($($arg:tt)*) => {
        if $crate::output::verbosity() >= $crate::output::Verbosity::Verbose {
            eprintln!($($arg)*);
        }
    };
}

/// Final result. Always shown (even in Quiet mode), uses print! (no newline).
#[macro_export]
macro_rules! o_result {
    ($($arg:tt)*) => {
        print!($($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_defaults_to_normal() {
        // init() is only ever called from main()
        assert_eq!(verbosity(), Verbosity::Normal);
    }
}
