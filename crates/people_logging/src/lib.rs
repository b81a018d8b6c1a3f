#![deny(missing_docs)]
//! Shared logging utilities for the people list workspace.
//!
//! This crate provides the `people_*` logging macros used by the core, the
//! fetch engine and the app, plus a minimal test initializer for the global
//! logger. The macros are thin wrappers over the `log` facade so callers only
//! need `people_logging` (and `log`) in their dependency list.

/// Target used for log lines emitted by the fetch coordinator.
pub const FETCH_TARGET: &str = "people::fetch";

/// Target used for log lines emitted by the list controller.
pub const LIST_TARGET: &str = "people::list";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! people_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! people_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! people_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! people_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! people_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized, so every
/// test may call it without coordinating with the others.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
