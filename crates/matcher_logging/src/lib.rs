#![deny(missing_docs)]
//! Shared logging utilities for the matcher workspace.
//!
//! This crate provides the `matcher_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every macro logs under
//! [`TARGET`] so front ends can filter matcher output from dependency noise.

/// Log target used by all `matcher_*` macros.
pub const TARGET: &str = "ats_matcher";

#[doc(hidden)]
pub use log as __log;

/// Logs a trace-level message under the matcher target.
#[macro_export]
macro_rules! matcher_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the matcher target.
#[macro_export]
macro_rules! matcher_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the matcher target.
#[macro_export]
macro_rules! matcher_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the matcher target.
#[macro_export]
macro_rules! matcher_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the matcher target.
#[macro_export]
macro_rules! matcher_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
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
