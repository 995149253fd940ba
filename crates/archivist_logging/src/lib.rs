#![deny(missing_docs)]
//! Shared logging utilities for the archivist workspace.
//!
//! Provides the `archivist_*` logging macros used across the crates. Every
//! line is prefixed with the sync cycle of the current thread, so the log of
//! one drained message batch (and the requests it issued) reads as a block.

use std::cell::Cell;

thread_local! {
    /// Sync cycle of the message loop running on this thread.
    static SYNC_CYCLE: Cell<u64> = const { Cell::new(0) };
}

/// Sets the sync cycle for the current thread.
///
/// The app loop bumps this once per drained message batch.
pub fn set_sync_cycle(cycle: u64) {
    SYNC_CYCLE.with(|v| v.set(cycle));
}

/// Returns the sync cycle for the current thread, 0 if never set.
pub fn sync_cycle() -> u64 {
    SYNC_CYCLE.with(|v| v.get())
}

/// Logs a trace-level message tagged with the sync cycle.
#[macro_export]
macro_rules! archivist_trace {
    ($($arg:tt)*) => {{
        log::trace!("[cycle {}] {}", $crate::sync_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the sync cycle.
#[macro_export]
macro_rules! archivist_debug {
    ($($arg:tt)*) => {{
        log::debug!("[cycle {}] {}", $crate::sync_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the sync cycle.
#[macro_export]
macro_rules! archivist_info {
    ($($arg:tt)*) => {{
        log::info!("[cycle {}] {}", $crate::sync_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the sync cycle.
#[macro_export]
macro_rules! archivist_warn {
    ($($arg:tt)*) => {{
        log::warn!("[cycle {}] {}", $crate::sync_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the sync cycle.
#[macro_export]
macro_rules! archivist_error {
    ($($arg:tt)*) => {{
        log::error!("[cycle {}] {}", $crate::sync_cycle(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
