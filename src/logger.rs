//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only appears with `--verbose`
//! - `request` for the one-line access log written per served request
//!
//! # Example
//!
//! ```ignore
//! log!("serve"; "http://{}", addr);
//! debug!("cache"; "loaded config for {}", corpus);
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Serializes output from request worker threads.
static OUTPUT: Mutex<()> = Mutex::new(());

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let _guard = OUTPUT.lock();
    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Write one access-log line (verbose mode only).
pub fn request(method: &str, path: &str, corpus: &str, route: &str, status: u16) {
    if !is_verbose() {
        return;
    }
    let status = colorize_status(status);
    log("request", &format!("{method} {path} ({corpus} -> {route}) {status}"));
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "serve" | "request" => prefix
            .if_supports_color(Stream::Stdout, |t| t.style(Style::new().bright_blue().bold()))
            .to_string(),
        "cache" | "resolve" => prefix
            .if_supports_color(Stream::Stdout, |t| t.style(Style::new().bright_green().bold()))
            .to_string(),
        "error" => prefix
            .if_supports_color(Stream::Stdout, |t| t.style(Style::new().bright_red().bold()))
            .to_string(),
        _ => prefix
            .if_supports_color(Stream::Stdout, |t| t.style(Style::new().bright_yellow().bold()))
            .to_string(),
    }
}

/// Color an HTTP status by class.
fn colorize_status(status: u16) -> String {
    match status {
        200..=299 => status
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        400..=499 => status
            .if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string(),
        _ => status.if_supports_color(Stream::Stdout, |t| t.red()).to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
