//! Console logging for the page bindings
//!
//! The macros forward to [`emit`], which writes to the browser console on
//! WASM and to stderr elsewhere. Every macro compiles to nothing in release
//! builds.
//!
//! | Macro | Debug Assertions | Feature Required | WASM | Non-WASM |
//! |-------|------------------|------------------|------|----------|
//! | `debug_log!` | Required | `debug-hooks` | `console.debug` | `eprintln!` |
//! | `info_log!` | Required | None | `console.info` | `eprintln!` |
//! | `warn_log!` | Required | None | `console.warn` | `eprintln!` |
//! | `error_log!` | Required | None | `console.error` | `eprintln!` |
//!
//! ## Example
//!
//! ```ignore
//! use stackportfolio_pages::{info_log, warn_log};
//!
//! info_log!("stepper bound to {} steps", steps.len());
//! warn_log!("no error element after field {}", name);
//! ```

/// Severity of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
	Debug,
	Info,
	Warn,
	Error,
}

impl Level {
	pub fn label(self) -> &'static str {
		match self {
			Self::Debug => "DEBUG",
			Self::Info => "INFO",
			Self::Warn => "WARN",
			Self::Error => "ERROR",
		}
	}
}

/// Write one message at `level`.
#[cfg(target_arch = "wasm32")]
pub fn emit(level: Level, message: &str) {
	let value = wasm_bindgen::JsValue::from_str(message);
	match level {
		Level::Debug => web_sys::console::debug_1(&value),
		Level::Info => web_sys::console::info_1(&value),
		Level::Warn => web_sys::console::warn_1(&value),
		Level::Error => web_sys::console::error_1(&value),
	}
}

/// Write one message at `level`.
#[cfg(not(target_arch = "wasm32"))]
pub fn emit(level: Level, message: &str) {
	eprintln!("[{}] {}", level.label(), message);
}

/// Logs a debug message (requires `debug-hooks` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::logging::emit($crate::logging::Level::Debug, &format!($($arg)*));
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-hooks")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::logging::emit($crate::logging::Level::Info, &format!($($arg)*));
	}};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message (requires `debug_assertions`)
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::logging::emit($crate::logging::Level::Warn, &format!($($arg)*));
	}};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message (requires `debug_assertions`)
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::logging::emit($crate::logging::Level::Error, &format!($($arg)*));
	}};
}

/// No-op error_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}
