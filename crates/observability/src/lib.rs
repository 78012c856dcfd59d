//! Process-wide logging setup shared by the slipgen binaries.

/// Initialize logging with the defaults (text to stderr, `info`).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    subscriber::init(&LoggingConfig::default());
}

/// Initialize logging from an explicit configuration.
pub fn init_with(config: &LoggingConfig) {
    subscriber::init(config);
}

/// `[logging]` configuration table.
pub mod logging;

/// Subscriber construction (filters, formatting).
pub mod subscriber;

pub use logging::{LogFormat, LogLevel, LoggingConfig};
