// LeadDesk - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug (sets RUST_LOG=debug)
//   - Config file: [logging] level = "debug"
//
// Output: stderr by default, or appended to the configured log file.
// Never logs phone numbers or email addresses; lead ids identify records.

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
/// `config_level` is the level from config.toml (if present).
/// `log_file` is the optional log file path from config.toml.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default "info".
pub fn init(debug_flag: bool, config_level: Option<&str>, log_file: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    // A file that cannot be opened falls back to stderr; the failure is
    // reported once the subscriber is live.
    let mut file_error = None;
    match log_file.map(|p| OpenOptions::new().create(true).append(true).open(p)) {
        Some(Ok(file)) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Some(Err(e)) => {
            file_error = Some(e);
            builder.with_writer(std::io::stderr).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    if let Some(e) = file_error {
        tracing::warn!(error = %e, "Could not open log file; logging to stderr");
    }

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}
