//! Process-wide logging bootstrap.
//!
//! Core modules log through the `log` facade only; this module wires the
//! facade to a stderr `flexi_logger` backend. Initialization is idempotent
//! and never panics: a second call is a no-op, and a backend failure is
//! reported as a string rather than aborting the process.

use flexi_logger::{LogSpecification, Logger, LoggerHandle};
use once_cell::sync::OnceCell;

const LOG_ENV_VAR: &str = "TASKFLOW_LOG";
const DEFAULT_LOG_SPEC: &str = "warn";

// Dropping a LoggerHandle shuts the backend down; the cell keeps it alive
// for the life of the process.
static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Initializes stderr logging, reading the level from `TASKFLOW_LOG`
/// (default `warn`). Safe to call more than once.
pub fn init() -> Result<(), String> {
    LOGGER.get_or_try_init(|| {
        let spec = match std::env::var(LOG_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => LogSpecification::parse(value.trim())
                .map_err(|err| format!("invalid {LOG_ENV_VAR} value: {err}"))?,
            _ => LogSpecification::parse(DEFAULT_LOG_SPEC)
                .map_err(|err| format!("invalid default log spec: {err}"))?,
        };

        Logger::with(spec)
            .log_to_stderr()
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))
    })?;

    Ok(())
}
