// SPDX-License-Identifier: PMPL-1.0-or-later

//! Logger bootstrap for the command-line driver.
//!
//! The library only talks to the `log` facade. Binaries call
//! [`init_logging`] once; later calls with the same level are no-ops and
//! calls with a different level are rejected, since the backend cannot be
//! swapped after it starts.

use anyhow::{anyhow, Result};
use flexi_logger::{Logger, LoggerHandle};
use log::info;
use once_cell::sync::OnceCell;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: String,
    _logger: LoggerHandle,
}

/// Start logging to stderr at `level` (a `RUST_LOG`-style spec).
///
/// `RUST_LOG`, when set, takes precedence over `level`.
pub fn init_logging(level: &str) -> Result<()> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        if state.level == level {
            return Ok(());
        }
        return Err(anyhow!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level,
            level
        ));
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        let logger = Logger::try_with_env_or_str(&level)
            .map_err(|err| anyhow!("invalid log level `{level}`: {err}"))?
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
            .map_err(|err| anyhow!("failed to start logger: {err}"))?;

        info!(
            "event=app_start status=ok version={} level={}",
            env!("CARGO_PKG_VERSION"),
            level
        );
        Ok(LoggingState {
            level: level.clone(),
            _logger: logger,
        })
    })?;

    if state.level != level {
        return Err(anyhow!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level,
            level
        ));
    }
    Ok(())
}

/// Lowercase and validate a plain level name.
///
/// Module-qualified specs (`page_i18n=debug`) pass through untouched.
fn normalize_level(level: &str) -> Result<String> {
    let trimmed = level.trim();
    if trimmed.contains('=') || trimmed.contains(',') {
        return Ok(trimmed.to_string());
    }
    let lowered = trimmed.to_ascii_lowercase();
    match lowered.as_str() {
        "off" | "error" | "warn" | "info" | "debug" | "trace" => Ok(lowered),
        _ => Err(anyhow!(
            "unsupported log level `{}` (expected off|error|warn|info|debug|trace)",
            level
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_levels_normalize() {
        assert_eq!(normalize_level(" WARN ").expect("valid"), "warn");
        assert_eq!(normalize_level("debug").expect("valid"), "debug");
    }

    #[test]
    fn module_specs_pass_through() {
        assert_eq!(
            normalize_level("warn,page_i18n=debug").expect("valid"),
            "warn,page_i18n=debug"
        );
    }

    #[test]
    fn unknown_level_rejected() {
        assert!(normalize_level("loud").is_err());
        assert!(normalize_level("").is_err());
    }
}
