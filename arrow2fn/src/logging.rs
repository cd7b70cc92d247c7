//! Logging setup: `tracing` events written to stderr.
//!
//! ## Environment Variables
//!
//! 1. **`ARROW2FN_LOG`** (highest priority) - arrow2fn-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn`, or `debug` for arrow2fn when `--verbose` is given
//!
//! stdout is reserved for program output (`--dry-run`, `--json`), so logs
//! never go there.

use std::env;
use tracing_subscriber::{fmt, EnvFilter};

use crate::constants::LOG_ENV_VAR;

/// Initialize logging.
///
/// Safe to call multiple times -- later calls are ignored if a global
/// subscriber is already installed.
pub fn init(verbose: bool) {
    let directive = filter_directive(
        env::var(LOG_ENV_VAR).ok().as_deref(),
        env::var("RUST_LOG").ok().as_deref(),
        verbose,
    );
    let _ = fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolve the filter string following the priority in the module docs.
///
/// A bare level in `ARROW2FN_LOG` (e.g. `debug`) is scoped to this crate;
/// anything with module syntax is used as-is.
fn filter_directive(app_log: Option<&str>, rust_log: Option<&str>, verbose: bool) -> String {
    if let Some(app_log) = app_log {
        if app_log.contains('=') || app_log.contains(',') {
            return app_log.to_owned();
        }
        return format!("warn,arrow2fn={app_log}");
    }

    if let Some(rust_log) = rust_log {
        return rust_log.to_owned();
    }

    if verbose {
        "warn,arrow2fn=debug".to_owned()
    } else {
        "warn".to_owned()
    }
}
