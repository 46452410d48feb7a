//! Tracing subscriber setup

use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "RULEQUEST_LOG";

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install the global subscriber.
///
/// Reads `RULEQUEST_LOG` (e.g. `rulequest=debug`), falling back to
/// `rulequest=info`. Only the first call has any effect. Logs go to stderr
/// so the `session` command keeps stdout for responses.
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("rulequest=info"));

        let registry = tracing_subscriber::registry().with(filter);
        let result = match format {
            LogFormat::Pretty => registry
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_writer(std::io::stderr),
                )
                .try_init(),
        };

        if let Err(e) = result {
            eprintln!("logging already initialized: {}", e);
        }
    });
}
