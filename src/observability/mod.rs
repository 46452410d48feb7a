//! Observability: structured logging and operational counters
//!
//! Logging goes through `tracing`; the binary installs the subscriber via
//! `init_logging`, library code only emits events. Counters are plain
//! atomics exposed as JSON on `GET /metrics`.

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat, LOG_ENV};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
