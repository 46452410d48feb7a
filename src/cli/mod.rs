//! CLI module for rulequest
//!
//! Provides command-line interface for:
//! - serve: HTTP server
//! - session: JSON-lines question loop on stdin/stdout
//! - check: validate the knowledge file

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, run, run_command, serve, session};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
