//! CLI argument definitions using clap
//!
//! Commands:
//! - rulequest serve --config <path> [--port N]
//! - rulequest session --config <path>
//! - rulequest check --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rulequest - adaptive question engine over rule-based knowledge
#[derive(Parser, Debug)]
#[command(name = "rulequest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./rulequest.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Answer questions over stdin/stdout, one JSON request per line
    Session {
        /// Path to configuration file
        #[arg(long, default_value = "./rulequest.json")]
        config: PathBuf,
    },

    /// Load and validate every project's rules, then exit
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./rulequest.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["rulequest", "serve", "--config", "c.json", "--port", "9000"])
            .unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("c.json"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_config_path() {
        let cli = Cli::try_parse_from(["rulequest", "check"]).unwrap();
        match cli.command {
            Command::Check { config } => assert_eq!(config, PathBuf::from("./rulequest.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
