//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::api::{ApiHandler, InferenceService};
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::rules::RuleLoader;
use crate::store::{JsonFileStore, KnowledgeBase};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_lines, write_json, write_line};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Session { config } => session(&config),
        Command::Check { config } => check(&config),
    }
}

fn load(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    init_logging(config.log_format);
    Ok(config)
}

fn build_service(config: &Config) -> InferenceService {
    let store = JsonFileStore::new(&config.data_file);
    InferenceService::new(Arc::new(store), config.service_options())
}

/// Run the HTTP server until the process is stopped
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = load(config_path)?;

    let http_config = match port {
        Some(port) => config.http.clone().with_port(port),
        None => config.http.clone(),
    };

    if !config.data_file.exists() {
        warn!(path = %config.data_file.display(), "knowledge file does not exist yet");
    }

    let service = Arc::new(build_service(&config));
    let server = HttpServer::new(&http_config, service)
        .map_err(|e| CliError::config_error(e.to_string()))?;
    info!(addr = %server.socket_addr(), data_file = %config.data_file.display(), "starting server");

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Line protocol over stdin/stdout
pub fn session(config_path: &Path) -> CliResult<()> {
    let config = load(config_path)?;
    let service = build_service(&config);
    let handler = ApiHandler::new(&service);

    for line in read_lines() {
        let line = line?;
        let response = handler.handle(&line);
        write_line(&response.to_json())?;
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct ProjectCheck {
    id: String,
    name: String,
    rules: usize,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    data_file: String,
    projects: Vec<ProjectCheck>,
    valid: bool,
}

/// Validate every project's rules and print a summary line
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = load(config_path)?;
    let store = JsonFileStore::new(&config.data_file);
    let loader = RuleLoader::new(config.max_condition_depth);

    let document = store
        .document()
        .map_err(|e| CliError::check_failed(e.to_string()))?;

    let projects: Vec<ProjectCheck> = document
        .projects
        .iter()
        .map(|project| {
            let result = document
                .rules_for_project(&project.id)
                .map_err(|e| e.to_string())
                .and_then(|raws| loader.load_rule_set(&raws).map_err(|e| e.to_string()));
            match result {
                Ok(set) => ProjectCheck {
                    id: project.id.clone(),
                    name: project.name.clone(),
                    rules: set.len(),
                    valid: true,
                    error: None,
                },
                Err(error) => {
                    warn!(project_id = project.id.as_str(), error = error.as_str(), "project rules invalid");
                    ProjectCheck {
                        id: project.id.clone(),
                        name: project.name.clone(),
                        rules: project.rules.len(),
                        valid: false,
                        error: Some(error),
                    }
                }
            }
        })
        .collect();

    let invalid = projects.iter().filter(|p| !p.valid).count();
    let report = CheckReport {
        data_file: config.data_file.display().to_string(),
        valid: invalid == 0,
        projects,
    };
    write_json(&report)?;

    if invalid > 0 {
        return Err(CliError::check_failed(format!(
            "{} project(s) have invalid rules",
            invalid
        )));
    }
    Ok(())
}
