//! HTTP Server Configuration
//!
//! The `http` block of the config file. Everything here is checked when the
//! config loads, so the server never starts with an address or CORS origin
//! it would have to drop.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Rejected `http` settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpConfigError {
    #[error("http.host must be an IP address, got '{0}'")]
    InvalidHost(String),

    #[error("http.port must be > 0")]
    ZeroPort,

    #[error("invalid CORS origin '{0}': expected http(s)://host[:port]")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Listen address, an IPv4 or IPv6 literal
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origins allowed to call the API. Empty allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

/// The question UI's dev server
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl HttpServerConfig {
    /// Same settings on another port (the `serve --port` override)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Check address and origins without building anything
    pub fn validate(&self) -> Result<(), HttpConfigError> {
        self.listen_addr()?;
        self.allowed_origins()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, HttpConfigError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|_| HttpConfigError::InvalidHost(self.host.clone()))?;
        if self.port == 0 {
            return Err(HttpConfigError::ZeroPort);
        }
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Parsed CORS origins, in configured order
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>, HttpConfigError> {
        self.cors_origins
            .iter()
            .map(String::as_str)
            .map(parse_origin)
            .collect()
    }

    /// CORS layer for the router. Any origin when none are configured.
    pub fn cors_layer(&self) -> Result<CorsLayer, HttpConfigError> {
        let origins = self.allowed_origins()?;
        let allow_origin = if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        };
        Ok(CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any))
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue, HttpConfigError> {
    let invalid = || HttpConfigError::InvalidOrigin(origin.to_string());

    let rest = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(invalid)?;
    // An origin is scheme + authority only.
    if rest.is_empty() || rest.contains('/') || rest.contains(char::is_whitespace) {
        return Err(invalid());
    }
    HeaderValue::from_str(origin).map_err(|_| invalid())
}
