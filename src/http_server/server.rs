//! # HTTP Server
//!
//! Combines the inference, automaton and observability routers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::InferenceService;

use super::config::{HttpConfigError, HttpServerConfig};
use super::inference_routes::{automaton_routes, inference_routes};
use super::observability_routes::observability_routes;

/// HTTP server for the inference service
pub struct HttpServer {
    addr: SocketAddr,
    router: Router,
}

impl HttpServer {
    /// Resolve the listen address and CORS origins, then build the router.
    pub fn new(
        config: &HttpServerConfig,
        service: Arc<InferenceService>,
    ) -> Result<Self, HttpConfigError> {
        let addr = config.listen_addr()?;
        let router = Self::build_router(config, service)?;
        Ok(Self { addr, router })
    }

    /// Build the combined router with all endpoints
    pub fn build_router(
        config: &HttpServerConfig,
        service: Arc<InferenceService>,
    ) -> Result<Router, HttpConfigError> {
        let cors = config.cors_layer()?;

        Ok(Router::new()
            .merge(observability_routes(service.clone()))
            .nest("/inference", inference_routes(service.clone()))
            .nest("/automaton", automaton_routes(service))
            .layer(TraceLayer::new_for_http())
            .layer(cors))
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        info!(addr = %self.addr, "inference server listening");

        axum::serve(listener, self.router).await
    }
}
