//! # Axum Helpers
//!
//! Shared plumbing for the workspace's Axum services: server assembly,
//! documentation UIs, error envelopes, and request extractors, so each app
//! only writes its routes.
//!
//! - **[`server`]**: router assembly, liveness/readiness, graceful shutdown
//! - **[`http`]**: CORS and security-header middleware
//! - **[`errors`]**: the error envelope and its [`ErrorCode`] catalog
//! - **[`extractors`]**: ObjectId path parsing, validated JSON bodies
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    CleanupCoordinator, HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_mongo,
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{ObjectIdPath, ValidatedJson};
