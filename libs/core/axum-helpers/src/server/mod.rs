//! Assembling and running the HTTP server.
//!
//! Covers the path from a plain routes `Router` to a listening process:
//! documentation UIs and middleware via [`create_router`], liveness via
//! [`health_router`], then [`create_app`] or [`create_production_app`] to
//! serve until a shutdown signal, with resource cleanup in the latter.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{server::ServerConfig, app_info};
//!
//! let router = create_router::<ApiDoc>(api_routes).await?;
//! let app = router.merge(health_router(app_info!()));
//! create_app(app, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_production_app, create_router};
pub use cleanup::{CleanupCoordinator, close_mongo};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
