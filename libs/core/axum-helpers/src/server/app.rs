use super::shutdown::{ShutdownCoordinator, coordinated_shutdown, shutdown_signal};
use crate::errors::handlers::not_found;
use crate::http::cors::create_cors_layer;
use crate::http::security::security_headers;
use axum::{Router, http::HeaderValue, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

async fn bind_listener(server_config: &ServerConfig) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Serves a router until SIGTERM or ctrl-c arrives.
///
/// Suitable for simple binaries that hold no resources needing teardown;
/// apps with database handles should prefer [`create_production_app`].
///
/// # Errors
/// Fails when the listener cannot bind the configured address or the
/// server itself errors while running.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use core_config::server::ServerConfig;
/// use axum_helpers::server::create_app;
///
/// create_app(Router::new(), &ServerConfig::default()).await?;
/// ```
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = bind_listener(server_config).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server error: {:?}", e);
        })?;

    Ok(())
}

/// Wraps API routes with the workspace's standard cross-cutting layers.
///
/// The returned router carries:
/// - OpenAPI docs at `/swagger-ui`, `/redoc`, `/rapidoc` and `/scalar`,
///   all reading `/api-docs/openapi.json` generated from `T`
/// - the given routes nested under `/api`
/// - request tracing, security headers, CORS and response compression
/// - a JSON 404 fallback for unknown paths
///
/// Liveness/readiness endpoints are the app's job; merge `health_router()`
/// and a readiness route on top of the result.
///
/// `CORS_ALLOWED_ORIGIN` must be set to a comma-separated origin list
/// (for example `http://localhost:3000,https://app.example.com`); startup
/// fails without it. The layer allows GET/POST/PUT/DELETE/OPTIONS,
/// the Content-Type/Authorization/Accept headers, credentials, and caches
/// preflight results for one hour.
///
/// Routes passed in must already have their state applied; this function
/// only adds stateless cross-cutting concerns.
///
/// # Errors
/// Fails when `CORS_ALLOWED_ORIGIN` is unset, empty, or contains an entry
/// that is not a valid header value.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_router;
///
/// let router = create_router::<ApiDoc>(api_routes).await?;
/// ```
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let raw_origins = std::env::var("CORS_ALLOWED_ORIGIN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN environment variable is required. \
             Example: CORS_ALLOWED_ORIGIN=http://localhost:3000,https://example.com",
        )
    })?;

    let origins = parse_allowed_origins(&raw_origins)?;
    info!("CORS allows origins: {}", raw_origins);

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer(origins))
        // Compresses responses (gzip, br, deflate, zstd) per Accept-Encoding
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Splits a comma-separated origin list into header values.
///
/// Entries are trimmed; blank entries are dropped. An entirely empty list
/// is an error since it would silently reject every browser client.
fn parse_allowed_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let mut origins = Vec::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let origin = entry.parse::<HeaderValue>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN entry '{}': {}", entry, e),
            )
        })?;
        origins.push(origin);
    }

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    Ok(origins)
}

/// Serves a router with coordinated shutdown and resource cleanup.
///
/// On SIGTERM/ctrl-c the server stops accepting connections, the `cleanup`
/// future runs with `shutdown_timeout` as its limit, and the process exits
/// once both have finished. A cleanup that overruns the limit is abandoned
/// with a warning rather than blocking shutdown forever.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::{close_mongo, create_production_app};
///
/// create_production_app(
///     router,
///     &config,
///     Duration::from_secs(30),
///     close_mongo(mongo_client, "main"),
/// )
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let signal_handle = coordinator.clone();

    let listener = bind_listener(server_config).await?;

    let cleanup_task = tokio::spawn(async move {
        signal_handle.wait_for_signal().await;

        info!("Running shutdown cleanup (limit {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Shutdown cleanup finished"),
            Err(_) => {
                tracing::warn!(
                    "Shutdown cleanup still running after {:?}, abandoning it",
                    shutdown_timeout
                );
            }
        }
    });

    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| {
            tracing::error!("Server error: {:?}", e);
        });

    // Let the cleanup task drain before returning
    cleanup_task.await.ok();

    served
}
