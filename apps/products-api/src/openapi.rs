//! Top-level OpenAPI document, aggregating the domain APIs.

use utoipa::OpenApi;

/// Served at `/api-docs/openapi.json` and rendered by the Swagger, Redoc,
/// RapiDoc and Scalar UIs.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing products and category statistics",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
