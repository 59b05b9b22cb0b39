//! Axum handlers and OpenAPI document for the product routes.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        ServiceUnavailableResponse,
    },
    ObjectIdPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CategoryAveragePrice, CategoryCount, CategoryTotalValue, CreateProduct, ProductResponse,
    ReplaceProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI document covering every product route and schema.
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        replace_product,
        delete_product,
        count_by_category,
        average_price_by_category,
        total_value_by_category,
    ),
    components(
        schemas(
            ProductResponse, CreateProduct, ReplaceProduct,
            CategoryCount, CategoryAveragePrice, CategoryTotalValue
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Assembles the product routes around a shared service.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/count-by-category", get(count_by_category))
        .route(
            "/average-price-by-category",
            get(average_price_by_category),
        )
        .route("/total-value-by-category", get(total_value_by_category))
        .route(
            "/{id}",
            get(get_product).put(replace_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Category filter query parameters
#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct CategoryQuery {
    /// Restrict the aggregation to one category (exact match)
    pub category: Option<String>,
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "List of all products", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = service.list_products().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse,
            headers(("Location" = String, description = "Path of the created product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    let location = format!("/api/products/{}", product.id.to_hex());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductResponse::from(product)),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, description = "Product not found"),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

/// Replace a product
///
/// Full replacement: every stored field takes the value from the payload,
/// while the id stays the one from the path.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex ObjectId)")
    ),
    request_body = ReplaceProduct,
    responses(
        (status = 204, description = "Product replaced successfully"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, description = "Product not found"),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn replace_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<ReplaceProduct>,
) -> ProductResult<impl IntoResponse> {
    service.replace_product(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24-character hex ObjectId)")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, description = "Product not found"),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Count products per category
#[utoipa::path(
    get,
    path = "/count-by-category",
    tag = "Products",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Product counts per category", body = Vec<CategoryCount>),
        (status = 404, description = "No categories matched"),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn count_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<CategoryQuery>,
) -> ProductResult<Json<Vec<CategoryCount>>> {
    let counts = service.count_by_category(query.category).await?;
    Ok(Json(counts))
}

/// Average product price per category
#[utoipa::path(
    get,
    path = "/average-price-by-category",
    tag = "Products",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Average prices per category", body = Vec<CategoryAveragePrice>),
        (status = 404, description = "No categories matched"),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn average_price_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<CategoryQuery>,
) -> ProductResult<Json<Vec<CategoryAveragePrice>>> {
    let averages = service.average_price_by_category(query.category).await?;
    Ok(Json(averages))
}

/// Total inventory value per category
#[utoipa::path(
    get,
    path = "/total-value-by-category",
    tag = "Products",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Total inventory value per category", body = Vec<CategoryTotalValue>),
        (status = 404, description = "No categories matched"),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn total_value_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<CategoryQuery>,
) -> ProductResult<Json<Vec<CategoryTotalValue>>> {
    let totals = service.total_value_by_category(query.category).await?;
    Ok(Json(totals))
}
