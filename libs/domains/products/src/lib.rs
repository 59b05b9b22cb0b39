//! Product catalog domain: CRUD plus per-category statistics on MongoDB.
//!
//! Layered so the HTTP surface never touches the driver directly:
//!
//! ```text
//! handlers (HTTP)  ->  service (rules)  ->  repository trait  ->  MongoDB
//! ```
//!
//! The repository seam is a mockable trait, so service and handler tests run
//! without a database; only `MongoProductRepository` knows about BSON.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     mongodb::MongoProductRepository,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoProductRepository::new(&db);
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CategoryAveragePrice, CategoryCount, CategoryTotalValue, CreateProduct, Product,
    ProductResponse, ReplaceProduct,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
