use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{
    CategoryAveragePrice, CategoryCount, CategoryTotalValue, CreateProduct, Product,
    ReplaceProduct,
};

/// Data-access seam for products.
///
/// The service is generic over this trait, so tests swap in the
/// generated mock and the app plugs in the MongoDB implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product with a server-assigned id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// List all products in storage order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Replace an existing product wholesale
    async fn replace(&self, id: ObjectId, input: ReplaceProduct) -> ProductResult<Product>;

    /// Delete a product, failing if the id matches nothing
    async fn delete(&self, id: ObjectId) -> ProductResult<()>;

    /// Count products per category, optionally restricted to one category
    async fn count_by_category(
        &self,
        category: Option<String>,
    ) -> ProductResult<Vec<CategoryCount>>;

    /// Average product price per category, optionally restricted to one category
    async fn average_price_by_category(
        &self,
        category: Option<String>,
    ) -> ProductResult<Vec<CategoryAveragePrice>>;

    /// Total inventory value per category, optionally restricted to one category
    async fn total_value_by_category(
        &self,
        category: Option<String>,
    ) -> ProductResult<Vec<CategoryTotalValue>>;
}
