//! Business rules over the product repository.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CategoryAveragePrice, CategoryCount, CategoryTotalValue, CreateProduct, Product,
    ReplaceProduct,
};
use crate::repository::ProductRepository;

/// Business-rule layer between the HTTP handlers and the repository.
///
/// Validates incoming DTOs and decides what counts as not-found, including
/// the empty-aggregation case; storage details stay behind the trait.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Wraps the repository; clones of the service share it.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List all products
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Replace an existing product with the given payload
    #[instrument(skip(self, input))]
    pub async fn replace_product(
        &self,
        id: ObjectId,
        input: ReplaceProduct,
    ) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.replace(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<()> {
        self.repository.delete(id).await
    }

    /// Count products per category
    ///
    /// An empty result set is reported as NoCategoryResults rather than an
    /// empty list.
    #[instrument(skip(self))]
    pub async fn count_by_category(
        &self,
        category: Option<String>,
    ) -> ProductResult<Vec<CategoryCount>> {
        let counts = self.repository.count_by_category(category).await?;
        if counts.is_empty() {
            return Err(ProductError::NoCategoryResults);
        }
        Ok(counts)
    }

    /// Average product price per category
    #[instrument(skip(self))]
    pub async fn average_price_by_category(
        &self,
        category: Option<String>,
    ) -> ProductResult<Vec<CategoryAveragePrice>> {
        let averages = self.repository.average_price_by_category(category).await?;
        if averages.is_empty() {
            return Err(ProductError::NoCategoryResults);
        }
        Ok(averages)
    }

    /// Total inventory value per category
    #[instrument(skip(self))]
    pub async fn total_value_by_category(
        &self,
        category: Option<String>,
    ) -> ProductResult<Vec<CategoryTotalValue>> {
        let totals = self.repository.total_value_by_category(category).await?;
        if totals.is_empty() {
            return Err(ProductError::NoCategoryResults);
        }
        Ok(totals)
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn create_input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            category: Some("electronics".to_string()),
            price: 19.99,
            stock: 5,
        }
    }

    fn replace_input(name: &str) -> ReplaceProduct {
        ReplaceProduct {
            name: name.to_string(),
            category: Some("electronics".to_string()),
            price: 29.99,
            stock: 3,
        }
    }

    #[tokio::test]
    async fn test_create_product_rejects_empty_name() {
        // No expectations: validation must fail before the repository is hit
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let result = service.create_product(create_input("")).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_product_delegates_to_repository() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| Ok(Product::new(input)));
        let service = ProductService::new(mock_repo);

        let product = service
            .create_product(create_input("keyboard"))
            .await
            .unwrap();

        assert_eq!(product.name, "keyboard");
        assert_eq!(product.price, 19.99);
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let id = ObjectId::new();
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(mockall::predicate::eq(id))
            .returning(|_| Ok(None));
        let service = ProductService::new(mock_repo);

        let result = service.get_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_replace_product_keeps_path_id() {
        let id = ObjectId::new();
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_replace()
            .with(mockall::predicate::eq(id), mockall::predicate::always())
            .returning(|id, input| Ok(Product::with_id(id, input)));
        let service = ProductService::new(mock_repo);

        let product = service
            .replace_product(id, replace_input("keyboard"))
            .await
            .unwrap();

        assert_eq!(product.id, id);
        assert_eq!(product.price, 29.99);
    }

    #[tokio::test]
    async fn test_replace_product_rejects_invalid_payload() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let result = service
            .replace_product(ObjectId::new(), replace_input(""))
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_product_delegates_to_repository() {
        let id = ObjectId::new();
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .with(mockall::predicate::eq(id))
            .returning(|_| Ok(()));
        let service = ProductService::new(mock_repo);

        assert!(service.delete_product(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_count_by_category_passes_filter_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_count_by_category()
            .with(mockall::predicate::eq(Some("electronics".to_string())))
            .returning(|category| {
                Ok(vec![CategoryCount {
                    category,
                    product_count: 3,
                }])
            });
        let service = ProductService::new(mock_repo);

        let counts = service
            .count_by_category(Some("electronics".to_string()))
            .await
            .unwrap();

        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].product_count, 3);
    }

    #[tokio::test]
    async fn test_count_by_category_empty_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_count_by_category()
            .returning(|_| Ok(vec![]));
        let service = ProductService::new(mock_repo);

        let result = service.count_by_category(None).await;

        assert!(matches!(result, Err(ProductError::NoCategoryResults)));
    }

    #[tokio::test]
    async fn test_average_price_empty_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_average_price_by_category()
            .returning(|_| Ok(vec![]));
        let service = ProductService::new(mock_repo);

        let result = service
            .average_price_by_category(Some("no-such-category".to_string()))
            .await;

        assert!(matches!(result, Err(ProductError::NoCategoryResults)));
    }

    #[tokio::test]
    async fn test_total_value_by_category_returns_rows() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_total_value_by_category().returning(|_| {
            Ok(vec![
                CategoryTotalValue {
                    category: Some("electronics".to_string()),
                    total_value: 199.5,
                },
                CategoryTotalValue {
                    category: None,
                    total_value: 10.0,
                },
            ])
        });
        let service = ProductService::new(mock_repo);

        let totals = service.total_value_by_category(None).await.unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].total_value, 199.5);
        assert!(totals[1].category.is_none());
    }
}
