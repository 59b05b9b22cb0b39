//! ProductRepository over a MongoDB collection.

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CategoryAveragePrice, CategoryCount, CategoryTotalValue, CreateProduct, Product,
    ReplaceProduct,
};
use crate::repository::ProductRepository;

/// ProductRepository backed by a typed MongoDB collection.
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

/// Aggregation row as MongoDB returns it, with the group key under _id
#[derive(Debug, Deserialize)]
struct CategoryCountRow {
    #[serde(rename = "_id")]
    category: Option<String>,
    #[serde(rename = "productCount")]
    product_count: i64,
}

#[derive(Debug, Deserialize)]
struct CategoryAveragePriceRow {
    #[serde(rename = "_id")]
    category: Option<String>,
    #[serde(rename = "averagePrice")]
    average_price: f64,
}

#[derive(Debug, Deserialize)]
struct CategoryTotalValueRow {
    #[serde(rename = "_id")]
    category: Option<String>,
    #[serde(rename = "totalValue")]
    total_value: f64,
}

impl MongoProductRepository {
    /// Opens the default `products` collection.
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Same repository over a caller-named collection.
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Direct access to the underlying collection.
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a category aggregation pipeline: an optional exact-match stage
    /// followed by a $group on the category field.
    ///
    /// A missing or empty category adds no $match stage, so every document
    /// takes part in the grouping.
    fn category_pipeline(category: Option<&str>, group: Document) -> Vec<Document> {
        let mut pipeline = Vec::new();

        if let Some(category) = category.filter(|c| !c.is_empty()) {
            pipeline.push(doc! { "$match": { "category": category } });
        }

        pipeline.push(doc! { "$group": group });
        pipeline
    }

    fn count_pipeline(category: Option<&str>) -> Vec<Document> {
        Self::category_pipeline(
            category,
            doc! { "_id": "$category", "productCount": { "$sum": 1 } },
        )
    }

    fn average_price_pipeline(category: Option<&str>) -> Vec<Document> {
        Self::category_pipeline(
            category,
            doc! { "_id": "$category", "averagePrice": { "$avg": "$price" } },
        )
    }

    fn total_value_pipeline(category: Option<&str>) -> Vec<Document> {
        Self::category_pipeline(
            category,
            doc! { "_id": "$category", "totalValue": { "$sum": { "$multiply": ["$price", "$stock"] } } },
        )
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let filter = doc! { "_id": id };
        let product = self.collection.find_one(filter).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        use futures_util::TryStreamExt;

        // No sort or pagination: clients get the collection in storage order
        let cursor = self.collection.find(doc! {}).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, input))]
    async fn replace(&self, id: ObjectId, input: ReplaceProduct) -> ProductResult<Product> {
        let product = Product::with_id(id, input);

        let result = self
            .collection
            .replace_one(doc! { "_id": id }, &product)
            .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product replaced successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_category(
        &self,
        category: Option<String>,
    ) -> ProductResult<Vec<CategoryCount>> {
        use futures_util::TryStreamExt;

        let pipeline = Self::count_pipeline(category.as_deref());
        let cursor = self
            .collection
            .aggregate(pipeline)
            .await?
            .with_type::<CategoryCountRow>();
        let rows: Vec<CategoryCountRow> = cursor.try_collect().await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryCount {
                category: row.category,
                product_count: row.product_count,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn average_price_by_category(
        &self,
        category: Option<String>,
    ) -> ProductResult<Vec<CategoryAveragePrice>> {
        use futures_util::TryStreamExt;

        let pipeline = Self::average_price_pipeline(category.as_deref());
        let cursor = self
            .collection
            .aggregate(pipeline)
            .await?
            .with_type::<CategoryAveragePriceRow>();
        let rows: Vec<CategoryAveragePriceRow> = cursor.try_collect().await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryAveragePrice {
                category: row.category,
                average_price: row.average_price,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn total_value_by_category(
        &self,
        category: Option<String>,
    ) -> ProductResult<Vec<CategoryTotalValue>> {
        use futures_util::TryStreamExt;

        let pipeline = Self::total_value_pipeline(category.as_deref());
        let cursor = self
            .collection
            .aggregate(pipeline)
            .await?
            .with_type::<CategoryTotalValueRow>();
        let rows: Vec<CategoryTotalValueRow> = cursor.try_collect().await?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryTotalValue {
                category: row.category,
                total_value: row.total_value,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pipeline_without_category() {
        let pipeline = MongoProductRepository::count_pipeline(None);
        assert_eq!(pipeline.len(), 1);
        assert!(pipeline[0].contains_key("$group"));
    }

    #[test]
    fn test_count_pipeline_with_category() {
        let pipeline = MongoProductRepository::count_pipeline(Some("electronics"));
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline[0], doc! { "$match": { "category": "electronics" } });
        assert!(pipeline[1].contains_key("$group"));
    }

    #[test]
    fn test_empty_category_adds_no_match_stage() {
        let pipeline = MongoProductRepository::count_pipeline(Some(""));
        assert_eq!(pipeline.len(), 1);
        assert!(pipeline[0].contains_key("$group"));
    }

    #[test]
    fn test_pipelines_group_on_category_field() {
        let pipeline = MongoProductRepository::count_pipeline(None);
        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$category");
        assert!(group.contains_key("productCount"));

        let pipeline = MongoProductRepository::average_price_pipeline(None);
        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$category");
        assert!(group.contains_key("averagePrice"));

        let pipeline = MongoProductRepository::total_value_pipeline(None);
        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$category");
        assert!(group.contains_key("totalValue"));
    }

    #[test]
    fn test_average_price_uses_avg_accumulator() {
        let pipeline = MongoProductRepository::average_price_pipeline(Some("books"));
        let group = pipeline[1].get_document("$group").unwrap();
        assert_eq!(
            group.get_document("averagePrice").unwrap(),
            &doc! { "$avg": "$price" }
        );
    }

    #[test]
    fn test_total_value_multiplies_price_by_stock() {
        let pipeline = MongoProductRepository::total_value_pipeline(None);
        let group = pipeline[0].get_document("$group").unwrap();
        let accumulator = group.get_document("totalValue").unwrap();
        assert_eq!(
            accumulator.get_document("$sum").unwrap(),
            &doc! { "$multiply": ["$price", "$stock"] }
        );
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_crud_and_aggregation_round_trip() {
        let mongo_url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&mongo_url).await.unwrap();
        let db = client.database("domain_products_test");
        let repo = MongoProductRepository::with_collection(&db, "products_round_trip");
        repo.collection().drop().await.unwrap();

        let widget = repo
            .create(CreateProduct {
                name: "Widget".to_string(),
                category: Some("Tools".to_string()),
                price: 9.99,
                stock: 10,
            })
            .await
            .unwrap();
        repo.create(CreateProduct {
            name: "Gadget".to_string(),
            category: Some("Tools".to_string()),
            price: 5.00,
            stock: 4,
        })
        .await
        .unwrap();

        let fetched = repo.get_by_id(widget.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Widget");

        let counts = repo
            .count_by_category(Some("Tools".to_string()))
            .await
            .unwrap();
        assert_eq!(
            counts,
            vec![CategoryCount {
                category: Some("Tools".to_string()),
                product_count: 2,
            }]
        );

        let averages = repo
            .average_price_by_category(Some("Tools".to_string()))
            .await
            .unwrap();
        assert!((averages[0].average_price - 7.495).abs() < 1e-9);

        let totals = repo
            .total_value_by_category(Some("Tools".to_string()))
            .await
            .unwrap();
        assert!((totals[0].total_value - 119.9).abs() < 1e-9);

        let replaced = repo
            .replace(
                widget.id,
                ReplaceProduct {
                    name: "Widget v2".to_string(),
                    category: Some("Tools".to_string()),
                    price: 12.0,
                    stock: 3,
                },
            )
            .await
            .unwrap();
        assert_eq!(replaced.id, widget.id);

        repo.delete(widget.id).await.unwrap();
        assert!(repo.get_by_id(widget.id).await.unwrap().is_none());

        repo.collection().drop().await.unwrap();
    }
}
