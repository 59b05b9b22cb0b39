use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A product document as it lives in the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned id, mapped onto the document's `_id`
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Product name
    pub name: String,
    /// Optional category used for grouping
    pub category: Option<String>,
    /// Unit price
    pub price: f64,
    /// Units in stock
    pub stock: i32,
}

/// Body of a create request; the id is never client-supplied
///
/// The id is assigned by the server; an id supplied by the client is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
}

/// DTO for replacing an existing product
///
/// Replacement is full: every stored field takes the value given here,
/// and the id is taken from the request path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReplaceProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
}

/// Client-facing product representation
///
/// The ObjectId is rendered as its 24-character hex string.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    /// Unique identifier as a hex string
    #[schema(example = "68b2f0aa9c3f2a0001d4e5f6")]
    pub id: String,
    /// Product name
    pub name: String,
    /// Optional category used for grouping
    pub category: Option<String>,
    /// Unit price
    pub price: f64,
    /// Units in stock
    pub stock: i32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            category: product.category,
            price: product.price,
            stock: product.stock,
        }
    }
}

/// Number of products per category
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Grouping key; null covers products without a category
    pub category: Option<String>,
    /// Number of products in the category
    pub product_count: i64,
}

/// Average product price per category
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAveragePrice {
    /// Grouping key; null covers products without a category
    pub category: Option<String>,
    /// Arithmetic mean of product prices in the category
    pub average_price: f64,
}

/// Total inventory value (price times stock) per category
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotalValue {
    /// Grouping key; null covers products without a category
    pub category: Option<String>,
    /// Sum of price * stock over products in the category
    pub total_value: f64,
}

impl Product {
    /// Create a new product from a CreateProduct DTO with a fresh id
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            category: input.category,
            price: input.price,
            stock: input.stock,
        }
    }

    /// Build the replacement document for an existing product
    pub fn with_id(id: ObjectId, input: ReplaceProduct) -> Self {
        Self {
            id,
            name: input.name,
            category: input.category,
            price: input.price,
            stock: input.stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::to_document;

    fn create_input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            category: Some("electronics".to_string()),
            price: 19.99,
            stock: 5,
        }
    }

    #[test]
    fn test_new_assigns_unique_ids() {
        let first = Product::new(create_input("keyboard"));
        let second = Product::new(create_input("keyboard"));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_product_stores_id_under_underscore_id() {
        let product = Product::new(create_input("keyboard"));
        let doc = to_document(&product).unwrap();
        assert!(doc.contains_key("_id"));
        assert!(!doc.contains_key("id"));
    }

    #[test]
    fn test_with_id_keeps_caller_id() {
        let id = ObjectId::new();
        let replacement = ReplaceProduct {
            name: "keyboard".to_string(),
            category: None,
            price: 25.0,
            stock: 2,
        };
        let product = Product::with_id(id, replacement);
        assert_eq!(product.id, id);
        assert_eq!(product.name, "keyboard");
    }

    #[test]
    fn test_response_renders_hex_id() {
        let product = Product::new(create_input("keyboard"));
        let expected = product.id.to_hex();
        let response = ProductResponse::from(product);
        assert_eq!(response.id, expected);
        assert_eq!(response.name, "keyboard");
    }

    #[test]
    fn test_category_count_serializes_camel_case() {
        let count = CategoryCount {
            category: Some("electronics".to_string()),
            product_count: 3,
        };
        let json = serde_json::to_value(&count).unwrap();
        assert_eq!(json["category"], "electronics");
        assert_eq!(json["productCount"], 3);
    }

    #[test]
    fn test_null_category_serializes_as_null() {
        let value = CategoryTotalValue {
            category: None,
            total_value: 120.5,
        };
        let json = serde_json::to_value(&value).unwrap();
        assert!(json["category"].is_null());
        assert_eq!(json["totalValue"], 120.5);
    }
}
