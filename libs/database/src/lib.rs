//! Connection management for MongoDB-backed services.
//!
//! Covers the plumbing every service repeats: building a verified client,
//! probing it for readiness endpoints, and retrying the initial connection
//! while the database is still coming up.
//!
//! # Features
//!
//! - `mongodb` (default) - the MongoDB connector
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//! - `all` - everything above
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("store");
//! let collection = db.collection::<Document>("products");
//! ```
//!
//! Retrying until the database answers:
//!
//! ```ignore
//! use database::common::RetryConfig;
//! use database::mongodb;
//!
//! let retry = RetryConfig::new().with_max_retries(5);
//! let client = mongodb::connect_with_retry("mongodb://localhost:27017", Some(retry)).await?;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_with_backoff};
