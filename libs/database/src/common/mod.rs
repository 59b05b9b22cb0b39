//! Helpers that are not specific to any one database

pub mod retry;

pub use retry::{RetryConfig, retry, retry_with_backoff};
