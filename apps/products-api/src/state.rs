//! Shared state handed to request handlers.

use mongodb::{Client, Database};

/// Cloned per use; the client and database clone as handles over one
/// shared connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Kept alongside `db` so shutdown can close the client it came from
    pub mongo_client: Client,
    pub db: Database,
}
