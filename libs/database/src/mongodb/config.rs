#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default};

/// Connection settings for a MongoDB deployment.
///
/// Construct one directly for tests and tools, or load it from the
/// environment via `FromEnv` (behind the `config` feature) in services.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017");
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "store");
///
/// // Requires the `config` feature
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string, `mongodb://[user:pass@]host[:port][/db][?options]`
    pub url: String,

    /// Database the service operates on
    pub database: String,

    /// Name reported to the server, visible in its connection logs
    pub app_name: Option<String>,

    /// Upper bound on pooled connections
    pub max_pool_size: u32,

    /// Connections the pool keeps warm
    pub min_pool_size: u32,

    /// Timeout for establishing a single connection, in seconds
    pub connect_timeout_secs: u64,

    /// How long to wait for a suitable server before giving up, in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Settings for `url` with the stock pool and timeout defaults.
    ///
    /// # Example
    /// ```ignore
    /// let config = MongoConfig::new("mongodb://localhost:27017");
    /// ```
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }

    /// Like [`MongoConfig::new`] but with an explicit database name.
    ///
    /// # Example
    /// ```ignore
    /// let config = MongoConfig::with_database("mongodb://localhost:27017", "store");
    /// ```
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        let mut config = Self::new(url);
        config.database = database.into();
        config
    }

    /// Like [`MongoConfig::with_database`] but with explicit pool bounds.
    ///
    /// # Example
    /// ```ignore
    /// let config = MongoConfig::with_pool_size(
    ///     "mongodb://localhost:27017",
    ///     "store",
    ///     50,
    ///     10,
    /// );
    /// ```
    pub fn with_pool_size(
        url: impl Into<String>,
        database: impl Into<String>,
        max_pool_size: u32,
        min_pool_size: u32,
    ) -> Self {
        let mut config = Self::with_database(url, database);
        config.max_pool_size = max_pool_size;
        config.min_pool_size = min_pool_size;
        config
    }

    /// Sets the name this client reports to the server.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// The connection URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The configured database name.
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::new("mongodb://localhost:27017")
    }
}

/// Reads settings from the environment.
///
/// Variables:
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (required)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default 100)
/// - `MONGODB_MIN_POOL_SIZE` (default 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default 30)
///
/// # Example
/// ```ignore
/// use database::mongodb::MongoConfig;
/// use core_config::FromEnv;
///
/// let config = MongoConfig::from_env()?;
/// ```
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: required_with_fallback("MONGODB_URL", "MONGO_URL")?,
            database: required_with_fallback("MONGODB_DATABASE", "MONGO_DATABASE")?,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: parse_env("MONGODB_MAX_POOL_SIZE", "100")?,
            min_pool_size: parse_env("MONGODB_MIN_POOL_SIZE", "5")?,
            connect_timeout_secs: parse_env("MONGODB_CONNECT_TIMEOUT_SECS", "10")?,
            server_selection_timeout_secs: parse_env(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                "30",
            )?,
        })
    }
}

/// Reads `primary`, then `fallback`; errors name both so the message tells
/// the operator every accepted spelling.
#[cfg(feature = "config")]
fn required_with_fallback(primary: &str, fallback: &str) -> Result<String, ConfigError> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .map_err(|_| ConfigError::MissingEnvVar(format!("{} or {}", primary, fallback)))
}

/// Parses an optional variable, using `default` when it is unset.
#[cfg(feature = "config")]
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{}", e),
        })
}
