use mongodb::Client;
use std::time::Instant;

/// Outcome of a MongoDB health probe.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the probe succeeded
    pub healthy: bool,
    /// Error details when it did not
    pub message: Option<String>,
    /// How long the probe took, in milliseconds
    pub response_time_ms: u64,
}

/// Pings the server and reports whether it answered.
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let healthy = check_health(&client).await;
/// ```
pub async fn check_health(client: &Client) -> bool {
    client.list_database_names().await.is_ok()
}

/// Like [`check_health`] but also reports latency and the failure message.
///
/// Readiness endpoints use this to surface why a probe failed instead of a
/// bare boolean.
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health_detailed};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     eprintln!("MongoDB probe failed: {:?}", status.message);
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let outcome = client.list_database_names().await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}
