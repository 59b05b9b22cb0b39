use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install color-eyre's panic and error report hooks.
///
/// Call before anything fallible in main() so reports carry file:line
/// locations. The environment section is switched off to keep reports
/// short. Safe to call more than once.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Set up the global tracing subscriber for the given environment.
///
/// Production gets flattened JSON for log aggregation; development gets the
/// pretty human format. Both attach `tracing_error::ErrorLayer` so eyre
/// reports include span traces.
///
/// `RUST_LOG` overrides the level filter; without it production logs
/// `error` and development logs `trace`.
///
/// Calling this twice is fine: if a global subscriber already exists
/// (typical under `cargo test`), the second call is a no-op.
///
/// # Example with instrumentation
///
/// ```ignore
/// use tracing::instrument;
///
/// #[instrument(skip(repository))]
/// async fn load(repository: &MongoProductRepository, id: ObjectId) -> ProductResult<Product> {
///     repository.get_by_id(id).await
/// }
/// ```
pub fn init_tracing(environment: &Environment) {
    let is_production = environment.is_production();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if is_production {
            EnvFilter::new("error")
        } else {
            EnvFilter::new("trace")
        }
    });

    let fmt_layer = if is_production {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .pretty()
            .boxed()
    };

    let result = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init();

    match result {
        Ok(_) => info!("Tracing initialized, environment: {:?}", environment),
        Err(_) => debug!("Global subscriber already set, leaving it in place"),
    }
}
