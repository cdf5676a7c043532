use crate::{env_or_default, Environment};
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre with location sections on and env sections off.
///
/// Call early in `main()`, before any fallible operation. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Log filter for the process.
///
/// `RUST_LOG` wins when set. Otherwise `LOG_LEVEL` (default `info`) is used, with
/// the noisier dependencies held at `warn` in production.
pub fn log_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = env_or_default("LOG_LEVEL", "info").to_ascii_lowercase();
        let directives = if environment.is_production() {
            format!("{level},sqlx=warn,sea_orm=warn,tower_http=info")
        } else {
            level
        };
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Initialize the global tracing subscriber with an `ErrorLayer` for span traces.
///
/// - **Production** (`APP_ENV=production`): flattened JSON events, no targets
/// - **Development** (default): pretty, human-readable output
///
/// Safe to call more than once; later calls are no-ops (common in tests).
pub fn init_tracing(environment: &Environment) {
    let filter = log_filter(environment);

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(_) => info!(environment = ?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}
