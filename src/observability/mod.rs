//! Tracing initialization.
//!
//! Sets up the `tracing` subscriber the rest of the crate logs through.
//! Output goes to stderr so a frontend using stdout for results stays
//! clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Config;

/// Initializes the tracing subscriber.
///
/// # Level Resolution
///
/// 1. The `RUST_LOG` environment variable, when set
/// 2. `config.trace_level`, when set
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times, only the first call takes
/// effect.
///
/// # Example
///
/// ```no_run
/// use excursio::observability::init_tracing;
/// use excursio::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
