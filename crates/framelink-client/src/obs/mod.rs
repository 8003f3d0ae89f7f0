//! SDK observability: counter registry and an opt-in logging init helper.

pub mod metrics;

pub use metrics::SdkMetrics;

use tracing_subscriber::{fmt, EnvFilter};

/// Opt-in logging for embedders and integration runs. Safe to call more
/// than once.
pub fn init_logging() {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}
