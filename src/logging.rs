//! Diagnostics go to stderr so stdout carries only usage text and launch plans.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from the first usable directive, falling back to `warn`.
pub fn build_env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Swaps the active filter once the launcher config is known.
pub struct LogHandle(reload::Handle<EnvFilter, Registry>);

impl LogHandle {
    pub fn set_filter(&self, directives: Option<&str>) -> Result<(), reload::Error> {
        self.0.reload(build_env_filter(directives))
    }
}

pub fn init_logging(
    directives: Option<&str>,
) -> Result<LogHandle, tracing_subscriber::util::TryInitError> {
    let (filter, handle) = reload::Layer::new(build_env_filter(directives));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();
    Registry::default().with(filter).with(layer).try_init()?;
    Ok(LogHandle(handle))
}
