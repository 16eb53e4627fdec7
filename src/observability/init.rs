//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported batch.
pub const SERVICE_NAME: &str = "vault-explorer";

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "vault-explorer-otlp.json";

/// Installs the global subscriber: an `EnvFilter` at `config.trace_level`
/// (default `info`) feeding an OpenTelemetry layer that writes to
/// `<data_dir>/vault-explorer-otlp.json`.
///
/// Tracing is optional: if the data directory cannot be created nothing is
/// installed. Only the first call in a process takes effect.
///
/// # Example
///
/// ```rust
/// use vault_explorer::observability::init_tracing;
/// use vault_explorer::Config;
///
/// let dir = tempfile::tempdir()?;
/// let config = Config {
///     data_dir: dir.path().to_string_lossy().to_string(),
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = Path::new(&config.data_dir);
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let tracer = provider.tracer(SERVICE_NAME);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer));

    let _ = subscriber.try_init();
}
