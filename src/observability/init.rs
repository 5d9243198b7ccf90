//! Subscriber setup.

use super::tracer::{file_tracer_provider, SCOPE};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters spans by level
/// 2. Bridges them to OpenTelemetry
/// 3. Serializes finished spans as OTLP JSON lines
/// 4. Appends them to a rotating file with numbered backups
///
/// # Parameters
///
/// * `config` - Client configuration; `trace_level` and `trace_file` are read
///
/// # Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # File Location
///
/// `config.trace_file()`, which defaults to `complexapp-otlp.json` in the
/// platform data directory (e.g. `~/.local/share/complexapp/`).
///
/// # Failure Handling
///
/// Observability is optional. When the trace directory cannot be created, or
/// a global subscriber is already installed, this returns without doing
/// anything and the client runs untraced.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL))
    });

    let trace_file = config.trace_file();
    if let Some(dir) = trace_file.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(trace_file, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
