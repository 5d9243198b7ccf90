//! Tracer provider exporting spans to a rotating OTLP/JSON file.

use super::file_writer::{RotatingFile, RotationPolicy};
use super::span_formatter::OtlpJson;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::path::PathBuf;

/// Instrumentation scope name recorded on every exported batch.
pub const SCOPE: &str = "complexapp";

/// Writes each exported batch as one JSON line.
#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    encoder: OtlpJson,
    stopped: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("file exporter already shut down"))
        } else {
            let line = self.encoder.encode(&batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(format!("{}: {e}", self.file.path().display())))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

/// Builds a provider whose spans are exported synchronously to `trace_file`.
///
/// # Parameters
///
/// * `trace_file` - Active trace file; backups are written next to it
/// * `resource` - Service attributes stamped on every exported batch
///
/// # Returns
///
/// A provider using the simple (non-batching) span processor, so each span
/// is on disk as soon as it ends.
#[must_use]
pub fn file_tracer_provider(trace_file: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(trace_file, RotationPolicy::default()),
        encoder: OtlpJson::new(&resource, SCOPE),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_trace_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "complexapp")]);
        let provider = file_tracer_provider(path.clone(), resource);

        provider.tracer(SCOPE).in_span("search_request", |_cx| {});

        let contents = std::fs::read_to_string(path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(
            doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"],
            "search_request"
        );
    }
}
