//! Tracing with file-based OTLP export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer provider → RotatingFile
//! ```
//!
//! Spans are written as OTLP/JSON lines to `complexapp-otlp.json` in the data
//! directory (overridable through `trace_file` in the configuration). The file
//! rotates at 10 MiB and keeps three backups. The filter comes from `RUST_LOG`,
//! then `trace_level`, then defaults to `info`.
//!
//! ```rust,no_run
//! use complexapp::observability::init_tracing;
//! use complexapp::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("tracing is active");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
