//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → JSON lines
//! ```
//!
//! Traces land in `<data_dir>/vault-explorer-otlp.json`, one OTLP JSON
//! document per line. The file rotates at 10 MB and keeps three numbered
//! backups. The level comes from the `trace_level` plugin option and
//! defaults to `info`.
//!
//! Secret values never appear in spans or events; [`crate::domain::SecretValue`]
//! redacts itself when formatted with `Debug`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter writing OTLP JSON
//! - [`file_writer`]: Size-based rotation with numbered backups

mod exporter;
mod file_writer;
mod init;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE};
