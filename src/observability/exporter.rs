//! Span exporter that appends OTLP JSON documents to a rotating file.
//!
//! Each exported batch becomes one line shaped like an OTLP/HTTP JSON trace
//! request, so the file can be replayed into any collector:
//!
//! ```json
//! {"resourceSpans":[{"resource":{"attributes":[...]},
//!   "scopeSpans":[{"scope":{"name":"vault-explorer"},"spans":[...]}]}]}
//! ```

use super::file_writer::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Value as JsonValue};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope written on every batch.
pub const SCOPE_NAME: &str = "vault-explorer";

struct OtlpFileExporter {
    file: RotatingFile,
    resource: Resource,
    is_shutdown: bool,
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = otlp_document(&self.resource, &batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

impl std::fmt::Debug for OtlpFileExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpFileExporter")
            .field("file", &self.file)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Tracer provider that exports every finished span to `file_path`.
///
/// Spans are exported as they end; the plugin is single-threaded, so there
/// is no batch processor to drive.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        file: RotatingFile::new(file_path),
        resource: resource.clone(),
        is_shutdown: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn otlp_document(resource: &Resource, batch: &[SpanData]) -> JsonValue {
    let resource_attributes: Vec<JsonValue> = resource
        .iter()
        .map(|(key, value)| json!({ "key": key.as_str(), "value": any_value(value) }))
        .collect();

    json!({
        "resourceSpans": [{
            "resource": { "attributes": resource_attributes },
            "scopeSpans": [{
                "scope": { "name": SCOPE_NAME },
                "spans": batch.iter().map(span_json).collect::<Vec<_>>(),
            }]
        }]
    })
}

fn span_json(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(event_json).collect::<Vec<_>>(),
        "links": span.links.iter().map(link_json).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn event_json(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn link_json(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

/// OTLP encodes 64-bit integers as strings.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}

fn attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.as_str(), "value": any_value(&kv.value) }))
        .collect()
}

fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}
