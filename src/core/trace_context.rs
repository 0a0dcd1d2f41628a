//! Trace-correlation fields extracted from a request-scoped context

use super::log_context::Fields;
use opentelemetry::trace::TraceContextExt;
use opentelemetry::Context;
use serde::{Deserialize, Serialize};

/// Field carrying the trace ID, as named by the Elastic Common Schema
pub const TRACE_ID_KEY: &str = "trace.id";

/// Field carrying the active span ID
pub const SPAN_ID_KEY: &str = "span.id";

/// Correlation identifiers linking log entries to a distributed trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingContext {
    /// 32-digit lowercase hex trace ID
    pub trace_id: String,

    /// 16-digit lowercase hex span ID
    pub span_id: String,
}

impl TracingContext {
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
        }
    }

    /// Read the active span of an OpenTelemetry context.
    ///
    /// Returns `None` when the context carries no valid span, which is the
    /// common case outside of a traced request.
    pub fn from_context(cx: &Context) -> Option<Self> {
        let span = cx.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .with_field(TRACE_ID_KEY, self.trace_id.as_str())
            .with_field(SPAN_ID_KEY, self.span_id.as_str())
    }
}

/// Trace fields for `cx`, if it carries a valid span
pub fn trace_fields(cx: &Context) -> Option<Fields> {
    TracingContext::from_context(cx).map(|tracing| tracing.to_fields())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{SpanContext, SpanId, TraceFlags, TraceId, TraceState};

    fn traced_context(trace_hex: &str, span_hex: &str) -> Context {
        let span_context = SpanContext::new(
            TraceId::from_hex(trace_hex).unwrap(),
            SpanId::from_hex(span_hex).unwrap(),
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );
        Context::new().with_remote_span_context(span_context)
    }

    #[test]
    fn test_empty_context_has_no_trace() {
        assert!(TracingContext::from_context(&Context::new()).is_none());
        assert!(trace_fields(&Context::new()).is_none());
    }

    #[test]
    fn test_fields_from_valid_span() {
        let cx = traced_context("4bf92f3577b34da6a3ce929d0e0e4736", "00f067aa0ba902b7");

        let tracing = TracingContext::from_context(&cx).unwrap();
        assert_eq!(tracing.trace_id, "4bf92f3577b34da6a3ce929d0e0e4736");
        assert_eq!(tracing.span_id, "00f067aa0ba902b7");

        let fields = trace_fields(&cx).unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key(TRACE_ID_KEY));
        assert!(fields.contains_key(SPAN_ID_KEY));
    }

    #[test]
    fn test_invalid_span_is_ignored() {
        let span_context = SpanContext::new(
            TraceId::INVALID,
            SpanId::INVALID,
            TraceFlags::default(),
            true,
            TraceState::default(),
        );
        let cx = Context::new().with_remote_span_context(span_context);

        assert!(trace_fields(&cx).is_none());
    }
}
