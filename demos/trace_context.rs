//! Trace correlation example
//!
//! Demonstrates enriching log entries with the trace and span IDs of an
//! OpenTelemetry context.
//!
//! Run with: cargo run --example trace_context

use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};
use opentelemetry::Context;
use rust_log_facade::prelude::*;

fn handle_request(logger: &dyn Logger, cx: &Context) {
    let logger = logger.for_context(cx);
    logger.info("Handling request", Fields::from([("route", "/checkout")]));
    logger.info("Request complete", Fields::from([("status", 200)]));
}

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Trace Context Example ===\n");

    let logger = new_logger(
        LoggerInstance::Composite,
        &LoggerOptions::new().with_console(LogLevel::Info, true),
    )?;

    println!("1. Without an active span no trace fields are added:");
    handle_request(logger.as_ref(), &Context::new());

    println!("\n2. With a remote span the IDs appear as trace.id and span.id:");
    let span_context = SpanContext::new(
        TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap_or(TraceId::INVALID),
        SpanId::from_hex("00f067aa0ba902b7").unwrap_or(SpanId::INVALID),
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );
    handle_request(logger.as_ref(), &Context::new().with_remote_span_context(span_context));

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
