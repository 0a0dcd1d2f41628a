//! Basic logger usage example
//!
//! Demonstrates console logging at different levels, structured fields and
//! derived loggers.
//!
//! Run with: cargo run --example basic_usage

use rust_log_facade::prelude::*;
use rust_log_facade::{fields, info, warn};

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Basic Usage Example ===\n");

    // Plain console output for debug and above
    let options = LoggerOptions::new()
        .with_console(LogLevel::Debug, false)
        .with_console_colors(true);
    let logger = new_logger(LoggerInstance::Composite, &options)?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", Fields::new());
    logger.info("This is an info message", Fields::new());
    logger.warn("This is a warning message", Fields::new());
    logger.error("This is an error message", Fields::new());

    println!("\n2. Structured fields:");
    logger.info("User logged in", fields! { "user_id" => 123, "method" => "password" });
    info!(logger, "Processed {} items", 250; "batch" => 7);

    println!("\n3. Derived loggers carry their fields:");
    let request_logger = logger.with(fields! { "request_id" => "r-17", "route" => "/orders" });
    request_logger.info("Request accepted", Fields::new());
    warn!(request_logger, "Slow upstream"; "elapsed_ms" => 1250);
    logger.info("The parent logger is unchanged", Fields::new());

    println!("\n4. JSON console output with a warn threshold:");
    let json_logger = new_logger(
        LoggerInstance::Composite,
        &LoggerOptions::new().with_console(LogLevel::Warn, true),
    )?;
    json_logger.info("Info message (hidden)", Fields::new());
    json_logger.warn("Warning message (visible)", fields! { "disk_free_mb" => 512 });

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
