//! File logging example
//!
//! Demonstrates plain console output alongside a rotating JSON file that only
//! receives errors.
//!
//! Run with: cargo run --example file_logging

use rust_log_facade::prelude::*;
use rust_log_facade::fields;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - File Logging Example ===\n");

    let options = LoggerOptions::from_json_str(
        r#"{
            "EnableConsole": true,
            "ConsoleLevel": "info",
            "EnableFile": true,
            "Filename": "logs/application.log",
            "FileJSONFormat": true,
            "FileLevel": "error",
            "FileMaxSize": 10,
            "FileMaxBackups": 5,
            "FileMaxAge": 7,
            "FileCompress": true
        }"#,
    )?;
    let logger = new_logger(LoggerInstance::Composite, &options)?;

    println!("1. Info goes to the console only:");
    logger.info("Application started", fields! { "version" => "0.1.0" });

    println!("\n2. Errors go to both sinks:");
    for attempt in 1..=3 {
        logger.error("Database connection failed", fields! { "attempt" => attempt });
    }

    logger.flush();
    println!("\n   Error records written to: {}", options.file_path().display());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
