//! Logger module
//!
//! Logging utilities for the helpers and the demo server:
//! - Server lifecycle logging
//! - Access logging in Common Log Format
//! - Warning and error logging
//! - Optional file targets

pub mod writer;

use chrono::{DateTime, Local};
use hyper::{Method, StatusCode};
use std::net::SocketAddr;
use std::time::Duration;

use crate::config::Config;

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    /// Parse a configured level name; unknown names mean `Info`
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        Level::from_name(&config.logging.level),
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write(level: Level, message: &str) {
    match writer::get() {
        Some(w) => w.write(level, message),
        None if level == Level::Info => println!("{message}"),
        None => eprintln!("{message}"),
    }
}

pub fn log_info(message: &str) {
    write(Level::Info, &format!("[INFO] {message}"));
}

pub fn log_warning(message: &str) {
    write(Level::Warn, &format!("[WARN] {message}"));
}

pub fn log_error(message: &str) {
    write(Level::Error, &format!("[ERROR] {message}"));
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    log_info("======================================");
    log_info(&format!("Listening on: http://{addr}"));
    log_info(&format!("Content directory: {}", config.site.content_dir));
    log_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(redirect) = &config.site.redirect {
        log_info(&format!("Redirect mode: {redirect}"));
    }
    log_info("======================================");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

/// One served request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: SocketAddr,
    pub time: DateTime<Local>,
    pub method: Method,
    pub uri: String,
    pub status: StatusCode,
    pub body_bytes: u64,
    pub elapsed: Duration,
}

impl AccessLogEntry {
    /// Common Log Format, followed by the request time in seconds
    pub fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {}\" {} {} {:.3}",
            self.remote_addr.ip(),
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.uri,
            self.status.as_u16(),
            self.body_bytes,
            self.elapsed.as_secs_f64(),
        )
    }
}

pub fn log_access(entry: &AccessLogEntry) {
    write(Level::Info, &entry.format_common());
}
