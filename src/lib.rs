//! Small HTTP utility helpers for hyper services.
//!
//! - [`counter::PageViews`]: a thread-safe page view counter
//! - [`http::cache`]: `Cache-Control`/`Expires` helpers
//! - [`http::redirect`]: HTTP/HTTPS and fixed-target permanent redirects
//! - [`handler`]: handler traits plus the `use_path`/`use_prefix` adapters
//! - [`routing::Site`]: ordered path rules dispatching to handlers
//!
//! The remaining modules (`config`, `logger`, `app`, `server`) assemble these
//! into the demo server shipped as the `web-helpers` binary.

pub mod app;
pub mod config;
pub mod counter;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;

pub use counter::PageViews;
