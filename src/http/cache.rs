//! HTTP cache control module
//!
//! Sets the headers that tell clients whether, and for how long, a response
//! may be cached.

use chrono::{DateTime, TimeDelta, Utc};
use hyper::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;

/// Slightly less than one year, to conform to RFC 2616.
///
/// Useful as a cache duration for content that never changes.
pub const ONE_YEAR: Duration = Duration::from_secs(60 * 60 * 24 * ONE_YEAR_DAYS.unsigned_abs());

const ONE_YEAR_DAYS: i64 = 364;

/// HTTP-date layout (RFC 7231 IMF-fixdate)
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an HTTP-date, e.g. `Mon, 02 Jan 2006 15:04:05 GMT`
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE_FORMAT).to_string()
}

/// Advise the client not to cache the response.
///
/// Uses the `Cache-Control`, `Pragma` and `Expires` headers, replacing any
/// values already present.
pub fn do_not_cache(headers: &mut HeaderMap) {
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
}

/// Advise the client to cache the response for `duration`.
///
/// Sets `Last-Modified` (when `mod_time` is known), `Expires` and `Vary`.
pub fn cache(headers: &mut HeaderMap, mod_time: Option<DateTime<Utc>>, duration: Duration) {
    cache_at(headers, mod_time, duration, Utc::now());
}

/// Same as [`cache`], with `Expires` computed from the given `now`
pub fn cache_at(
    headers: &mut HeaderMap,
    mod_time: Option<DateTime<Utc>>,
    duration: Duration,
    now: DateTime<Utc>,
) {
    if let Some(modified) = mod_time {
        insert_date(headers, header::LAST_MODIFIED, modified);
    }
    insert_date(headers, header::EXPIRES, expires_at(now, duration));
    headers.insert(header::VARY, HeaderValue::from_static("Accept-Encoding"));
}

/// `now + duration`, clamped to `now + ONE_YEAR` when the sum is not representable
fn expires_at(now: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(duration)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or_else(|| now + TimeDelta::days(ONE_YEAR_DAYS))
}

fn insert_date(headers: &mut HeaderMap, name: header::HeaderName, time: DateTime<Utc>) {
    // Formatted dates are plain ASCII, so this never fails in practice
    if let Ok(value) = HeaderValue::from_str(&http_date(time)) {
        headers.insert(name, value);
    }
}
