//! Redirect helpers
//!
//! Permanent redirects between HTTP and HTTPS, and to a fixed target.
//! The incoming request is never modified; the target URL is built fresh.

use std::fmt;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header;
use hyper::{Request, Response, StatusCode, Uri};

use crate::handler::{Handler, HandlerFuture};
use crate::http::response::{build_400_response, build_redirect_response};

/// Reasons a scheme redirect URL cannot be built from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectError {
    /// Neither a Host header nor an absolute request URI
    MissingHost,
    /// The host or path does not form a valid URI
    InvalidUri(String),
}

impl fmt::Display for RedirectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHost => write!(f, "request has no host"),
            Self::InvalidUri(e) => write!(f, "invalid redirect target: {e}"),
        }
    }
}

impl std::error::Error for RedirectError {}

/// Redirect to the same page over HTTPS.
///
/// Do not use this when serving HTTPS, or an infinite redirection loop will occur.
pub fn redirect_to_https<B>(req: &Request<B>) -> Response<Full<Bytes>> {
    redirect_to_scheme(req, "https")
}

/// Redirect to the same page over plain HTTP.
///
/// Do not use this when serving HTTP, or an infinite redirection loop will occur.
pub fn redirect_to_http<B>(req: &Request<B>) -> Response<Full<Bytes>> {
    redirect_to_scheme(req, "http")
}

/// Permanently redirect `req` to `target`, resolved against the request path
pub fn redirect<B>(req: &Request<B>, target: &str) -> Response<Full<Bytes>> {
    let location = resolve_location(req.uri().path(), target);
    build_redirect_response(StatusCode::MOVED_PERMANENTLY, &location, req.method())
}

fn redirect_to_scheme<B>(req: &Request<B>, scheme: &str) -> Response<Full<Bytes>> {
    match with_scheme(req, scheme) {
        Ok(uri) => build_redirect_response(
            StatusCode::MOVED_PERMANENTLY,
            &uri.to_string(),
            req.method(),
        ),
        Err(e) => {
            crate::logger::log_warning(&format!("Cannot redirect to {scheme}: {e}"));
            build_400_response(&e.to_string())
        }
    }
}

/// Build the URL of `req` with its scheme replaced by `scheme`
pub fn with_scheme<B>(req: &Request<B>, scheme: &str) -> Result<Uri, RedirectError> {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .map(ToString::to_string)
        .or_else(|| req.uri().authority().map(ToString::to_string))
        .ok_or(RedirectError::MissingHost)?;

    let path_and_query = req
        .uri()
        .path_and_query()
        .map_or("/", hyper::http::uri::PathAndQuery::as_str);

    Uri::builder()
        .scheme(scheme)
        .authority(host.as_str())
        .path_and_query(path_and_query)
        .build()
        .map_err(|e| RedirectError::InvalidUri(e.to_string()))
}

/// Handler that redirects every request to HTTPS
#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectToHttps;

/// Handler that redirects every request to HTTP
#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectToHttp;

/// Handler that redirects every request to the enclosed URL
///
/// ```
/// use web_helpers::http::redirect::Redirect;
/// use web_helpers::routing::Site;
///
/// let mut site: Site<()> = Site::new();
/// site.always(Redirect::new("https://www.example.com/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect(pub String);

impl Redirect {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }
}

impl<B> Handler<B> for RedirectToHttps {
    fn serve(&self, req: Request<B>) -> HandlerFuture {
        let resp = redirect_to_https(&req);
        Box::pin(async move { resp })
    }
}

impl<B> Handler<B> for RedirectToHttp {
    fn serve(&self, req: Request<B>) -> HandlerFuture {
        let resp = redirect_to_http(&req);
        Box::pin(async move { resp })
    }
}

impl<B> Handler<B> for Redirect {
    fn serve(&self, req: Request<B>) -> HandlerFuture {
        let resp = redirect(&req, &self.0);
        Box::pin(async move { resp })
    }
}

/// Turn a redirect target into the `Location` value.
///
/// Absolute URLs and network-path references (`//host/...`) are kept as is.
/// Anything else is made absolute against the directory of `request_path`
/// and cleaned, keeping a trailing slash and the query string.
pub fn resolve_location(request_path: &str, target: &str) -> String {
    if has_scheme(target) || target.starts_with("//") {
        return target.to_string();
    }

    let old_path = if request_path.is_empty() {
        "/"
    } else {
        request_path
    };

    let joined = if target.starts_with('/') {
        target.to_string()
    } else {
        let dir_end = old_path.rfind('/').map_or(0, |i| i + 1);
        format!("{}{target}", &old_path[..dir_end])
    };

    let (path, query) = match joined.find('?') {
        Some(i) => joined.split_at(i),
        None => (joined.as_str(), ""),
    };

    let mut cleaned = clean_path(path);
    if path.ends_with('/') && !cleaned.ends_with('/') {
        cleaned.push('/');
    }
    cleaned.push_str(query);
    cleaned
}

/// Whether `s` starts with a URL scheme such as `https:`
fn has_scheme(s: &str) -> bool {
    let Some(colon) = s.find(':') else {
        return false;
    };
    let scheme = &s[..colon];
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Lexically normalize a slash-separated path.
///
/// Collapses repeated slashes, drops `.` elements and resolves `..` against
/// the preceding element. An empty result becomes `.` (or `/` when rooted).
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
