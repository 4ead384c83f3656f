//! HTTP response building module
//!
//! Builders for the handful of responses the helpers and the demo site produce.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header;
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build 400 Bad Request response
pub fn build_400_response(reason: &str) -> Response<Full<Bytes>> {
    build_text_response(StatusCode::BAD_REQUEST, &format!("400 Bad Request: {reason}"))
}

/// Build a plain text response
pub fn build_text_response(status: StatusCode, text: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(text.to_string())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a redirect response pointing at an already resolved `location`
///
/// GET and HEAD responses carry an HTML content type; only GET gets a body,
/// a short link to the new location.
pub fn build_redirect_response(
    status: StatusCode,
    location: &str,
    method: &Method,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(status)
        .header(header::LOCATION, location);

    if method == Method::GET || method == Method::HEAD {
        builder = builder.header(header::CONTENT_TYPE, "text/html; charset=utf-8");
    }

    let body = if method == Method::GET {
        Bytes::from(format!(
            "<a href=\"{}\">{}</a>.\n",
            html_escape(location),
            status.canonical_reason().unwrap_or("Redirect")
        ))
    } else {
        Bytes::new()
    };

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build JSON response
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "500 Internal Server Error",
            );
        }
    };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response for file content
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_redirect_get_has_link_body() {
        let resp = build_redirect_response(
            StatusCode::MOVED_PERMANENTLY,
            "https://example.com/a?b=1&c=2",
            &Method::GET,
        );
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            resp.headers()[header::LOCATION],
            "https://example.com/a?b=1&c=2"
        );
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(
            body_string(resp).await,
            "<a href=\"https://example.com/a?b=1&amp;c=2\">Moved Permanently</a>.\n"
        );
    }

    #[tokio::test]
    async fn test_redirect_head_and_post() {
        let head = build_redirect_response(StatusCode::MOVED_PERMANENTLY, "/x", &Method::HEAD);
        assert!(head.headers().contains_key(header::CONTENT_TYPE));
        assert_eq!(body_string(head).await, "");

        let post = build_redirect_response(StatusCode::MOVED_PERMANENTLY, "/x", &Method::POST);
        assert!(!post.headers().contains_key(header::CONTENT_TYPE));
        assert_eq!(post.headers()[header::LOCATION], "/x");
        assert_eq!(body_string(post).await, "");
    }

    #[tokio::test]
    async fn test_json_response() {
        let resp = build_json_response(StatusCode::OK, &serde_json::json!({ "page_views": 3 }));
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_string(resp).await, r#"{"page_views":3}"#);
    }

    #[tokio::test]
    async fn test_file_response_head_has_no_body() {
        let resp = build_file_response(Bytes::from_static(b"hello"), "text/plain", true);
        assert_eq!(resp.headers()[header::CONTENT_LENGTH], "5");
        assert_eq!(body_string(resp).await, "");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&#34;x&#34;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
