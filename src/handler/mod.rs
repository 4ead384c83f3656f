//! Request handler module
//!
//! Handler traits shared by the helpers, the path-rewriting adapters
//! (`use_path`, `use_prefix`) and the static file path handler.

pub mod static_files;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response, Uri};
use percent_encoding::percent_decode_str;
use std::future::Future;
use std::pin::Pin;

use crate::http;

/// Boxed response future returned by every handler
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response<Full<Bytes>>> + Send>>;

/// Something that answers a request.
///
/// Closures `Fn(Request<B>) -> impl Future<Output = Response<_>>` are handlers.
pub trait Handler<B>: Send + Sync {
    fn serve(&self, req: Request<B>) -> HandlerFuture;
}

impl<B, F, Fut> Handler<B> for F
where
    F: Fn(Request<B>) -> Fut + Send + Sync,
    Fut: Future<Output = Response<Full<Bytes>>> + Send + 'static,
{
    fn serve(&self, req: Request<B>) -> HandlerFuture {
        Box::pin(self(req))
    }
}

/// A handler that is told which resource path to serve, separately from the
/// request path.
pub trait PathHandler<B>: Send + Sync {
    fn serve_path(&self, req: Request<B>, path: String) -> HandlerFuture;
}

impl<B, F, Fut> PathHandler<B> for F
where
    F: Fn(Request<B>, String) -> Fut + Send + Sync,
    Fut: Future<Output = Response<Full<Bytes>>> + Send + 'static,
{
    fn serve_path(&self, req: Request<B>, path: String) -> HandlerFuture {
        Box::pin(self(req, path))
    }
}

/// Handler calling a path handler with a fixed path
#[derive(Debug, Clone)]
pub struct UsePath<H> {
    path: String,
    handler: H,
}

/// Handler calling a path handler with `prefix + request path`
#[derive(Debug, Clone)]
pub struct UsePrefix<H> {
    prefix: String,
    handler: H,
}

/// Serve every request with `handler` and the fixed `path`, so that
/// several URLs can refer to the same content.
///
/// ```
/// use web_helpers::handler::{static_files, use_path};
/// use web_helpers::routing::Site;
///
/// let mut site: Site<()> = Site::new();
/// // "/" and "/index.html" both serve content/index.html
/// site.equals(["/", "/index.html"], use_path("content/index.html", static_files::serve_file));
/// ```
pub fn use_path<H>(path: impl Into<String>, handler: H) -> UsePath<H> {
    UsePath {
        path: path.into(),
        handler,
    }
}

/// Like [`use_path`], but the path is the request path with `prefix`
/// prepended. No separator is inserted between the two.
pub fn use_prefix<H>(prefix: impl Into<String>, handler: H) -> UsePrefix<H> {
    UsePrefix {
        prefix: prefix.into(),
        handler,
    }
}

impl<B, H: PathHandler<B>> Handler<B> for UsePath<H> {
    fn serve(&self, req: Request<B>) -> HandlerFuture {
        self.handler.serve_path(req, self.path.clone())
    }
}

impl<B, H: PathHandler<B>> Handler<B> for UsePrefix<H> {
    fn serve(&self, req: Request<B>) -> HandlerFuture {
        let Some(decoded) = decoded_path(req.uri()) else {
            return Box::pin(async { http::response::build_400_response("malformed path") });
        };
        let path = format!("{}{decoded}", self.prefix);
        self.handler.serve_path(req, path)
    }
}

/// Percent-decoded request path, or `None` when it is not valid UTF-8
pub fn decoded_path(uri: &Uri) -> Option<String> {
    percent_decode_str(uri.path())
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn echo_path(_req: Request<()>, path: String) -> Response<Full<Bytes>> {
        Response::new(Full::new(Bytes::from(path)))
    }

    async fn body_of(handler: &impl Handler<()>, uri: &str) -> String {
        let req = Request::builder().uri(uri).body(()).unwrap();
        let resp = handler.serve(req).await;
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_use_path_ignores_request_path() {
        let handler = use_path("content/index.html", echo_path);
        assert_eq!(body_of(&handler, "/").await, "content/index.html");
        assert_eq!(body_of(&handler, "/index.html").await, "content/index.html");
    }

    #[tokio::test]
    async fn test_use_prefix_prepends() {
        let handler = use_prefix("images", echo_path);
        assert_eq!(body_of(&handler, "/cat.jpg").await, "images/cat.jpg");
        assert_eq!(body_of(&handler, "/a/b.png?size=2").await, "images/a/b.png");
    }

    #[tokio::test]
    async fn test_use_prefix_decodes_path() {
        let handler = use_prefix("images", echo_path);
        assert_eq!(body_of(&handler, "/my%20cat.jpg").await, "images/my cat.jpg");
        assert_eq!(body_of(&handler, "/%2e%2e/x.jpg").await, "images/../x.jpg");
    }

    #[tokio::test]
    async fn test_use_prefix_rejects_invalid_utf8() {
        let handler = use_prefix("images", echo_path);
        let req = Request::builder().uri("/%ff.jpg").body(()).unwrap();
        let resp = handler.serve(req).await;
        assert_eq!(resp.status(), hyper::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_decoded_path() {
        let uri: Uri = "/a%2Fb/c%20d?x=%20".parse().unwrap();
        assert_eq!(decoded_path(&uri).as_deref(), Some("/a/b/c d"));
        let uri: Uri = "/%C3%A9t%C3%A9".parse().unwrap();
        assert_eq!(decoded_path(&uri).as_deref(), Some("/été"));
    }

    #[tokio::test]
    async fn test_closure_is_handler() {
        let handler = |req: Request<()>| {
            let path = req.uri().path().to_string();
            async move { Response::new(Full::new(Bytes::from(path))) }
        };
        assert_eq!(body_of(&handler, "/hello").await, "/hello");
    }
}
