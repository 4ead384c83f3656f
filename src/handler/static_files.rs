//! Static file serving
//!
//! Path handlers that read a file from disk and answer with its content.

use crate::http::{self, mime};
use crate::logger;
use chrono::{DateTime, Utc};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::path::{Component, Path};
use tokio::fs;

/// A file read from disk, ready to be served
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub data: Bytes,
    pub content_type: &'static str,
    pub modified: Option<DateTime<Utc>>,
}

/// Path handler serving the file at `path`, or 404
pub async fn serve_file<B>(req: Request<B>, path: String) -> Response<Full<Bytes>> {
    let is_head = req.method() == Method::HEAD;
    drop(req);

    match load_file(&path).await {
        Some(file) => http::response::build_file_response(file.data, file.content_type, is_head),
        None => http::build_404_response(),
    }
}

/// Read a regular file, refusing paths that climb out with `..`
pub async fn load_file(path: &str) -> Option<LoadedFile> {
    if has_parent_dir(path) {
        return None;
    }
    read_regular_file(path).await
}

/// Like [`load_file`], but the file must also resolve to somewhere under
/// `root` once symlinks are followed
pub async fn load_file_under(root: &Path, path: &str) -> Option<LoadedFile> {
    if has_parent_dir(path) {
        return None;
    }

    let root = fs::canonicalize(root).await.ok()?;
    // Missing files are an ordinary 404
    let resolved = fs::canonicalize(path).await.ok()?;
    if !resolved.starts_with(&root) {
        logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
        return None;
    }
    read_regular_file(path).await
}

fn has_parent_dir(path: &str) -> bool {
    let blocked = Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir));
    if blocked {
        logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
    }
    blocked
}

async fn read_regular_file(path: &str) -> Option<LoadedFile> {
    let file_path = Path::new(path);
    // Missing files are an ordinary 404
    let metadata = fs::metadata(file_path).await.ok()?;
    if !metadata.is_file() {
        return None;
    }

    let data = match fs::read(file_path).await {
        Ok(d) => d,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{path}': {e}"));
            return None;
        }
    };

    Some(LoadedFile {
        data: Bytes::from(data),
        content_type: mime::content_type_for(file_path),
        modified: metadata.modified().ok().map(DateTime::<Utc>::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    fn get() -> Request<()> {
        Request::builder().uri("/").body(()).unwrap()
    }

    #[tokio::test]
    async fn test_serve_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.html");
        std::fs::write(&file, "<h1>hi</h1>").unwrap();

        let resp = serve_file(get(), file.to_string_lossy().into_owned()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()["content-type"],
            "text/html; charset=utf-8"
        );
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<h1>hi</h1>");
    }

    #[tokio::test]
    async fn test_serve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.css");
        let resp = serve_file(get(), missing.to_string_lossy().into_owned()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_is_not_served() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().to_string_lossy()).await.is_none());
    }

    #[tokio::test]
    async fn test_parent_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("inner");
        std::fs::create_dir(&inner).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "x").unwrap();

        let sneaky = format!("{}/../secret.txt", inner.display());
        assert!(load_file(&sneaky).await.is_none());
    }

    #[tokio::test]
    async fn test_load_file_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.css");
        std::fs::write(&file, "body{}").unwrap();

        let loaded = load_file_under(dir.path(), &file.to_string_lossy()).await;
        assert_eq!(&loaded.unwrap().data[..], b"body{}");

        let other = tempfile::tempdir().unwrap();
        assert!(load_file_under(other.path(), &file.to_string_lossy())
            .await
            .is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_root_is_rejected() {
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        std::fs::write(&secret, "secret").unwrap();

        let root = tempfile::tempdir().unwrap();
        let link = root.path().join("leak.css");
        std::os::unix::fs::symlink(&secret, &link).unwrap();

        // plain loading follows the link; rooted loading refuses it
        assert!(load_file(&link.to_string_lossy()).await.is_some());
        assert!(load_file_under(root.path(), &link.to_string_lossy())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_load_file_reports_modified_time() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.css");
        std::fs::write(&file, "body{}").unwrap();

        let loaded = load_file(&file.to_string_lossy()).await.unwrap();
        assert_eq!(loaded.content_type, "text/css; charset=utf-8");
        assert!(loaded.modified.is_some());
    }
}
