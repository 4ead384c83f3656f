//! Demo site assembly
//!
//! Wires the helpers into a small site: an index page that counts its views,
//! static assets with cache headers, a JSON stats endpoint, and an optional
//! redirect-everything mode.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;

use crate::config::{Config, RedirectMode};
use crate::counter::PageViews;
use crate::handler::static_files::load_file_under;
use crate::handler::{use_path, use_prefix};
use crate::http::response::build_file_response;
use crate::http::{self, cache, do_not_cache, Redirect, RedirectToHttp, RedirectToHttps};
use crate::routing::Site;

/// Shared application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub page_views: PageViews,
}

impl AppState {
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            page_views: PageViews::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Stats {
    page_views: i64,
}

/// Build the site described by the configuration
pub fn build_site<B: Send + 'static>(state: &Arc<AppState>) -> Site<B> {
    let mut site = Site::new();
    let site_config = &state.config.site;

    if let Some(mode) = &site_config.redirect {
        match mode {
            RedirectMode::Https => site.always(RedirectToHttps),
            RedirectMode::Http => site.always(RedirectToHttp),
            RedirectMode::To { target } => site.always(Redirect::new(target.clone())),
        };
        return site;
    }

    let stats_state = Arc::clone(state);
    site.equals([site_config.stats_path.clone()], move |_req: Request<B>| {
        let count = stats_state.page_views.count();
        async move {
            let mut resp = http::build_json_response(StatusCode::OK, &Stats { page_views: count });
            do_not_cache(resp.headers_mut());
            resp
        }
    });

    let index_state = Arc::clone(state);
    site.equals(
        ["/", "/index.html"],
        use_path(
            state.config.index_path(),
            move |req: Request<B>, path: String| {
                let state = Arc::clone(&index_state);
                let method = req.method().clone();
                async move { serve_page(&state, &method, &path).await }
            },
        ),
    );

    let cache_duration = state.config.cache_duration();
    let asset_root = PathBuf::from(&site_config.content_dir);
    site.has_suffix(
        site_config.asset_suffixes.clone(),
        use_prefix(
            site_config.content_dir.trim_end_matches('/'),
            move |req: Request<B>, path: String| {
                let is_head = req.method() == Method::HEAD;
                let root = asset_root.clone();
                async move { serve_asset(&root, &path, is_head, cache_duration).await }
            },
        ),
    );

    site
}

/// Serve a counted, never-cached page
async fn serve_page(state: &AppState, method: &Method, path: &str) -> Response<Full<Bytes>> {
    let root = Path::new(&state.config.site.content_dir);
    let Some(file) = load_file_under(root, path).await else {
        return http::build_404_response();
    };

    if method == Method::GET {
        state.page_views.add();
    }

    let mut resp = build_file_response(file.data, file.content_type, method == Method::HEAD);
    do_not_cache(resp.headers_mut());
    resp
}

/// Serve a static asset, cacheable for `cache_duration` when set
async fn serve_asset(
    root: &Path,
    path: &str,
    is_head: bool,
    cache_duration: Option<Duration>,
) -> Response<Full<Bytes>> {
    let Some(file) = load_file_under(root, path).await else {
        return http::build_404_response();
    };

    let mut resp = build_file_response(file.data, file.content_type, is_head);
    match cache_duration {
        Some(duration) => cache(resp.headers_mut(), file.modified, duration),
        None => do_not_cache(resp.headers_mut()),
    }
    resp
}
