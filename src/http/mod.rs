//! HTTP protocol layer module
//!
//! Header helpers, redirects and response builders, decoupled from the demo site.

pub mod cache;
pub mod mime;
pub mod redirect;
pub mod response;

// Re-export commonly used items
pub use cache::{cache, do_not_cache, ONE_YEAR};
pub use redirect::{
    redirect, redirect_to_http, redirect_to_https, Redirect, RedirectToHttp, RedirectToHttps,
};
pub use response::{build_404_response, build_json_response};
