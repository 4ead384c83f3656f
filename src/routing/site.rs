use std::fmt;
use std::sync::Arc;

use hyper::Request;

use super::matcher::{match_rule, PathMatch};
use crate::handler::{decoded_path, Handler, HandlerFuture};
use crate::http;

struct Rule<B> {
    condition: PathMatch,
    handler: Arc<dyn Handler<B>>,
}

/// Ordered set of path rules, each bound to a handler
///
/// ```
/// use web_helpers::handler::{static_files, use_prefix};
/// use web_helpers::routing::Site;
///
/// let mut site: Site<()> = Site::new();
/// // "/cat.jpg" is served from "images/cat.jpg"
/// site.has_suffix([".jpg", ".png"], use_prefix("images", static_files::serve_file));
/// ```
pub struct Site<B> {
    rules: Vec<Rule<B>>,
}

impl<B> Site<B> {
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Requests whose path is exactly one of `paths`
    pub fn equals<I, S>(&mut self, paths: I, handler: impl Handler<B> + 'static) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(PathMatch::Equals(collect(paths)), handler)
    }

    /// Requests whose path starts with one of `prefixes`
    pub fn has_prefix<I, S>(&mut self, prefixes: I, handler: impl Handler<B> + 'static) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(PathMatch::HasPrefix(collect(prefixes)), handler)
    }

    /// Requests whose path ends with one of `suffixes`
    pub fn has_suffix<I, S>(&mut self, suffixes: I, handler: impl Handler<B> + 'static) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(PathMatch::HasSuffix(collect(suffixes)), handler)
    }

    /// Every request not claimed by an earlier rule
    pub fn always(&mut self, handler: impl Handler<B> + 'static) -> &mut Self {
        self.push(PathMatch::Always, handler)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn push(&mut self, condition: PathMatch, handler: impl Handler<B> + 'static) -> &mut Self {
        self.rules.push(Rule {
            condition,
            handler: Arc::new(handler),
        });
        self
    }
}

impl<B> Default for Site<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for Site<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| &r.condition))
            .finish()
    }
}

impl<B> Handler<B> for Site<B> {
    fn serve(&self, req: Request<B>) -> HandlerFuture {
        let Some(path) = decoded_path(req.uri()) else {
            return Box::pin(async { http::response::build_400_response("malformed path") });
        };
        let matched = match_rule(&path, self.rules.iter().map(|r| &r.condition));
        match matched {
            Some(index) => self.rules[index].handler.serve(req),
            None => Box::pin(async { http::build_404_response() }),
        }
    }
}

fn collect<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
