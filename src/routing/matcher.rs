//! Path rule matching
//!
//! A rule matches on the request path alone: exact paths, prefixes,
//! suffixes, or anything.

/// Path condition of a site rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    /// Path equals one of the listed paths
    Equals(Vec<String>),
    /// Path starts with one of the listed prefixes
    HasPrefix(Vec<String>),
    /// Path ends with one of the listed suffixes
    HasSuffix(Vec<String>),
    /// Every path
    Always,
}

impl PathMatch {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Equals(paths) => paths.iter().any(|p| p == path),
            Self::HasPrefix(prefixes) => prefixes.iter().any(|p| path.starts_with(p.as_str())),
            Self::HasSuffix(suffixes) => suffixes.iter().any(|s| path.ends_with(s.as_str())),
            Self::Always => true,
        }
    }
}

/// Index of the first rule matching `path`
pub fn match_rule<'a>(path: &str, rules: impl IntoIterator<Item = &'a PathMatch>) -> Option<usize> {
    rules.into_iter().position(|rule| rule.matches(path))
}
