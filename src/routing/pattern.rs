//! Route pattern parsing.
//!
//! # Syntax
//! ```text
//! [METHOD ]/literal/{name}/...
//! ```
//! - The method token is optional; a pattern without one matches every method.
//! - `{name}` matches exactly one path segment.
//! - A trailing `/` makes the pattern a subtree: `/path/` also matches `/path/a/b`.

use hyper::Method;

use crate::routing::MuxError;

/// Name of the catch-all parameter registered under subtree patterns.
pub(crate) const SUBTREE_TAIL: &str = "__subtree_tail";

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    method: Option<Method>,
    path: String,
}

impl Pattern {
    /// Parse a pattern such as `"GET /task/{id}/"`.
    pub fn parse(raw: &str) -> Result<Self, MuxError> {
        let raw = raw.trim();
        let invalid = |reason: &str| MuxError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        let (method, path) = match raw.split_once(char::is_whitespace) {
            Some((method, path)) => {
                let method = Method::from_bytes(method.as_bytes())
                    .map_err(|_| invalid("invalid method token"))?;
                (Some(method), path.trim_start())
            }
            None => (None, raw),
        };

        if !path.starts_with('/') {
            return Err(invalid("path must start with '/'"));
        }
        if path.contains(char::is_whitespace) {
            return Err(invalid("path must not contain whitespace"));
        }
        if path.contains(SUBTREE_TAIL) {
            return Err(invalid("reserved parameter name"));
        }

        Ok(Self {
            method,
            path: path.to_string(),
        })
    }

    /// The method this pattern is restricted to, if any.
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// True when the pattern ends in `/` and therefore matches everything below it.
    pub fn is_subtree(&self) -> bool {
        self.path.ends_with('/')
    }

    /// The catch-all form registered alongside a subtree pattern.
    pub(crate) fn subtree_path(&self) -> Option<String> {
        self.is_subtree()
            .then(|| format!("{}{{*{}}}", self.path, SUBTREE_TAIL))
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.method {
            Some(method) => write!(f, "{} {}", method, self.path),
            None => f.write_str(&self.path),
        }
    }
}
