//! Method-aware pattern multiplexer.
//!
//! # Responsibilities
//! - Register `"[METHOD ]/path/{name}"` patterns against handlers
//! - Look up the handler for a request and extract its path values
//! - Answer unmatched requests with 404, 405 or a redirect
//!
//! # Design Decisions
//! - Path matching is delegated to `matchit` (one radix tree per method)
//! - Immutable after construction; share behind `Arc`
//! - `HEAD` is served by `GET` routes
//! - Method-specific routes are tried before method-less ones
//! - Paths are cleaned (`//`, `.`, `..`) before lookup; a changed path is redirected
//! - Captured values are percent-decoded

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::header::HeaderMap;
use hyper::http::request::Parts;
use hyper::{Method, Request, Uri, Version};
use percent_encoding::percent_decode_str;

use crate::http::response::{self, MuxResponse};
use crate::routing::pattern::{Pattern, SUBTREE_TAIL};
use crate::routing::MuxError;

/// A mux handler. Handlers are synchronous; the mux never reads request bodies.
pub type Handler = Arc<dyn Fn(&RequestContext) -> MuxResponse + Send + Sync>;

/// Values captured by `{name}` placeholders, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathValues(Vec<(String, String)>);

impl PathValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Percent-decode the captured segments.
    ///
    /// Fails with the placeholder name when a decoded value is not UTF-8.
    fn decode(params: matchit::Params<'_, '_>) -> Result<Self, String> {
        params
            .iter()
            .filter(|(key, _)| *key != SUBTREE_TAIL)
            .map(|(key, value)| {
                percent_decode_str(value)
                    .decode_utf8()
                    .map(|decoded| (key.to_string(), decoded.into_owned()))
                    .map_err(|_| key.to_string())
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// The request as seen by a mux handler.
#[derive(Debug)]
pub struct RequestContext {
    parts: Parts,
    path_values: PathValues,
    remote: Option<SocketAddr>,
}

impl RequestContext {
    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn version(&self) -> Version {
        self.parts.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Peer address of the connection, when served over a socket.
    pub fn remote(&self) -> Option<SocketAddr> {
        self.remote
    }

    /// Value of the `{name}` placeholder in the matched pattern.
    pub fn path_value(&self, name: &str) -> Option<&str> {
        self.path_values.get(name)
    }
}

#[derive(Clone)]
struct Entry {
    pattern: Pattern,
    handler: Handler,
}

/// Route table keyed by method, then by path.
pub struct ServeMux {
    by_method: HashMap<Method, matchit::Router<Entry>>,
    any_method: matchit::Router<Entry>,
    patterns: Vec<Pattern>,
}

impl ServeMux {
    pub fn new() -> Self {
        Self {
            by_method: HashMap::new(),
            any_method: matchit::Router::new(),
            patterns: Vec::new(),
        }
    }

    /// Register `handler` under `pattern`.
    ///
    /// Registering the same method and path twice fails with [`MuxError::Conflict`].
    pub fn handle(&mut self, pattern: &str, handler: Handler) -> Result<(), MuxError> {
        let pattern = Pattern::parse(pattern)?;
        let table = match pattern.method() {
            Some(method) => self
                .by_method
                .entry(method.clone())
                .or_insert_with(matchit::Router::new),
            None => &mut self.any_method,
        };

        let entry = Entry {
            pattern: pattern.clone(),
            handler,
        };
        insert(table, &pattern, pattern.path(), entry.clone())?;
        if let Some(tail) = pattern.subtree_path() {
            insert(table, &pattern, &tail, entry)?;
        }

        tracing::debug!(pattern = %pattern, "Route registered");
        self.patterns.push(pattern);
        Ok(())
    }

    /// Register a plain function or closure.
    pub fn handle_fn<F>(&mut self, pattern: &str, f: F) -> Result<(), MuxError>
    where
        F: Fn(&RequestContext) -> MuxResponse + Send + Sync + 'static,
    {
        self.handle(pattern, Arc::new(f))
    }

    /// Registered patterns, in registration order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Route `request` to its handler.
    pub fn dispatch<B>(&self, request: Request<B>, remote: Option<SocketAddr>) -> MuxResponse {
        let (parts, _body) = request.into_parts();

        if parts.method != Method::CONNECT {
            let cleaned = clean_path(parts.uri.path());
            if cleaned != parts.uri.path() {
                return response::moved_permanently(&with_query(cleaned, &parts.uri));
            }
        }

        match self.find(&parts.method, parts.uri.path()) {
            Some((entry, Ok(path_values))) => {
                tracing::trace!(pattern = %entry.pattern, "Route matched");
                let ctx = RequestContext {
                    parts,
                    path_values,
                    remote,
                };
                return (entry.handler)(&ctx);
            }
            Some((entry, Err(name))) => {
                tracing::debug!(pattern = %entry.pattern, param = %name, "Path value is not UTF-8");
                return response::bad_request("Invalid path value\n");
            }
            None => {}
        }

        let path = parts.uri.path();
        let allowed = self.allowed_methods(path);
        if !allowed.is_empty() {
            return response::method_not_allowed(&allowed);
        }

        if !path.ends_with('/') {
            let with_slash = format!("{}/", path);
            if self.find(&parts.method, &with_slash).is_some() {
                return response::moved_permanently(&with_query(with_slash, &parts.uri));
            }
        }

        response::not_found()
    }

    fn find(&self, method: &Method, path: &str) -> Option<(&Entry, Result<PathValues, String>)> {
        let exact = self.by_method.get(method);
        let head_fallback = (*method == Method::HEAD)
            .then(|| self.by_method.get(&Method::GET))
            .flatten();

        [exact, head_fallback, Some(&self.any_method)]
            .into_iter()
            .flatten()
            .find_map(|table| table.at(path).ok())
            .map(|matched| (matched.value, PathValues::decode(matched.params)))
    }

    fn allowed_methods(&self, path: &str) -> Vec<String> {
        let mut allowed: Vec<String> = self
            .by_method
            .iter()
            .filter(|(_, table)| table.at(path).is_ok())
            .map(|(method, _)| method.to_string())
            .collect();
        if allowed.iter().any(|m| m == "GET") && !allowed.iter().any(|m| m == "HEAD") {
            allowed.push(Method::HEAD.to_string());
        }
        allowed.sort();
        allowed
    }
}

impl Default for ServeMux {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical form of `path`: no empty, `.` or `..` segments; a trailing slash is kept.
fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    let mut cleaned = format!("/{}", segments.join("/"));
    if path.ends_with('/') && cleaned != "/" {
        cleaned.push('/');
    }
    cleaned
}

fn with_query(path: String, uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    }
}

fn insert(
    table: &mut matchit::Router<Entry>,
    pattern: &Pattern,
    path: &str,
    entry: Entry,
) -> Result<(), MuxError> {
    table.insert(path, entry).map_err(|err| match err {
        matchit::InsertError::Conflict { with } => MuxError::Conflict {
            pattern: pattern.to_string(),
            existing: with,
        },
        other => MuxError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: other.to_string(),
        },
    })
}
