//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a route pattern into a matcher
//! - Test whether a request path is accepted by the pattern
//! - Extract named parameters from an accepted path
//!
//! # Pattern Syntax
//! - `/users/:id` binds one segment to `id`
//! - `/static/*path` binds the rest of the path to `path`
//! - A bare trailing `*` binds the rest of the path to `wildcard`
//! - `{id}` and `{*path}` are accepted as written
//!
//! # Design Decisions
//! - One single-route `matchit` tree per pattern, so patterns never conflict
//!   with each other and precedence stays with the table's slot order
//! - `test` and `extract` share the same lookup and cannot disagree
//! - Path matching is case-sensitive

use thiserror::Error;

use crate::routing::params::ParamBindings;

/// Name bound by a bare `*` catch-all segment.
pub const WILDCARD_PARAM: &str = "wildcard";

/// The matching engine rejected a pattern.
#[derive(Debug, Error)]
#[error("invalid route pattern {pattern:?}: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl PatternError {
    /// Wrap the engine's reason for rejecting `pattern`.
    pub fn new(
        pattern: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            source: source.into(),
        }
    }
}

/// A compiled path pattern.
pub trait PathMatcher: Sized + Send + Sync + std::fmt::Debug {
    /// Compile `pattern` into a matcher.
    fn compile(pattern: &str) -> Result<Self, PatternError>;

    /// Returns true if `path` is accepted by this pattern.
    fn test(&self, path: &str) -> bool;

    /// Extracts named parameters from `path`.
    ///
    /// Returns empty bindings when `path` is not accepted.
    fn extract(&self, path: &str) -> ParamBindings;

    /// The pattern this matcher was compiled from.
    fn pattern(&self) -> &str;
}

/// Default matcher backed by `matchit`.
pub struct Pattern {
    source: String,
    tree: matchit::Router<()>,
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PathMatcher for Pattern {
    fn compile(pattern: &str) -> Result<Self, PatternError> {
        let mut tree = matchit::Router::new();
        tree.insert(normalize(pattern), ())
            .map_err(|source| PatternError::new(pattern, source))?;

        Ok(Self {
            source: pattern.to_string(),
            tree,
        })
    }

    fn test(&self, path: &str) -> bool {
        self.tree.at(path).is_ok()
    }

    fn extract(&self, path: &str) -> ParamBindings {
        match self.tree.at(path) {
            Ok(matched) => matched.params.iter().collect(),
            Err(_) => ParamBindings::new(),
        }
    }

    fn pattern(&self) -> &str {
        &self.source
    }
}

/// Rewrites `:name` and `*name` segments into the brace syntax `matchit` expects.
fn normalize(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':').filter(|n| !n.is_empty()) {
                format!("{{{name}}}")
            } else if let Some(name) = segment.strip_prefix('*') {
                let name = if name.is_empty() { WILDCARD_PARAM } else { name };
                format!("{{*{name}}}")
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
