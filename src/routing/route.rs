//! Route descriptors and handler types.

use std::fmt;
use std::sync::Arc;

use crate::routing::params::ParamBindings;

/// A routed function.
///
/// Receives the parameters bound by the matched pattern and the arguments
/// the caller passed to `dispatch`. Its result is discarded.
pub type Handler<A> = Arc<dyn Fn(&ParamBindings, A) + Send + Sync>;

/// Pairs a path pattern with the handler it routes to.
///
/// A descriptor with an empty `path` or no `method` is invalid and is
/// skipped when added to a table.
pub struct Route<A> {
    pub path: String,
    pub method: Option<Handler<A>>,
}

impl<A> Route<A> {
    /// Create a descriptor routing `path` to `method`.
    pub fn new<F>(path: impl Into<String>, method: F) -> Self
    where
        F: Fn(&ParamBindings, A) + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            method: Some(Arc::new(method)),
        }
    }

    /// Create a descriptor with no handler attached.
    pub fn unbound(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: None,
        }
    }
}

impl<A> Clone for Route<A> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            method: self.method.clone(),
        }
    }
}

impl<A> fmt::Debug for Route<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("method", &self.method.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

/// Identifies a slot to remove: either its index or a path it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKey {
    Index(usize),
    Path(String),
}

impl From<usize> for RouteKey {
    fn from(index: usize) -> Self {
        RouteKey::Index(index)
    }
}

impl From<&str> for RouteKey {
    fn from(path: &str) -> Self {
        RouteKey::Path(path.to_string())
    }
}

impl From<String> for RouteKey {
    fn from(path: String) -> Self {
        RouteKey::Path(path)
    }
}
