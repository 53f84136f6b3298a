//! Named handler lookup for tables built from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::schema::TableConfig;
use crate::routing::matcher::PathMatcher;
use crate::routing::params::ParamBindings;
use crate::routing::route::{Handler, Route};
use crate::routing::router::ProxyTable;

/// Maps handler names used in route files to handler functions.
pub struct HandlerRegistry<A> {
    handlers: HashMap<String, Handler<A>>,
}

impl<A> HandlerRegistry<A> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&ParamBindings, A) + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
        self
    }

    pub fn get(&self, name: &str) -> Option<Handler<A>> {
        self.handlers.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<A> Default for HandlerRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, M: PathMatcher> ProxyTable<A, M> {
    /// Build a table from a route file.
    ///
    /// Routes naming a handler the registry doesn't know are skipped like any
    /// other descriptor without a method.
    pub fn from_config(config: &TableConfig, registry: &HandlerRegistry<A>) -> Self {
        let mut table = Self::default();

        for route in &config.routes {
            let method = registry.get(&route.handler);
            if method.is_none() {
                tracing::debug!(
                    path = %route.path,
                    handler = %route.handler,
                    known = ?registry.names(),
                    "Unknown handler, route skipped"
                );
            }

            let descriptor = Route {
                path: route.path.clone(),
                method,
            };
            match route.index {
                Some(index) => table.add_at(descriptor, index),
                None => table.add(descriptor),
            };
        }

        tracing::info!(slots = table.len(), "Routing table built");
        table
    }
}
