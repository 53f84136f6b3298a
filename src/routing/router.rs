//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in numbered slots
//! - Look up the first slot matching a request path
//! - Invoke the matched handler with the extracted parameters
//!
//! # Design Decisions
//! - One slot holds both the matcher and the handler, so the two can never
//!   drift apart on insert or removal
//! - Slots are scanned in ascending index order; first match wins
//! - Auto-assigned indices come from a monotonic counter and are never reused
//! - No match is a normal outcome, not an error

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::observability::metrics;
use crate::routing::matcher::{PathMatcher, Pattern, PatternError};
use crate::routing::params::ParamBindings;
use crate::routing::route::{Handler, Route, RouteKey};

/// Reasons a route descriptor was not added.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route path is empty")]
    EmptyPath,

    #[error("route {0:?} has no handler")]
    MissingHandler(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("no slot index left to assign")]
    SlotsExhausted,
}

struct Slot<A, M> {
    matcher: M,
    handler: Handler<A>,
}

/// Routing table mapping path patterns to handlers.
///
/// `A` is the argument type forwarded from [`ProxyTable::dispatch`] to the
/// handler; `M` is the pattern engine.
pub struct ProxyTable<A = (), M = Pattern> {
    slots: BTreeMap<usize, Slot<A, M>>,
    /// `None` once `usize::MAX` has been used.
    next_slot: Option<usize>,
}

impl<A, M: PathMatcher> ProxyTable<A, M> {
    /// Create a table holding `routes`, in order.
    pub fn new(routes: impl IntoIterator<Item = Route<A>>) -> Self {
        let mut table = Self {
            slots: BTreeMap::new(),
            next_slot: Some(0),
        };
        table.init(routes);
        table
    }

    /// Add each route at the slot matching its position in `routes`.
    pub fn init(&mut self, routes: impl IntoIterator<Item = Route<A>>) -> &mut Self {
        for (index, route) in routes.into_iter().enumerate() {
            self.add_at(route, index);
        }
        self
    }

    /// Add a route at the next free slot.
    ///
    /// Invalid descriptors and patterns the engine rejects are skipped.
    pub fn add(&mut self, route: Route<A>) -> &mut Self {
        match self.next_slot {
            Some(index) => self.add_at(route, index),
            None => {
                tracing::warn!(pattern = %route.path, "Skipping route, no slot index left");
                self
            }
        }
    }

    /// Add a route at `index`, replacing whatever the slot held.
    ///
    /// Invalid descriptors and patterns the engine rejects are skipped.
    pub fn add_at(&mut self, route: Route<A>, index: usize) -> &mut Self {
        match self.insert(route, index) {
            Ok(()) => {}
            Err(RouteError::Pattern(e)) => {
                tracing::warn!(slot = index, error = %e, "Skipping route with invalid pattern");
            }
            Err(e) => {
                tracing::debug!(slot = index, reason = %e, "Skipping invalid route");
            }
        }
        self
    }

    /// Like [`ProxyTable::add`], but reports why a route was rejected.
    pub fn try_add(&mut self, route: Route<A>) -> Result<&mut Self, RouteError> {
        let index = self.next_slot.ok_or(RouteError::SlotsExhausted)?;
        self.try_add_at(route, index)
    }

    /// Like [`ProxyTable::add_at`], but reports why a route was rejected.
    pub fn try_add_at(&mut self, route: Route<A>, index: usize) -> Result<&mut Self, RouteError> {
        self.insert(route, index)?;
        Ok(self)
    }

    fn insert(&mut self, route: Route<A>, index: usize) -> Result<(), RouteError> {
        if route.path.is_empty() {
            return Err(RouteError::EmptyPath);
        }
        let handler = route
            .method
            .ok_or_else(|| RouteError::MissingHandler(route.path.clone()))?;
        let matcher = M::compile(&route.path)?;

        let replaced = self.slots.insert(index, Slot { matcher, handler }).is_some();
        self.next_slot = match (self.next_slot, index.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };

        tracing::debug!(slot = index, pattern = %route.path, replaced, "Route added");
        metrics::record_slot_count(self.slots.len());
        Ok(())
    }

    /// Remove a slot by index, or the first slot matching a path.
    ///
    /// Unknown indices and unmatched paths are ignored.
    pub fn remove(&mut self, key: impl Into<RouteKey>) -> &mut Self {
        let index = match key.into() {
            RouteKey::Index(index) => Some(index),
            RouteKey::Path(path) => self.find(&path),
        };

        if let Some(slot) = index.and_then(|i| self.slots.remove(&i).map(|s| (i, s))) {
            tracing::debug!(slot = slot.0, pattern = %slot.1.matcher.pattern(), "Route removed");
            metrics::record_slot_count(self.slots.len());
        }
        self
    }

    fn first_match(&self, path: &str) -> Option<(usize, &Slot<A, M>)> {
        self.slots
            .iter()
            .find(|(_, slot)| slot.matcher.test(path))
            .map(|(index, slot)| (*index, slot))
    }

    /// Index of the first slot whose pattern accepts `path`.
    pub fn find(&self, path: &str) -> Option<usize> {
        self.first_match(path).map(|(index, _)| index)
    }

    /// Index and parameters of the first slot accepting `path`, without
    /// invoking its handler.
    pub fn resolve(&self, path: &str) -> Option<(usize, ParamBindings)> {
        self.first_match(path)
            .map(|(index, slot)| (index, slot.matcher.extract(path)))
    }

    /// Route `path` to its handler, forwarding `args`.
    ///
    /// Paths no slot accepts are ignored.
    pub fn dispatch(&self, path: &str, args: A) -> &Self {
        let Some((index, slot)) = self.first_match(path) else {
            tracing::debug!(path, "No route matched");
            metrics::record_dispatch(false);
            return self;
        };

        let params = slot.matcher.extract(path);
        tracing::debug!(slot = index, path, params = ?params, "Dispatching");
        metrics::record_dispatch(true);

        (slot.handler)(&params, args);
        self
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Occupied slots and their patterns, in match order.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .map(|(index, slot)| (*index, slot.matcher.pattern()))
    }
}

impl<A, M: PathMatcher> Default for ProxyTable<A, M> {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl<A, M: PathMatcher> fmt::Debug for ProxyTable<A, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyTable")
            .field("slots", &self.slots().collect::<BTreeMap<_, _>>())
            .field("next_slot", &self.next_slot)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn noop(_: &ParamBindings, _: ()) {}

    fn table() -> ProxyTable {
        ProxyTable::new([Route::new("/simple", noop), Route::new("/with/:key", noop)])
    }

    #[test]
    fn test_init_uses_positions() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.slots().collect::<Vec<_>>(), vec![(0, "/simple"), (1, "/with/:key")]);
        assert_eq!(table.find("/simple"), Some(0));
        assert_eq!(table.find("/with/anything"), Some(1));
        assert_eq!(table.find("/nowhere"), None);
    }

    #[test]
    fn test_add_appends() {
        let mut table = table();
        table.add(Route::new("/test", noop));
        assert_eq!(table.find("/test"), Some(2));
    }

    #[test]
    fn test_add_skips_invalid_routes() {
        let mut table = table();
        table
            .add(Route::new("", noop))
            .add(Route::unbound("/unbound"))
            .add(Route::new("/files/*rest/more", noop));
        assert_eq!(table.len(), 2);
        assert_eq!(table.find("/unbound"), None);
    }

    #[test]
    fn test_try_add_reports_reason() {
        let mut table = table();
        assert!(matches!(table.try_add(Route::new("", noop)), Err(RouteError::EmptyPath)));
        assert!(matches!(
            table.try_add(Route::unbound("/x")),
            Err(RouteError::MissingHandler(p)) if p == "/x"
        ));
        assert!(matches!(
            table.try_add(Route::new("/files/*rest/more", noop)),
            Err(RouteError::Pattern(_))
        ));
        assert!(table.try_add(Route::new("/ok", noop)).is_ok());
        assert_eq!(table.find("/ok"), Some(2));
    }

    #[test]
    fn test_add_at_overwrites_slot() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let h = hits.clone();
        let mut table = table();
        table.add_at(
            Route::new("/replaced", move |_: &ParamBindings, _: ()| h.lock().unwrap().push("new")),
            0,
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.find("/simple"), None);
        table.dispatch("/replaced", ());
        assert_eq!(*hits.lock().unwrap(), vec!["new"]);
    }

    #[test]
    fn test_auto_index_never_collides_after_removal() {
        let mut table = table();
        table.remove(0usize).add(Route::new("/third", noop));

        // Slot 1 still holds the second route; the new one goes after it.
        assert_eq!(table.find("/with/x"), Some(1));
        assert_eq!(table.find("/third"), Some(2));
        assert!(!table.contains(0));
    }

    #[test]
    fn test_explicit_index_advances_counter() {
        let mut table: ProxyTable = ProxyTable::default();
        table.add_at(Route::new("/far", noop), 10).add(Route::new("/next", noop));
        assert_eq!(table.find("/next"), Some(11));
    }

    #[test]
    fn test_remove_by_path() {
        let mut table = table();
        table.remove("/with/value");
        assert_eq!(table.len(), 1);
        assert_eq!(table.find("/with/value"), None);
        assert_eq!(table.find("/simple"), Some(0));

        // Unknown path and index are ignored
        table.remove("/missing").remove(42usize);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_first_match_wins() {
        let generic = Arc::new(AtomicUsize::new(0));
        let specific = Arc::new(AtomicUsize::new(0));
        let g = generic.clone();
        let s = specific.clone();

        let mut table: ProxyTable = ProxyTable::default();
        table
            .add(Route::new("/test/:param", move |_: &ParamBindings, _: ()| {
                g.fetch_add(1, Ordering::SeqCst);
            }))
            .add(Route::new("/test/list", move |_: &ParamBindings, _: ()| {
                s.fetch_add(1, Ordering::SeqCst);
            }));

        table.dispatch("/test/list", ());
        assert_eq!(generic.load(Ordering::SeqCst), 1);
        assert_eq!(specific.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resolve() {
        let table = table();
        let (index, params) = table.resolve("/with/abc").unwrap();
        assert_eq!(index, 1);
        assert_eq!(params.get("key"), Some("abc"));
        assert!(table.resolve("/nope").is_none());
    }

    #[test]
    fn test_dispatch_miss_is_noop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let mut table: ProxyTable = ProxyTable::default();
        table.add(Route::new("/only", move |_: &ParamBindings, _: ()| {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        table.dispatch("/other", ()).dispatch("/only/deeper", ());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_auto_index_stops_at_max_slot() {
        let mut table: ProxyTable = ProxyTable::default();
        table
            .add_at(Route::new("/explicit", noop), usize::MAX)
            .add(Route::new("/auto", noop));

        assert_eq!(table.len(), 1);
        assert_eq!(table.find("/explicit"), Some(usize::MAX));
        assert_eq!(table.find("/auto"), None);
        assert!(matches!(
            table.try_add(Route::new("/auto", noop)),
            Err(RouteError::SlotsExhausted)
        ));

        // Explicit indices still work.
        table.add_at(Route::new("/low", noop), 3);
        assert_eq!(table.find("/low"), Some(3));
        assert_eq!(table.find("/explicit"), Some(usize::MAX));
    }

    /// Accepts any path starting with its pattern, binding the rest to `rest`.
    #[derive(Debug)]
    struct Prefix(String);

    impl PathMatcher for Prefix {
        fn compile(pattern: &str) -> Result<Self, PatternError> {
            if !pattern.starts_with('/') {
                return Err(PatternError::new(pattern, "prefix must start with '/'"));
            }
            Ok(Prefix(pattern.to_string()))
        }

        fn test(&self, path: &str) -> bool {
            path.starts_with(&self.0)
        }

        fn extract(&self, path: &str) -> ParamBindings {
            match path.strip_prefix(&self.0) {
                Some(rest) => [("rest", rest)].into_iter().collect(),
                None => ParamBindings::new(),
            }
        }

        fn pattern(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_custom_matcher() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let mut table: ProxyTable<(), Prefix> = ProxyTable::default();
        table.add(Route::new("/api", move |params: &ParamBindings, _: ()| {
            s.lock().unwrap().push(params.get("rest").map(str::to_string));
        }));

        let err = table.try_add(Route::new("relative", noop)).unwrap_err();
        match err {
            RouteError::Pattern(e) => {
                assert_eq!(e.pattern, "relative");
                assert_eq!(e.source.to_string(), "prefix must start with '/'");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(table.len(), 1);
        assert_eq!(table.find("/api/v1/users"), Some(0));
        assert_eq!(table.find("/web"), None);

        table.dispatch("/api/v1/users", ()).dispatch("/web", ());
        assert_eq!(*seen.lock().unwrap(), vec![Some("/v1/users".to_string())]);
    }
}
