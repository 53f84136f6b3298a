//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use proxy_table::{ParamBindings, ProxyTable, Route};

/// Every call a recording handler received: bound parameters and arguments.
pub type Calls<A> = Arc<Mutex<Vec<(ParamBindings, A)>>>;

/// A handler that records each invocation into the returned log.
pub fn recorder<A>(path: &str) -> (Route<A>, Calls<A>)
where
    A: Send + 'static,
{
    let calls: Calls<A> = Arc::new(Mutex::new(Vec::new()));
    let log = calls.clone();
    let route = Route::new(path, move |params: &ParamBindings, args: A| {
        log.lock().unwrap().push((params.clone(), args));
    });
    (route, calls)
}

#[allow(dead_code)]
pub fn noop<A>(_: &ParamBindings, _: A) {}

/// The table every scenario starts from.
#[allow(dead_code)]
pub fn base_table<A: 'static>() -> ProxyTable<A> {
    ProxyTable::new([
        Route::new("/simple", noop::<A>),
        Route::new("/with/:key", noop::<A>),
    ])
}
