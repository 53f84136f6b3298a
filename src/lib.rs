//! Proxy routing table.
//!
//! Maps path patterns with named parameters to handlers, finds the first
//! pattern matching a request path and invokes its handler with the
//! extracted parameters plus caller-supplied arguments.
//!
//! ```
//! use proxy_table::{ParamBindings, ProxyTable, Route};
//!
//! let mut table: ProxyTable<&str> = ProxyTable::default();
//! table.add(Route::new("/users/:id", |params: &ParamBindings, verb: &str| {
//!     assert_eq!(params.get("id"), Some("42"));
//!     assert_eq!(verb, "GET");
//! }));
//! table.dispatch("/users/42", "GET");
//! ```

pub mod config;
pub mod observability;
pub mod routing;

pub use config::schema::TableConfig;
pub use routing::{
    Handler, HandlerRegistry, ParamBindings, PathMatcher, Pattern, ProxyTable, Route, RouteError,
    RouteKey,
};
