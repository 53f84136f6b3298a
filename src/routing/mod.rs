//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration:
//!     Route { path, method }
//!     → matcher.rs (compile pattern)
//!     → router.rs (store matcher + handler in a slot)
//!
//! Dispatch:
//!     request path + args
//!     → router.rs (scan slots in index order)
//!     → matcher.rs (test, then extract parameters)
//!     → handler(&ParamBindings, args)  or no-op when nothing matched
//! ```
//!
//! # Design Decisions
//! - Routes can be added and removed at any time
//! - Deterministic: same table and path always pick the same slot
//! - First match wins (ordered by slot index)

pub mod matcher;
pub mod params;
pub mod registry;
pub mod route;
pub mod router;

pub use matcher::{PathMatcher, Pattern, PatternError};
pub use params::ParamBindings;
pub use registry::HandlerRegistry;
pub use route::{Handler, Route, RouteKey};
pub use router::{ProxyTable, RouteError};
