//! Configuration schema definitions.
//!
//! A route file lists the routes to load into a table, in match order.
//! All types derive Serde traits for deserialization from TOML.
//!
//! ```toml
//! [observability]
//! log_level = "debug"
//!
//! [[routes]]
//! path = "/users/:id"
//! handler = "echo"
//!
//! [[routes]]
//! path = "/static/*path"
//! handler = "echo"
//! index = 10
//! ```

use serde::{Deserialize, Serialize};

/// Root configuration for a routing table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TableConfig {
    /// Route definitions, in registration order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A single route mapping a path pattern to a named handler.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/users/:id`.
    pub path: String,

    /// Name of the registered handler to invoke.
    pub handler: String,

    /// Explicit slot index. Omit to append.
    #[serde(default)]
    pub index: Option<usize>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
