//! Routing table metrics.
//!
//! # Metrics
//! - `proxy_table_dispatch_total` (counter): dispatch calls by `outcome` (hit, miss)
//! - `proxy_table_slots` (gauge): occupied slots in the most recently changed table
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the library installs no recorder,
//!   so these are no-ops until the embedding application installs one

use metrics::{counter, gauge};

/// Record one dispatch call and whether a route matched.
pub fn record_dispatch(matched: bool) {
    let outcome = if matched { "hit" } else { "miss" };
    counter!("proxy_table_dispatch_total", "outcome" => outcome).increment(1);
}

/// Record the number of occupied slots after an insert or removal.
pub fn record_slot_count(slots: usize) {
    gauge!("proxy_table_slots").set(slots as f64);
}
