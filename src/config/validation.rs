//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject routes with an empty path or handler name
//! - Reject two routes claiming the same explicit slot index
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TableConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is turned into a table
//! - Pattern syntax is left to the matcher; the table skips what it rejects

use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::TableConfig;

/// A semantic problem in a route file. `route` is the position in `routes`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{route}: path is empty")]
    EmptyPath { route: usize },

    #[error("route #{route}: handler name is empty")]
    EmptyHandler { route: usize },

    #[error("route #{route}: slot index {index} already used by route #{first}")]
    DuplicateIndex {
        route: usize,
        index: usize,
        first: usize,
    },
}

/// Check a parsed config, collecting every problem found.
pub fn validate_config(config: &TableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut claimed: HashMap<usize, usize> = HashMap::new();

    for (route, entry) in config.routes.iter().enumerate() {
        if entry.path.trim().is_empty() {
            errors.push(ValidationError::EmptyPath { route });
        }
        if entry.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler { route });
        }
        if let Some(index) = entry.index {
            if let Some(&first) = claimed.get(&index) {
                errors.push(ValidationError::DuplicateIndex { route, index, first });
            } else {
                claimed.insert(index, route);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
