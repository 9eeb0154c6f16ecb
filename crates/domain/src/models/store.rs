//! Store identity used for per-store lookups.

use serde::{Deserialize, Serialize};

/// A merchant store, uniquely keyed by `id` and independently
/// addressable by shop domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub domain: String,
}

impl Store {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            domain: domain.into(),
        }
    }

    /// Case-insensitive substring match on id, name, or domain.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.id.to_lowercase().contains(&term)
            || self.name.to_lowercase().contains(&term)
            || self.domain.to_lowercase().contains(&term)
    }
}
