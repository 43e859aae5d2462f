//! Drug records returned by the search endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A drug as returned by the search service.
///
/// Identity is `name` (case-sensitive, no normalization). Any other fields the
/// service sends are carried through untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drug {
    /// Display name and identity key
    pub name: String,
    /// Opaque fields passed through from the service
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Drug {
    /// Create a drug with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Check whether this drug has the given identity.
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}
