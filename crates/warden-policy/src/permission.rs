// permission.rs — Permission definitions.
//
// A permission is a named capability with a static default and a scope
// shape: whether checks for it are narrowed to a database, and further to
// a table or query inside that database.

use serde::{Deserialize, Serialize};

/// A named capability that can be checked for an actor.
///
/// Definitions are compared field by field: registering the same definition
/// twice is harmless, registering a different one under the same name is
/// a configuration error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Permission {
    /// Unique name, e.g. "view-table".
    pub name: String,
    /// Short alias, e.g. "vt".
    #[serde(default)]
    pub abbr: Option<String>,
    /// Human-readable description shown in the catalog.
    #[serde(default)]
    pub description: String,
    /// Result used when no checker has an opinion.
    #[serde(default)]
    pub default: bool,
    /// Whether checks may be narrowed to a database.
    #[serde(default)]
    pub takes_database: bool,
    /// Whether checks may be narrowed to a table or query.
    #[serde(default)]
    pub takes_resource: bool,
}

impl Permission {
    /// An instance-wide permission with no abbreviation.
    pub fn new(name: impl Into<String>, description: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            abbr: None,
            description: description.into(),
            default,
            takes_database: false,
            takes_resource: false,
        }
    }

    /// Set the abbreviation and return self (builder pattern).
    pub fn with_abbr(mut self, abbr: impl Into<String>) -> Self {
        self.abbr = Some(abbr.into());
        self
    }

    /// Declare that checks take a database name.
    pub fn takes_database(mut self) -> Self {
        self.takes_database = true;
        self
    }

    /// Declare that checks take a database and a table or query name.
    pub fn takes_resource(mut self) -> Self {
        self.takes_database = true;
        self.takes_resource = true;
        self
    }
}
