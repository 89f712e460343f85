//! Manager behavior policies.
//!
//! # Responsibility
//! - Name the edge-case behaviors that differ between entity types.
//! - Allow policies to be loaded from JSON configuration.
//!
//! # Invariants
//! - A manager applies exactly one policy for its whole lifetime.
//! - Missing JSON keys fall back to the strict defaults.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What `add` does when the business key is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Fail with a duplicate-key error.
    #[default]
    Reject,
    /// Replace the stored entity.
    Overwrite,
    /// Keep the stored entity and report success.
    KeepExisting,
}

/// What `delete` does when the business key is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDeletePolicy {
    /// Fail with a not-found error.
    #[default]
    Reject,
    /// Succeed without touching the store.
    Ignore,
}

/// What `update` does when the business key is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingUpdatePolicy {
    /// Fail with a not-found error.
    #[default]
    Reject,
    /// Succeed without touching the store.
    Ignore,
    /// Insert the entity.
    Upsert,
}

/// What `get_all` returns for an empty store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyListPolicy {
    /// Fail with `No <noun> found.`.
    #[default]
    Strict,
    /// Return an empty collection.
    Lenient,
}

/// Full policy set applied by one manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerPolicy {
    pub on_duplicate: DuplicateKeyPolicy,
    pub on_missing_delete: MissingDeletePolicy,
    pub on_missing_update: MissingUpdatePolicy,
    pub on_empty_list: EmptyListPolicy,
}

impl ManagerPolicy {
    /// Parses a policy from a JSON object such as
    /// `{"on_duplicate": "overwrite", "on_empty_list": "lenient"}`.
    pub fn from_json(source: &str) -> Result<Self, PolicyError> {
        serde_json::from_str(source).map_err(PolicyError::Parse)
    }

    pub fn to_json(&self) -> Result<String, PolicyError> {
        serde_json::to_string(self).map_err(PolicyError::Parse)
    }
}

/// Policy configuration could not be decoded.
#[derive(Debug)]
pub enum PolicyError {
    Parse(serde_json::Error),
}

impl Display for PolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid manager policy: {err}"),
        }
    }
}

impl Error for PolicyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}
