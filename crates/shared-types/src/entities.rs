//! # Core Domain Entities
//!
//! Defines the requirement entities the coordination layer operates on.
//! The document model owns these rows; this layer only references them
//! when filtering and dispatching batch analysis work.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifying key of a requirement (the "Item" column of the document grid).
///
/// Keys are opaque strings assigned by the document model. They are the
/// unit of deduplication for batch analysis membership sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequirementKey(pub String);

impl RequirementKey {
    /// Create a key from anything string-like.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequirementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequirementKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

/// Result of one analysis pass over a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Analysis {
    /// Human-readable analysis summary produced by the backend.
    pub summary: String,
    /// Whether the backend considers this requirement fully analyzed.
    pub is_analyzed: bool,
}

impl Analysis {
    /// An analysis marked complete with the given summary.
    #[must_use]
    pub fn completed(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            is_analyzed: true,
        }
    }
}

/// A requirement row as the coordination layer sees it.
///
/// A row may lack a key (freshly inserted, not yet committed by the
/// document model) or a description (heading-only rows); both cases are
/// filtered out of batch analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Requirement {
    /// Identifying key, if the document model has assigned one.
    pub key: Option<RequirementKey>,
    /// Requirement text to analyze. May be empty.
    pub description: String,
    /// Last known analysis result, if any.
    pub analysis: Option<Analysis>,
}

impl Requirement {
    /// A keyed requirement with the given description and no analysis.
    #[must_use]
    pub fn new(key: impl Into<RequirementKey>, description: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            description: description.into(),
            analysis: None,
        }
    }

    /// Whether this row carries analyzable text.
    #[must_use]
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Whether the backend already analyzed this row.
    #[must_use]
    pub fn is_analyzed(&self) -> bool {
        self.analysis.as_ref().is_some_and(|a| a.is_analyzed)
    }
}

impl From<String> for RequirementKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
