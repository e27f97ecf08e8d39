//! Data models shared by the search and graph layers

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Facet categories exposed for filtering.
///
/// The set is fixed; anything else arriving in a [`FilterState`] is ignored
/// rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacetCategory {
    System,
    Site,
    Risk,
}

impl FacetCategory {
    /// All recognized categories, in display order.
    pub const ALL: [FacetCategory; 3] =
        [FacetCategory::System, FacetCategory::Site, FacetCategory::Risk];

    /// Category name as it appears in filter state and aggregation keys.
    pub fn name(&self) -> &'static str {
        match self {
            FacetCategory::System => "System",
            FacetCategory::Site => "Site",
            FacetCategory::Risk => "Risk",
        }
    }

    /// Index field the category buckets over.
    pub fn field(&self) -> &'static str {
        match self {
            FacetCategory::System => "failure_type",
            // State is used as a proxy for site location
            FacetCategory::Site => "state",
            FacetCategory::Risk => "classification",
        }
    }

    /// Maximum number of buckets requested for the category.
    pub fn bucket_size(&self) -> usize {
        match self {
            FacetCategory::System => 20,
            FacetCategory::Site => 50,
            FacetCategory::Risk => 5,
        }
    }

    /// Resolve a category from its name, if recognized.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for FacetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Selected facet values per category.
///
/// Owned by the interactive session and mutated only through [`toggle`].
/// Values are unique per category; selection order is not significant.
///
/// [`toggle`]: FilterState::toggle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState(BTreeMap<String, BTreeSet<String>>);

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected values for a recognized category. Empty selections and
    /// absent categories both read as an empty set.
    pub fn selected(&self, category: FacetCategory) -> Option<&BTreeSet<String>> {
        self.0.get(category.name()).filter(|v| !v.is_empty())
    }

    /// Flip a single facet value on or off.
    pub fn toggle(&mut self, category: &str, value: &str) {
        let values = self.0.entry(category.to_string()).or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
    }

    /// True when no recognized category has a selection.
    pub fn is_empty(&self) -> bool {
        FacetCategory::ALL.iter().all(|c| self.selected(*c).is_none())
    }
}

/// A (value, count) pair summarizing one facet value over the current
/// result set. Bucket order is whatever the backend returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBucket {
    pub key: String,
    #[serde(rename = "doc_count")]
    pub count: u64,
}

/// An opaque document hit. Fields beyond the identifier are passed through
/// verbatim; this layer never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: serde_json::Value,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// One statement about the inspected subject, as returned by the triple
/// store. The subject itself is implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub predicate: String,
    pub object: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

impl Triple {
    pub fn new(predicate: &str, object: &str) -> Self {
        Self {
            predicate: predicate.to_string(),
            object: object.to_string(),
            label: None,
            entity_type: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_entity_type(mut self, entity_type: &str) -> Self {
        self.entity_type = Some(entity_type.to_string());
        self
    }
}

/// A node in the assembled entity graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub weight: u32,
    pub color: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
}

/// A directed link between two nodes, by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Node/link model for one subject. Node ids are unique and the root is
/// always first; links are intentionally not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphModel {
    /// The subject node the assembly was anchored at.
    pub fn root(&self) -> Option<&GraphNode> {
        self.nodes.first()
    }
}
