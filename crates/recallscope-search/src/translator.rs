//! Translation from interactive search state to structured backend requests

use recallscope_core::{FacetCategory, FilterState};
use serde::Serialize;
use std::collections::BTreeMap;

/// Fixed result window; no pagination is exposed.
pub const RESULT_WINDOW: usize = 50;

/// Legacy aggregation retained for backward compatibility. Not exposed as a
/// filterable category.
const STATUS_AGGREGATION: (&str, &str, usize) = ("Status", "status", 5);

/// Text clause of a search request.
///
/// Free text is passed through unescaped; the backend's query-string syntax
/// is authoritative, so reserved characters reach it as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TextQuery {
    #[serde(rename = "query_string")]
    QueryString { query: String },
    #[serde(rename = "match_all")]
    MatchAll {},
}

/// An "any of these values" inclusion filter over one index field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermsFilter {
    terms: BTreeMap<String, Vec<String>>,
}

impl TermsFilter {
    pub fn any_of(field: &str, values: Vec<String>) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(field.to_string(), values);
        Self { terms }
    }

    pub fn field(&self) -> Option<&str> {
        self.terms.keys().next().map(String::as_str)
    }
}

/// Bucketed-count request for one facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermsAggregation {
    terms: TermsSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TermsSpec {
    field: String,
    size: usize,
}

impl TermsAggregation {
    pub fn new(field: &str, size: usize) -> Self {
        Self {
            terms: TermsSpec {
                field: field.to_string(),
                size,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoolQuery {
    pub must: TextQuery,
    pub filter: Vec<TermsFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryClause {
    #[serde(rename = "bool")]
    pub boolean: BoolQuery,
}

/// Structured search request: text clause, filter conjunction, and the
/// always-attached facet aggregations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub size: usize,
    pub query: QueryClause,
    pub aggs: BTreeMap<String, TermsAggregation>,
}

impl SearchRequest {
    pub fn text_query(&self) -> &TextQuery {
        &self.query.boolean.must
    }

    pub fn filters(&self) -> &[TermsFilter] {
        &self.query.boolean.filter
    }
}

/// Pure translation from (free text, facet selections) to a [`SearchRequest`].
pub struct QueryTranslator;

impl QueryTranslator {
    /// Build the request for the current interaction state.
    ///
    /// Aggregations are attached regardless of filters, so every response
    /// carries facet counts for the *filtered* result set: the backend
    /// computes them within the same query context, not globally.
    pub fn translate(free_text: Option<&str>, filters: &FilterState) -> SearchRequest {
        let must = match free_text {
            Some(text) if !text.is_empty() => TextQuery::QueryString {
                // Wildcard suffix gives incremental, prefix-style matching
                query: format!("{}*", text),
            },
            _ => TextQuery::MatchAll {},
        };

        let filter = FacetCategory::ALL
            .iter()
            .filter_map(|category| {
                filters.selected(*category).map(|values| {
                    TermsFilter::any_of(category.field(), values.iter().cloned().collect())
                })
            })
            .collect();

        let mut aggs = BTreeMap::new();
        for category in FacetCategory::ALL {
            aggs.insert(
                category.name().to_string(),
                TermsAggregation::new(category.field(), category.bucket_size()),
            );
        }
        let (name, field, size) = STATUS_AGGREGATION;
        aggs.insert(name.to_string(), TermsAggregation::new(field, size));

        SearchRequest {
            size: RESULT_WINDOW,
            query: QueryClause {
                boolean: BoolQuery { must, filter },
            },
            aggs,
        }
    }
}
