//! Triple store (SPARQL endpoint) client
//!
//! One fixed-shape query per subject: every statement with the subject on
//! the left, plus optional labels and entity types for the objects. No
//! query planning happens here.

use crate::{GraphError, GraphResult};
use async_trait::async_trait;
use recallscope_core::Triple;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Domain vocabulary namespace.
pub const VOCAB_NS: &str = "http://example.org/recall/quality/";
/// Namespace recall-event resources are minted under.
pub const EVENT_NS: &str = "http://example.org/resource/event/";

/// IRI of the event resource for a bare event id.
pub fn event_iri(id: &str) -> String {
    format!("{}{}", EVENT_NS, id)
}

/// The fixed statement query, parameterized only by the subject IRI.
pub fn subject_statements_query(subject_iri: &str) -> String {
    format!(
        r#"PREFIX rq: <{vocab}>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX skos: <http://www.w3.org/2004/02/skos/core#>

SELECT ?p ?o ?label ?type WHERE {{
  <{subject}> ?p ?o .
  OPTIONAL {{ ?o rdfs:label ?label }}
  OPTIONAL {{ ?o skos:prefLabel ?label }}
  OPTIONAL {{ ?o rq:entityType ?type }}
}}"#,
        vocab = VOCAB_NS,
        subject = subject_iri,
    )
}

/// SPARQL results-bindings response.
///
/// Absent `results`/`bindings` sections read as empty, and any extra
/// top-level fields (`head`, ...) round-trip untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SparqlResponse {
    #[serde(default)]
    pub results: BindingSet,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingSet {
    #[serde(default)]
    pub bindings: Vec<StatementBinding>,
}

/// One result row. `p` and `o` are required by the query but modeled as
/// optional so that a malformed row degrades to "skipped" instead of
/// failing the whole response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementBinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<BoundTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o: Option<BoundTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<BoundTerm>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<BoundTerm>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundTerm {
    pub value: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl StatementBinding {
    fn to_triple(&self) -> Option<Triple> {
        let (p, o) = (self.p.as_ref()?, self.o.as_ref()?);
        Some(Triple {
            predicate: p.value.clone(),
            object: o.value.clone(),
            label: self.label.as_ref().map(|t| t.value.clone()),
            entity_type: self.entity_type.as_ref().map(|t| t.value.clone()),
        })
    }
}

impl SparqlResponse {
    /// Bindings as triples, in response order. Rows without a predicate or
    /// object are skipped.
    pub fn triples(&self) -> Vec<Triple> {
        self.results
            .bindings
            .iter()
            .filter_map(StatementBinding::to_triple)
            .collect()
    }
}

/// Triple store configuration
#[derive(Debug, Clone)]
pub struct SparqlConfig {
    pub endpoint: String,
    pub dataset: String,
    pub timeout_seconds: u64,
}

impl SparqlConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            dataset: "recalls".to_string(),
            timeout_seconds: 30,
        }
    }

    pub fn with_dataset(mut self, dataset: &str) -> Self {
        self.dataset = dataset.to_string();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Triple store abstraction, implemented by [`SparqlClient`] and by
/// in-memory fakes in tests.
#[async_trait]
pub trait TripleStore: Send + Sync {
    /// All statements with `subject_iri` as subject.
    async fn subject_statements(&self, subject_iri: &str) -> GraphResult<SparqlResponse>;
}

/// SPARQL 1.1 Protocol client (Fuseki-compatible)
pub struct SparqlClient {
    config: SparqlConfig,
    client: Client,
}

impl SparqlClient {
    pub fn new(config: SparqlConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TripleStore for SparqlClient {
    async fn subject_statements(&self, subject_iri: &str) -> GraphResult<SparqlResponse> {
        let url = format!("{}/{}/sparql", self.config.endpoint, self.config.dataset);
        let query = subject_statements_query(subject_iri);
        tracing::debug!(%url, subject = subject_iri, "executing statement query");

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/sparql-results+json")
            .form(&[("query", query.as_str())])
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(GraphError::ApiError {
                status,
                message: text,
            });
        }

        Ok(response.json().await?)
    }
}
