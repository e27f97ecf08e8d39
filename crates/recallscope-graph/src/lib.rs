//! # Recallscope Graph
//!
//! Builds the entity-relationship view rooted at a single recall event:
//! - Fixed-shape SPARQL query over the triple store, with typed bindings
//! - Graph assembly: node deduplication and predicate-based classification

pub mod assembler;
pub mod sparql;

pub use assembler::GraphAssembler;
pub use sparql::{event_iri, SparqlClient, SparqlConfig, SparqlResponse, TripleStore};

/// Graph operation result type
pub type GraphResult<T> = Result<T, GraphError>;

/// Triple store error types
#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Triple store error: {status} - {message}")]
    ApiError { status: u16, message: String },
}
