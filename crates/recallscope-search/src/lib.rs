//! # Recallscope Search
//!
//! Translates interactive search state (free text + facet selections) into
//! structured search requests, and executes them against an
//! Elasticsearch-compatible backend:
//! - Query translation (pure, no I/O)
//! - Typed request/response wire models
//! - HTTP client with defaulted-empty response handling

pub mod client;
pub mod translator;

pub use client::{SearchBackend, SearchClient, SearchConfig, SearchResponse};
pub use translator::{QueryTranslator, SearchRequest, RESULT_WINDOW};

/// Search operation result type
pub type SearchResult<T> = Result<T, SearchError>;

/// Search backend error types
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Backend error: {status} - {message}")]
    ApiError { status: u16, message: String },
}
