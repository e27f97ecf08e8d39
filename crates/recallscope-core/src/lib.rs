//! # Recallscope Core
//!
//! Shared data models for exploring regulatory recall events: facet filter
//! state for the search side, triples and node/link graph models for the
//! entity-graph side, plus request correlation for the interactive session.

pub mod model;
pub mod session;

pub use model::*;
pub use session::*;
