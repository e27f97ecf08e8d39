//! # Recallscope API
//!
//! Inbound HTTP surface for the recall-event explorer: a search endpoint
//! over the document index and a graph-data endpoint over the triple store.
//! Both return the backend response verbatim; translation and assembly live
//! in `recallscope-search` and `recallscope-graph`.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use handlers::*;
pub use models::*;
pub use routes::*;
pub use server::*;
