//! Explorer API server entry point

use anyhow::Result;
use recallscope_api::{shutdown_signal, ExplorerServer, ServerConfig};
use recallscope_graph::{SparqlClient, SparqlConfig};
use recallscope_search::{SearchClient, SearchConfig};
use std::sync::Arc;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let search_config = SearchConfig::new(&env_or("SEARCH_HOST", "http://elasticsearch:9200"))
        .with_index(&env_or("SEARCH_INDEX", "recall_events"));
    let sparql_config = SparqlConfig::new(&env_or("TRIPLE_STORE_HOST", "http://fuseki:3030"))
        .with_dataset(&env_or("TRIPLE_STORE_DATASET", "recalls"));

    let search = Arc::new(SearchClient::new(search_config));
    let triple_store = Arc::new(SparqlClient::new(sparql_config));

    let server = ExplorerServer::with_config(ServerConfig::from_env(), search, triple_store);
    server.run_with_shutdown(shutdown_signal()).await
}
