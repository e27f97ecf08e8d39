// Integration tests for recallscope components
// These tests verify end-to-end translation and assembly across crates

use recallscope_core::{FilterState, RequestSequencer};
use recallscope_graph::{event_iri, GraphAssembler, SparqlResponse};
use recallscope_search::{QueryTranslator, SearchResponse};

#[test]
fn test_search_state_to_request_to_response() {
    // User types a prefix and toggles two facets
    let mut filters = FilterState::new();
    filters.toggle("System", "Drug");
    filters.toggle("Risk", "Class I");
    filters.toggle("Risk", "Class II");

    let request = QueryTranslator::translate(Some("listeria"), &filters);
    let wire = serde_json::to_value(&request).unwrap();

    assert_eq!(wire["size"], 50);
    assert_eq!(wire["query"]["bool"]["must"]["query_string"]["query"], "listeria*");
    assert_eq!(wire["query"]["bool"]["filter"].as_array().unwrap().len(), 2);
    assert_eq!(wire["aggs"].as_object().unwrap().len(), 4);

    // Backend reply: two facet buckets, one hit
    let response: SearchResponse = serde_json::from_str(
        r#"{
            "took": 2,
            "hits": {"hits": [{"_id": "E1", "_source": {"recalling_firm": "Firm X"}}]},
            "aggregations": {
                "System": {"buckets": [
                    {"key": "Contamination", "doc_count": 12},
                    {"key": "Labeling", "doc_count": 4}
                ]}
            }
        }"#,
    )
    .unwrap();

    assert_eq!(response.hits().len(), 1);
    let buckets = response.buckets("System");
    assert_eq!(buckets.len(), 2);
    // Backend order preserved, not re-sorted
    assert_eq!(buckets[0].key, "Contamination");
    assert!(response.buckets("Site").is_empty());
}

#[test]
fn test_subject_selection_to_graph_model() {
    // User picks hit E1; the triple store answers with three statements,
    // two of which share an object
    let subject = event_iri("E1");
    let response: SparqlResponse = serde_json::from_str(
        r#"{"results": {"bindings": [
            {
                "p": {"value": "http://example.org/recall/quality/hasFailureType"},
                "o": {"value": "http://example.org/recall/quality/failure_type/contamination"},
                "label": {"value": "Contamination"}
            },
            {
                "p": {"value": "http://example.org/recall/quality/mentionsEntity"},
                "o": {"value": "http://example.org/resource/entity/acme"}
            },
            {
                "p": {"value": "http://example.org/recall/quality/relatedTo"},
                "o": {"value": "http://example.org/resource/entity/acme"}
            }
        ]}}"#,
    )
    .unwrap();

    let triples = response.triples();
    let model = GraphAssembler::assemble(&subject, "Firm X", &triples);

    // Root first, then first-seen distinct objects
    assert_eq!(model.nodes.len(), 3);
    assert_eq!(model.nodes[0].id, subject);
    assert_eq!(model.nodes[1].label, "Contamination");
    assert_eq!(model.nodes[2].label, "acme");
    // One link per statement, shared object included twice
    assert_eq!(model.links.len(), 3);
    assert!(model.links.iter().all(|l| l.source == subject));
}

#[test]
fn test_empty_backends_degrade_to_empty_views() {
    let response: SearchResponse = serde_json::from_str("{}").unwrap();
    assert!(response.hits().is_empty());

    let sparql: SparqlResponse = serde_json::from_str("{}").unwrap();
    let model = GraphAssembler::assemble(&event_iri("E9"), "Nobody", &sparql.triples());
    assert_eq!(model.nodes.len(), 1);
    assert!(model.links.is_empty());
}

#[tokio::test]
async fn test_out_of_order_responses_resolve_to_newest() {
    use std::sync::Arc;

    // Two rapid filter toggles issue two requests; the older response
    // arrives last and must lose
    let sequencer = Arc::new(RequestSequencer::new());
    let first = sequencer.issue();
    let second = sequencer.issue();

    let seq = Arc::clone(&sequencer);
    let late_first = tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        seq.admit(first)
    });
    let seq = Arc::clone(&sequencer);
    let early_second = tokio::spawn(async move { seq.admit(second) });

    assert!(early_second.await.unwrap());
    assert!(!late_first.await.unwrap());
}
