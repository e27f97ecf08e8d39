//! Graph model assembly from subject-anchored triples

use recallscope_core::{GraphLink, GraphModel, GraphNode, Triple};
use std::collections::HashSet;

/// Color of the root (subject) node.
pub const ROOT_COLOR: &str = "#ff3d00";
/// Color for predicates classified as failure types.
pub const FAILURE_TYPE_COLOR: &str = "#00e676";
/// Color for predicates classified as entity mentions.
pub const ENTITY_MENTION_COLOR: &str = "#2979ff";
/// Color for unclassified predicates.
pub const DEFAULT_COLOR: &str = "#ccc";

/// Root weight exceeds every non-root weight.
pub const ROOT_WEIGHT: u32 = 20;
pub const NODE_WEIGHT: u32 = 10;

struct ClassificationRule {
    marker: &'static str,
    color: &'static str,
}

/// Ordered predicate classification table; first match wins. The markers
/// are disjoint in practice, but the order is the contract.
const CLASSIFICATION_RULES: [ClassificationRule; 2] = [
    ClassificationRule {
        marker: "hasFailureType",
        color: FAILURE_TYPE_COLOR,
    },
    ClassificationRule {
        marker: "mentionsEntity",
        color: ENTITY_MENTION_COLOR,
    },
];

/// Classify a predicate IRI by substring marker.
pub fn classify_predicate(predicate: &str) -> &'static str {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| predicate.contains(rule.marker))
        .map(|rule| rule.color)
        .unwrap_or(DEFAULT_COLOR)
}

/// Explicit label when present, otherwise the last path segment of the
/// object identifier.
fn display_label(triple: &Triple) -> String {
    match &triple.label {
        Some(label) => label.clone(),
        None => triple
            .object
            .rsplit('/')
            .next()
            .unwrap_or(&triple.object)
            .to_string(),
    }
}

/// Pure assembly of a [`GraphModel`] from the triples of one subject.
pub struct GraphAssembler;

impl GraphAssembler {
    /// Build the node/link model for `subject_id`.
    ///
    /// Guarantees: the root node is first and never merged away; node ids
    /// are unique, in first-seen order; one link per input triple, links
    /// never deduplicated. Zero triples is a valid terminal state.
    pub fn assemble(subject_id: &str, subject_label: &str, triples: &[Triple]) -> GraphModel {
        let root = GraphNode {
            id: subject_id.to_string(),
            label: subject_label.to_string(),
            weight: ROOT_WEIGHT,
            color: ROOT_COLOR.to_string(),
            node_type: None,
        };

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(root.id.clone());

        let mut nodes = vec![root];
        let mut links = Vec::with_capacity(triples.len());

        for triple in triples {
            if seen.insert(triple.object.clone()) {
                nodes.push(GraphNode {
                    id: triple.object.clone(),
                    label: display_label(triple),
                    weight: NODE_WEIGHT,
                    color: classify_predicate(&triple.predicate).to_string(),
                    node_type: triple.entity_type.clone(),
                });
            }
            links.push(GraphLink {
                source: subject_id.to_string(),
                target: triple.object.clone(),
            });
        }

        GraphModel { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_triples_yields_root_only() {
        let model = GraphAssembler::assemble("E1", "Firm X", &[]);
        assert_eq!(model.nodes.len(), 1);
        assert!(model.links.is_empty());
        assert_eq!(model.root().unwrap().id, "E1");
        assert_eq!(model.root().unwrap().color, ROOT_COLOR);
    }

    #[test]
    fn test_classification_scenario() {
        let triples = vec![
            Triple::new(
                "http://example.org/recall/quality/hasFailureType",
                "http://example.org/recall/quality/failure_type/A",
            )
            .with_label("Contamination"),
            Triple::new(
                "http://example.org/recall/quality/mentionsEntity",
                "http://example.org/resource/entity/B",
            ),
        ];
        let model = GraphAssembler::assemble("E1", "Firm X", &triples);

        assert_eq!(model.nodes.len(), 3);
        assert_eq!(model.nodes[0].id, "E1");
        assert_eq!(model.nodes[0].label, "Firm X");
        assert_eq!(model.nodes[1].label, "Contamination");
        assert_eq!(model.nodes[1].color, FAILURE_TYPE_COLOR);
        // No explicit label: falls back to the last path segment
        assert_eq!(model.nodes[2].label, "B");
        assert_eq!(model.nodes[2].color, ENTITY_MENTION_COLOR);

        assert_eq!(model.links.len(), 2);
        assert!(model.links.iter().all(|l| l.source == "E1"));
        assert_eq!(model.links[0].target, "http://example.org/recall/quality/failure_type/A");
        assert_eq!(model.links[1].target, "http://example.org/resource/entity/B");
    }

    #[test]
    fn test_unclassified_predicate_gets_default_color() {
        let triples = vec![Triple::new("http://example.org/recall/quality/reportedBy", "urn:x")];
        let model = GraphAssembler::assemble("E1", "Firm X", &triples);
        assert_eq!(model.nodes[1].color, DEFAULT_COLOR);
    }

    #[test]
    fn test_repeated_object_deduplicates_nodes_not_links() {
        let triples = vec![
            Triple::new("p1", "urn:a").with_label("first"),
            Triple::new("p2", "urn:a").with_label("second"),
            Triple::new("p3", "urn:a"),
        ];
        let model = GraphAssembler::assemble("E1", "Firm X", &triples);

        assert_eq!(model.nodes.len(), 2);
        // First-seen wins for the node's label
        assert_eq!(model.nodes[1].label, "first");
        assert_eq!(model.links.len(), 3);
    }

    #[test]
    fn test_self_reference_never_duplicates_root() {
        let triples = vec![Triple::new("p", "E1"), Triple::new("q", "urn:a")];
        let model = GraphAssembler::assemble("E1", "Firm X", &triples);

        assert_eq!(model.nodes.len(), 2);
        assert_eq!(model.root().unwrap().weight, ROOT_WEIGHT);
        // The self-referencing triple still contributes a link
        assert_eq!(model.links.len(), 2);
        assert_eq!(model.links[0].target, "E1");
    }

    #[test]
    fn test_entity_type_is_carried_onto_nodes() {
        let triples = vec![Triple::new("p", "urn:a").with_entity_type("Organization")];
        let model = GraphAssembler::assemble("E1", "Firm X", &triples);
        assert_eq!(model.nodes[1].node_type.as_deref(), Some("Organization"));
    }

    #[test]
    fn test_label_fallback_without_separator() {
        let triples = vec![Triple::new("p", "plain-literal")];
        let model = GraphAssembler::assemble("E1", "Firm X", &triples);
        assert_eq!(model.nodes[1].label, "plain-literal");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // A pathological predicate carrying both markers classifies by table order
        let color = classify_predicate("urn:hasFailureType/mentionsEntity");
        assert_eq!(color, FAILURE_TYPE_COLOR);
    }

    fn arb_triple() -> impl Strategy<Value = Triple> {
        (
            "[a-z]{1,6}",
            "[a-z]{1,4}(/[a-z]{1,4}){0,2}",
            proptest::option::of("[A-Z][a-z]{1,6}"),
        )
            .prop_map(|(p, o, label)| {
                let mut t = Triple::new(&p, &o);
                if let Some(l) = label {
                    t = t.with_label(&l);
                }
                t
            })
    }

    proptest! {
        #[test]
        fn prop_node_and_link_counts(triples in proptest::collection::vec(arb_triple(), 0..16)) {
            let model = GraphAssembler::assemble("urn:subject", "Subject", &triples);

            let mut distinct: std::collections::HashSet<&str> =
                triples.iter().map(|t| t.object.as_str()).collect();
            distinct.remove("urn:subject");

            prop_assert_eq!(model.nodes.len(), 1 + distinct.len());
            prop_assert_eq!(model.links.len(), triples.len());
            prop_assert_eq!(model.root().unwrap().id.as_str(), "urn:subject");
        }

        #[test]
        fn prop_assembly_is_deterministic(triples in proptest::collection::vec(arb_triple(), 0..16)) {
            let a = GraphAssembler::assemble("urn:subject", "Subject", &triples);
            let b = GraphAssembler::assemble("urn:subject", "Subject", &triples);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_node_ids_are_unique(triples in proptest::collection::vec(arb_triple(), 0..16)) {
            let model = GraphAssembler::assemble("urn:subject", "Subject", &triples);
            let ids: std::collections::HashSet<_> =
                model.nodes.iter().map(|n| n.id.as_str()).collect();
            prop_assert_eq!(ids.len(), model.nodes.len());
        }
    }
}
