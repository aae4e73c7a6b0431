//! Export shape tests: validate the documents handed to downstream tools
//! through the public API only.

use kgraph_core::GraphConfig;
use kgraph_export::{flatten_list, load_flat, load_snapshot, Exporter, FlatValue};
use kgraph_store::{EntityMention, KnowledgeGraph, NodeKey};

fn path_graph() -> KnowledgeGraph {
    let mut g = KnowledgeGraph::new();
    for text in ["X", "Y", "Z"] {
        g.add_entity(&EntityMention::new(text, "CONCEPT", 0.9), "doc1")
            .unwrap();
    }
    g.add_entity(&EntityMention::new("X", "CONCEPT", 0.9), "doc2")
        .unwrap();
    g.add_relationship("X", "Y", "CO_OCCURS", 0.5).unwrap();
    g.add_relationship("Y", "Z", "CO_OCCURS", 0.5).unwrap();
    g
}

/// Stats document fields and types for the 3-node path fixture.
#[test]
fn test_stats_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(dir.path(), &GraphConfig::default());
    let path = exporter.save_stats(&path_graph(), "kg").unwrap();

    let stats: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(stats["nodes"], 3);
    assert_eq!(stats["edges"], 2);
    assert!((stats["density"].as_f64().unwrap() - 0.333).abs() < 1e-3);
    assert!((stats["avg_degree"].as_f64().unwrap() - 1.333).abs() < 1e-3);
    assert_eq!(stats["connected_components"], 1);
    assert_eq!(stats["entity_types"]["CONCEPT"], 3);

    // top_entities is a list of [text, score] pairs
    let top = stats["top_entities"].as_array().unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0][0], "Y");
    assert_eq!(top[0][1].as_f64().unwrap(), 1.0);
}

/// The flat format turns the source list into text, and reading it back
/// yields that same text rather than a list.
#[test]
fn test_flat_roundtrip_is_lossy() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(dir.path(), &GraphConfig::default());
    let graph = path_graph();
    let path = exporter.save_flat(&graph, "kg").unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let sources = &raw["nodes"][0]["attributes"]["sources"];
    assert!(sources.is_string());
    assert!(!sources.is_array());

    let flat = load_flat(&path).unwrap();
    let x = flat.node("n0").unwrap();
    let expected = flatten_list(&["doc1".to_string(), "doc2".to_string()]);
    assert_eq!(x.attributes["sources"], FlatValue::Text(expected));

    let original = graph.lookup_by_key(&NodeKey::new("X", "CONCEPT")).unwrap();
    assert_eq!(original.sources, vec!["doc1", "doc2"]);
}

/// The snapshot keeps the list type and every other attribute exactly.
#[test]
fn test_snapshot_roundtrip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(dir.path(), &GraphConfig::default());
    let graph = path_graph();
    let paths = exporter.save_graph(&graph, "kg").unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.snapshot).unwrap()).unwrap();
    assert!(raw["nodes"][0]["sources"].is_array());
    assert!(raw["created_at"].is_string());

    let reloaded = load_snapshot(&paths.snapshot).unwrap();
    let key = NodeKey::new("X", "CONCEPT");
    assert_eq!(reloaded.lookup_by_key(&key), graph.lookup_by_key(&key));
    assert_eq!(
        reloaded.relation(&key, &NodeKey::new("Y", "CONCEPT")),
        graph.relation(&key, &NodeKey::new("Y", "CONCEPT"))
    );
    assert_eq!(reloaded.stats(10), graph.stats(10));
}

/// Visualization hand-off: vis-style node/edge lists.
#[test]
fn test_visualization_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(dir.path(), &GraphConfig::default());
    let path = exporter.save_visualization(&path_graph(), "kg").unwrap();

    let vis: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let node = &vis["nodes"][0];
    assert!(node["id"].is_string());
    assert!(node["label"].is_string());
    assert!(node["group"].is_string());
    assert!(node["value"].is_number());
    let edge = &vis["edges"][0];
    assert!(edge["from"].is_string());
    assert!(edge["to"].is_string());
    assert!(edge["value"].is_number());
}
