//! End-to-end integration tests for the ontosift classifier.
//!
//! These tests exercise the full pipeline from JSON assets on disk through
//! store loading, both matching passes, ranking and hierarchy climbing,
//! validating that the stores, the matchers and the batch runner all work
//! together.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ontosift::batch::{self, BatchRecord};
use ontosift::classifier::Classifier;
use ontosift::config::{ClassifierConfig, ClimbMode};
use ontosift::corpus;
use ontosift::error::PaperError;
use ontosift::model::{EmbeddingEntry, EmbeddingModel, ModelData};
use ontosift::ontology::{Ontology, OntologyData};
use ontosift::paper::Paper;

fn ontology_data() -> OntologyData {
    OntologyData {
        topics: vec![
            "neural network".into(),
            "neural networks".into(),
            "feedforward neural networks".into(),
            "lazy evaluation".into(),
            "network architecture".into(),
            "network components".into(),
            "machine learning".into(),
            "artificial intelligence".into(),
            "computer science".into(),
        ],
        primary_labels: HashMap::from([(
            "neural network".to_string(),
            "neural networks".to_string(),
        )]),
        broaders: HashMap::from([
            (
                "neural networks".to_string(),
                vec!["machine learning".to_string()],
            ),
            (
                "machine learning".to_string(),
                vec!["artificial intelligence".to_string()],
            ),
            (
                "artificial intelligence".to_string(),
                vec!["computer science".to_string()],
            ),
        ]),
    }
}

fn entry(topic: &str, sim_t: f64, wet: &str, sim_w: f64) -> EmbeddingEntry {
    EmbeddingEntry {
        topic: topic.to_string(),
        sim_t,
        wet: wet.to_string(),
        sim_w,
    }
}

fn model_data() -> ModelData {
    let mut data = ModelData::new();
    data.insert(
        "lazy".into(),
        vec![entry("lazy_evaluation", 0.96, "lazy_evaluation", 0.75)],
    );
    data.insert(
        "neural_network".into(),
        vec![
            entry("neural_networks", 0.97, "neural_network", 1.0),
            entry(
                "feedforward_neural_networks",
                0.95,
                "feedforward_neural_network",
                0.86,
            ),
            entry("network_architecture", 0.94, "network_architecture", 0.72),
        ],
    );
    data.insert(
        "network".into(),
        vec![entry("network_components", 0.95, "network_component", 0.81)],
    );
    data
}

fn test_classifier() -> Classifier {
    classifier_with(ClassifierConfig::default())
}

fn classifier_with(config: ClassifierConfig) -> Classifier {
    let ontology = Ontology::from_data(ontology_data()).unwrap();
    let model = EmbeddingModel::from_data(model_data());
    Classifier::new(Arc::new(ontology), Arc::new(model), config).unwrap()
}

fn write_assets(dir: &Path) -> (PathBuf, PathBuf) {
    let ontology_path = dir.join("ontology.json");
    let model_path = dir.join("model.json");
    fs::write(
        &ontology_path,
        serde_json::to_string(&ontology_data()).unwrap(),
    )
    .unwrap();
    fs::write(&model_path, serde_json::to_string(&model_data()).unwrap()).unwrap();
    (ontology_path, model_path)
}

fn fox_paper() -> Paper {
    Paper::new(
        None,
        Some("The quick brown fox jumped over the lazy neural network.".to_string()),
        None,
    )
}

#[test]
fn end_to_end_classify_runs_all_three_passes() {
    let classifier = test_classifier();
    let prediction = classifier.classify(&fox_paper()).unwrap();

    // The lexical pass finds only the literally present concept, resolved to
    // its preferred label.
    assert_eq!(prediction.syntactic, ["neural networks"]);

    // The embedding pass fans out to everything the model reaches.
    assert_eq!(
        prediction.semantic,
        [
            "feedforward neural networks",
            "lazy evaluation",
            "network architecture",
            "network components",
            "neural networks",
        ]
    );

    // Climbing promotes the whole ancestor chain, and nothing already found
    // directly reappears in the enhanced set.
    assert_eq!(
        prediction.enhanced,
        ["artificial intelligence", "computer science", "machine learning"]
    );
    for topic in &prediction.enhanced {
        assert!(!prediction.syntactic.contains(topic));
        assert!(!prediction.semantic.contains(topic));
    }
}

#[test]
fn stored_assets_round_trip_through_the_caches() {
    let dir = tempfile::TempDir::new().unwrap();
    let (ontology_path, model_path) = write_assets(dir.path());
    let ontology_cache = dir.path().join("ontology.cache");
    let model_cache = dir.path().join("model.cache");

    // First load parses JSON and writes both caches.
    let ontology = Ontology::load(&ontology_path, Some(&ontology_cache)).unwrap();
    let model = EmbeddingModel::load(&model_path, Some(&model_cache)).unwrap();
    assert!(ontology_cache.is_file());
    assert!(model_cache.is_file());

    let from_json =
        Classifier::new(Arc::new(ontology), Arc::new(model), ClassifierConfig::default()).unwrap();
    let expected = from_json.classify(&fox_paper()).unwrap();
    assert_eq!(expected, test_classifier().classify(&fox_paper()).unwrap());

    // Remove the JSON sources; the second load must come from the caches.
    fs::remove_file(&ontology_path).unwrap();
    fs::remove_file(&model_path).unwrap();
    let ontology = Ontology::load(&ontology_path, Some(&ontology_cache)).unwrap();
    let model = EmbeddingModel::load(&model_path, Some(&model_cache)).unwrap();

    let from_cache =
        Classifier::new(Arc::new(ontology), Arc::new(model), ClassifierConfig::default()).unwrap();
    assert_eq!(from_cache.classify(&fox_paper()).unwrap(), expected);
}

#[test]
fn single_pass_entry_points_agree_with_the_combined_run() {
    let classifier = test_classifier();
    let paper = fox_paper();

    let prediction = classifier.classify(&paper).unwrap();
    assert_eq!(
        classifier.classify_syntactic(&paper).unwrap(),
        prediction.syntactic
    );
    assert_eq!(
        classifier.classify_semantic(&paper).unwrap(),
        prediction.semantic
    );
}

#[test]
fn first_broader_climbing_stops_after_one_hop() {
    let classifier = classifier_with(ClassifierConfig {
        climb_mode: ClimbMode::FirstBroader,
        ..Default::default()
    });

    let prediction = classifier.classify(&fox_paper()).unwrap();
    assert_eq!(prediction.enhanced, ["machine learning"]);
}

#[test]
fn raising_the_semantic_threshold_narrows_the_result() {
    let strict = classifier_with(ClassifierConfig {
        semantic_threshold: 0.99,
        ..Default::default()
    });

    // No model record reaches 0.99, so the embedding pass goes quiet while
    // the lexical pass is untouched.
    let prediction = strict.classify(&fox_paper()).unwrap();
    assert_eq!(prediction.syntactic, ["neural networks"]);
    assert!(prediction.semantic.is_empty());
}

#[test]
fn keyword_only_papers_still_classify() {
    let classifier = test_classifier();
    let paper = Paper::new(
        None,
        None,
        Some("Neural Networks, Lazy Evaluation".to_string()),
    );

    let found = classifier.classify_syntactic(&paper).unwrap();
    assert_eq!(found, ["lazy evaluation", "neural networks"]);
}

#[test]
fn papers_without_text_are_rejected() {
    let classifier = test_classifier();

    let empty = Paper::new(None, None, None);
    assert!(matches!(
        classifier.classify(&empty),
        Err(PaperError::EmptyText)
    ));

    // Whitespace-only fields count as empty too.
    let blank = Paper::new(Some("   ".to_string()), None, Some(" , ".to_string()));
    assert!(matches!(
        classifier.classify(&blank),
        Err(PaperError::EmptyText)
    ));
}

#[test]
fn similar_topics_ranks_embedding_neighbors() {
    let classifier = test_classifier();

    let neighbors = classifier.similar_topics("neural network", 3);
    let labels: Vec<&str> = neighbors.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "neural_network",
            "feedforward_neural_network",
            "network_component",
        ]
    );

    // Similarities come back in descending order.
    for pair in neighbors.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[test]
fn batch_classifies_a_corpus_into_jsonl() {
    let dir = tempfile::TempDir::new().unwrap();
    let corpus_path = dir.path().join("corpus.json");
    let output_path = dir.path().join("predictions.jsonl");

    fs::write(
        &corpus_path,
        serde_json::to_string(&serde_json::json!({
            "a-fox": {
                "abstract": "The quick brown fox jumped over the lazy neural network."
            },
            "b-keywords": { "keywords": ["neural networks", "lazy evaluation"] },
            "silent": {},
        }))
        .unwrap(),
    )
    .unwrap();

    let papers = corpus::load(corpus_path.to_str().unwrap()).unwrap();
    assert_eq!(papers.len(), 3);

    let classifier = test_classifier();
    let summary = batch::run(&classifier, &papers, &output_path).unwrap();
    assert_eq!(summary.classified, 2);
    assert_eq!(summary.failed, ["silent"]);

    // One JSON line per classified paper, in corpus order.
    let written = fs::read_to_string(&output_path).unwrap();
    let records: Vec<BatchRecord> = written
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "a-fox");
    assert_eq!(records[1].id, "b-keywords");
    assert_eq!(records[0].prediction.syntactic, ["neural networks"]);
    assert_eq!(
        records[1].prediction.syntactic,
        ["lazy evaluation", "neural networks"]
    );
}

#[test]
fn classification_is_deterministic_across_instances() {
    let first = test_classifier().classify(&fox_paper()).unwrap();
    let second = test_classifier().classify(&fox_paper()).unwrap();
    assert_eq!(first, second);
}
