//! The ontology store: concepts, synonym clusters, and the broader-than DAG.
//!
//! Built once per process and immutable afterwards, so matchers on rayon
//! workers can share it behind an `Arc` without locks. The store keeps two
//! key spaces: space-joined keys (syntactic matching) and underscore-joined
//! keys (semantic matching against embedding-model entries), plus a 4-char
//! stem index that prunes string-similarity candidates to a small block.

pub mod climb;
pub mod load;

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::error::OntologyError;

/// Stem keys are the first four chars of a concept key.
pub const STEM_LEN: usize = 4;

/// Stem of a phrase: its first [`STEM_LEN`] chars.
pub fn stem_of(phrase: &str) -> String {
    phrase.chars().take(STEM_LEN).collect()
}

/// The serializable core of an ontology, as found in the JSON source and the
/// binary cache. All derived indexes are rebuilt from this on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OntologyData {
    /// All concept keys, space-joined, lowercase.
    pub topics: Vec<String>,
    /// Synonym cluster resolution: concept key → preferred label.
    #[serde(default)]
    pub primary_labels: HashMap<String, String>,
    /// Broader-than adjacency: narrower key → direct parent keys.
    #[serde(default)]
    pub broaders: HashMap<String, Vec<String>>,
}

/// Counts reported by `ontosift info`.
#[derive(Debug, Clone, Serialize)]
pub struct OntologyStats {
    pub topics: usize,
    pub synonym_mappings: usize,
    pub broader_edges: usize,
    pub roots: usize,
}

/// Immutable in-memory ontology with derived indexes.
#[derive(Debug)]
pub struct Ontology {
    data: OntologyData,
    topic_set: HashSet<String>,
    /// stem → concept keys sharing it, in `topics` order.
    stem_index: HashMap<String, Vec<String>>,
    /// underscore key → space-joined display form.
    topics_wu: HashMap<String, String>,
    /// underscore key → underscore-joined primary label.
    primary_labels_wu: HashMap<String, String>,
    /// Broader-than hierarchy: edge narrower → broader.
    hierarchy: DiGraph<String, ()>,
    node_index: HashMap<String, NodeIndex>,
}

impl Ontology {
    /// Build the store and all derived indexes, validating that every key
    /// referenced by `primary_labels` or `broaders` is a known topic.
    pub fn from_data(data: OntologyData) -> Result<Self, OntologyError> {
        let topic_set: HashSet<String> = data.topics.iter().cloned().collect();

        for (key, label) in &data.primary_labels {
            for referenced in [key, label] {
                if !topic_set.contains(referenced) {
                    return Err(OntologyError::UnknownConcept {
                        key: referenced.clone(),
                        referenced_by: "primary_labels".into(),
                    });
                }
            }
        }
        for (narrower, parents) in &data.broaders {
            if !topic_set.contains(narrower) {
                return Err(OntologyError::UnknownConcept {
                    key: narrower.clone(),
                    referenced_by: "broaders".into(),
                });
            }
            for parent in parents {
                if !topic_set.contains(parent) {
                    return Err(OntologyError::UnknownConcept {
                        key: parent.clone(),
                        referenced_by: "broaders".into(),
                    });
                }
            }
        }

        let mut stem_index: HashMap<String, Vec<String>> = HashMap::new();
        for topic in &data.topics {
            stem_index
                .entry(stem_of(topic))
                .or_default()
                .push(topic.clone());
        }

        let mut topics_wu = HashMap::with_capacity(data.topics.len());
        for topic in &data.topics {
            topics_wu.insert(topic.replace(' ', "_"), topic.clone());
        }
        let mut primary_labels_wu = HashMap::with_capacity(data.primary_labels.len());
        for (key, label) in &data.primary_labels {
            primary_labels_wu.insert(key.replace(' ', "_"), label.replace(' ', "_"));
        }

        let mut hierarchy = DiGraph::new();
        let mut node_index = HashMap::with_capacity(data.topics.len());
        for topic in &data.topics {
            let idx = hierarchy.add_node(topic.clone());
            node_index.insert(topic.clone(), idx);
        }
        for (narrower, parents) in &data.broaders {
            let from = node_index[narrower];
            for parent in parents {
                let to = node_index[parent];
                hierarchy.update_edge(from, to, ());
            }
        }

        Ok(Self {
            data,
            topic_set,
            stem_index,
            topics_wu,
            primary_labels_wu,
            hierarchy,
            node_index,
        })
    }

    /// All concept keys (space-joined form).
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.data.topics.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.topics.is_empty()
    }

    /// Is `key` a known concept (space-joined form)?
    pub fn contains(&self, key: &str) -> bool {
        self.topic_set.contains(key)
    }

    /// Is `key_wu` a known concept (underscore-joined form)?
    pub fn contains_wu(&self, key_wu: &str) -> bool {
        self.topics_wu.contains_key(key_wu)
    }

    /// Preferred label for a concept key; the key itself when it has no
    /// synonym cluster.
    pub fn primary_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.data
            .primary_labels
            .get(key)
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Underscore-space twin of [`Self::primary_label`].
    pub fn primary_label_wu<'a>(&'a self, key_wu: &'a str) -> &'a str {
        self.primary_labels_wu
            .get(key_wu)
            .map(String::as_str)
            .unwrap_or(key_wu)
    }

    /// Space-joined display form for an underscore key. Falls back to an
    /// in-place replacement for keys outside the ontology.
    pub fn display_label(&self, key_wu: &str) -> String {
        self.topics_wu
            .get(key_wu)
            .cloned()
            .unwrap_or_else(|| key_wu.replace('_', " "))
    }

    /// Concept keys sharing a stem. Empty for unseen stems.
    pub fn stem_block(&self, stem: &str) -> &[String] {
        self.stem_index
            .get(stem)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Direct broader concepts of `key`. Empty for roots and unknown keys.
    pub fn broaders_of(&self, key: &str) -> Vec<&str> {
        let Some(&idx) = self.node_index.get(key) else {
            return Vec::new();
        };
        self.hierarchy
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|n| self.hierarchy.node_weight(n))
            .map(String::as_str)
            .collect()
    }

    /// Direct narrower concepts of `key`.
    pub fn narrowers_of(&self, key: &str) -> Vec<&str> {
        let Some(&idx) = self.node_index.get(key) else {
            return Vec::new();
        };
        self.hierarchy
            .neighbors_directed(idx, Direction::Incoming)
            .filter_map(|n| self.hierarchy.node_weight(n))
            .map(String::as_str)
            .collect()
    }

    pub fn stats(&self) -> OntologyStats {
        let roots = self
            .node_index
            .values()
            .filter(|&&idx| {
                self.hierarchy
                    .neighbors_directed(idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .count();
        OntologyStats {
            topics: self.data.topics.len(),
            synonym_mappings: self.data.primary_labels.len(),
            broader_edges: self.hierarchy.edge_count(),
            roots,
        }
    }

    /// The serializable core, for cache writing.
    pub fn data(&self) -> &OntologyData {
        &self.data
    }
}
