//! The embedding model store.
//!
//! A read-only map from a token or underscore-joined phrase to its
//! precomputed embedding-space neighbors, each neighbor already resolved to
//! the ontology concept it is lexically closest to. The classifier never
//! touches raw vectors; everything numeric was computed when the model was
//! built.

pub mod load;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One precomputed neighbor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingEntry {
    /// Underscore-joined ontology concept this neighbor points at.
    pub topic: String,
    /// Lexical similarity between `wet` and `topic`, computed offline.
    pub sim_t: f64,
    /// The embedding-space neighbor word itself.
    pub wet: String,
    /// Vector-space similarity between the queried key and `wet`.
    pub sim_w: f64,
}

/// The serializable form: query key → neighbor records.
pub type ModelData = HashMap<String, Vec<EmbeddingEntry>>;

/// Immutable in-memory embedding model.
#[derive(Debug, Default)]
pub struct EmbeddingModel {
    entries: ModelData,
}

impl EmbeddingModel {
    pub fn from_data(entries: ModelData) -> Self {
        Self { entries }
    }

    /// Number of query keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Does the model know this token or underscore-joined phrase?
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Neighbor records for a key. Unknown keys get an empty slice, not an
    /// error.
    pub fn lookup(&self, key: &str) -> &[EmbeddingEntry] {
        self.entries
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Top-N embedding-space neighbors across a set of query tokens.
    ///
    /// Unions the neighbor lists, keeps the best similarity per neighbor
    /// word, drops everything under `floor`, and returns the strongest
    /// `top_n` sorted by similarity.
    pub fn most_similar(&self, tokens: &[&str], floor: f64, top_n: usize) -> Vec<(String, f64)> {
        let mut best: HashMap<&str, f64> = HashMap::new();
        for token in tokens {
            for entry in self.lookup(token) {
                let current = best.entry(entry.wet.as_str()).or_insert(f64::MIN);
                if entry.sim_w > *current {
                    *current = entry.sim_w;
                }
            }
        }

        let mut ranked: Vec<(String, f64)> = best
            .into_iter()
            .filter(|(_, sim)| *sim >= floor)
            .map(|(wet, sim)| (wet.to_string(), sim))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(top_n);
        ranked
    }

    /// The serializable core, for cache writing.
    pub fn data(&self) -> &ModelData {
        &self.entries
    }
}
