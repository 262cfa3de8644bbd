//! Topic matchers.
//!
//! Two passes over a paper share one [`MatchContext`]: the syntactic pass
//! compares token n-grams against ontology labels directly, the semantic
//! pass goes through the embedding model first. Both feed evidence into
//! accumulators that the ranking stage consumes.

pub mod semantic;
pub mod similarity;
pub mod syntactic;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::text;

// --- Shared per-paper context ---

/// Everything the matchers need from one paper, computed once.
#[derive(Debug, Clone)]
pub struct MatchContext {
    tokens: Vec<String>,
    chunks: Vec<String>,
}

impl MatchContext {
    /// Tokenize and chunk one unit of text.
    pub fn from_text(text: &str) -> Self {
        let tokens = text::clean_tokens(text);
        let tagged = text::tagged_tokens(text);
        let chunks = text::phrase::extract_chunks(&tagged);
        Self { tokens, chunks }
    }

    /// Lowercased tokens with stopwords and punctuation removed.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Normalized noun phrases.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }
}

// --- Semantic evidence accumulation ---

/// Accumulated evidence that one ontology concept occurs in a paper.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundTopic {
    /// Distinct text grams that hit this concept, with hit counts.
    pub grams: HashMap<String, usize>,
    /// Embedding-space word behind the strongest hit so far.
    pub embedding_matched: String,
    /// Lexical similarity of that strongest hit.
    pub embedding_similarity: f64,
    /// Vector similarity of every hit, in arrival order.
    pub gram_similarity: Vec<f64>,
    /// Total number of hits.
    pub times: usize,
    /// Whether any hit was an exact embedding-space match.
    pub syntactic: bool,
}

/// Evidence records keyed by underscore-joined concept.
#[derive(Debug, Clone, Default)]
pub struct FoundTopics {
    entries: HashMap<String, FoundTopic>,
}

impl FoundTopics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hit: insert a fresh record or merge into the existing one.
    ///
    /// The embedding fields track the maximum `sim_t` seen; ties keep the
    /// earlier word. An exact vector match (`sim_w == 1`) marks the concept
    /// syntactic for good.
    pub fn record(&mut self, topic: &str, gram: &str, wet: &str, sim_t: f64, sim_w: f64) {
        let found = match self.entries.entry(topic.to_string()) {
            Entry::Occupied(slot) => {
                let found = slot.into_mut();
                found.times += 1;
                found.gram_similarity.push(sim_w);
                *found.grams.entry(gram.to_string()).or_insert(0) += 1;
                if sim_t > found.embedding_similarity {
                    found.embedding_matched = wet.to_string();
                    found.embedding_similarity = sim_t;
                }
                found
            }
            Entry::Vacant(slot) => slot.insert(FoundTopic {
                grams: HashMap::from([(gram.to_string(), 1)]),
                embedding_matched: wet.to_string(),
                embedding_similarity: sim_t,
                gram_similarity: vec![sim_w],
                times: 1,
                syntactic: false,
            }),
        };
        if sim_w == 1.0 {
            found.syntactic = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, topic: &str) -> Option<&FoundTopic> {
        self.entries.get(topic)
    }

    /// Underscore-joined concepts with any evidence.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FoundTopic)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
