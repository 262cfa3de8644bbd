//! Embedding-backed matching of noun phrases to ontology concepts.

use std::collections::{HashMap, HashSet};

use super::{FoundTopics, MatchContext};
use crate::model::{EmbeddingEntry, EmbeddingModel};
use crate::ontology::Ontology;
use crate::text::phrase::everygrams;

/// Matches phrase spans through the embedding model.
pub struct SemanticMatcher<'a> {
    ontology: &'a Ontology,
    model: &'a EmbeddingModel,
    /// Minimum `sim_t` for a candidate to count.
    threshold: f64,
    /// Minimum `sim_w` for a candidate to count.
    word_floor: f64,
}

impl<'a> SemanticMatcher<'a> {
    pub fn new(
        ontology: &'a Ontology,
        model: &'a EmbeddingModel,
        threshold: f64,
        word_floor: f64,
    ) -> Self {
        Self {
            ontology,
            model,
            threshold,
            word_floor,
        }
    }

    /// Scan every 1..=3 word span of every noun phrase.
    ///
    /// A span whose underscore-joined form is a model key uses that key's
    /// candidates verbatim; otherwise the span falls back to the merge
    /// lookup. Accepted candidates accumulate into per-concept records.
    pub fn run(&self, context: &MatchContext) -> FoundTopics {
        let mut found = FoundTopics::new();
        for chunk in context.chunks() {
            let words: Vec<&str> = chunk.split_whitespace().collect();
            for span in everygrams(&words, 1, 3) {
                let key = span.join("_");
                if self.model.contains(&key) {
                    for entry in self.model.lookup(&key) {
                        self.consider(&mut found, &key, entry);
                    }
                } else {
                    for entry in self.merge_candidates(span) {
                        self.consider(&mut found, &key, entry);
                    }
                }
            }
        }
        found
    }

    /// Merge lookup for a span with no verbatim model key.
    ///
    /// Each token of the span proposes candidates independently; a concept
    /// survives only when every token proposed it, and the surviving record
    /// is the one from the latest proposing token.
    fn merge_candidates(&self, span: &[&str]) -> Vec<&'a EmbeddingEntry> {
        if span.len() < 2 {
            return Vec::new();
        }
        let mut latest: HashMap<&str, &'a EmbeddingEntry> = HashMap::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in span {
            for entry in self.model.lookup(token) {
                latest.insert(entry.topic.as_str(), entry);
                *counts.entry(entry.topic.as_str()).or_insert(0) += 1;
            }
        }

        let mut merged = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for token in span {
            for entry in self.model.lookup(token) {
                let topic = entry.topic.as_str();
                if counts[topic] >= span.len() && seen.insert(topic) {
                    merged.push(latest[topic]);
                }
            }
        }
        merged
    }

    fn consider(&self, found: &mut FoundTopics, gram: &str, entry: &EmbeddingEntry) {
        if entry.sim_w >= self.word_floor
            && entry.sim_t >= self.threshold
            && self.ontology.contains_wu(&entry.topic)
        {
            found.record(&entry.topic, gram, &entry.wet, entry.sim_t, entry.sim_w);
        }
    }
}
