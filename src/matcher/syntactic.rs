//! Direct n-gram matching against ontology labels.

use std::collections::{HashMap, HashSet};

use super::{MatchContext, similarity};
use crate::ontology::{Ontology, stem_of};

/// One accepted phrase match.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntacticMatch {
    /// The space-joined token n-gram from the paper.
    pub matched: String,
    /// Its edit similarity to the ontology concept.
    pub similarity: f64,
}

/// Matches token n-grams against concept labels by edit similarity.
pub struct SyntacticMatcher<'a> {
    ontology: &'a Ontology,
    threshold: f64,
}

impl<'a> SyntacticMatcher<'a> {
    pub fn new(ontology: &'a Ontology, threshold: f64) -> Self {
        Self {
            ontology,
            threshold,
        }
    }

    /// Scan trigrams, then bigrams, then unigrams over the context tokens.
    ///
    /// A start index that produced a match is never rescanned at a shorter
    /// window, so longer phrases win their own position. Candidate concepts
    /// come from the stem block sharing the gram's first four characters,
    /// and accepted concepts are recorded under their primary label.
    pub fn run(&self, context: &MatchContext) -> HashMap<String, Vec<SyntacticMatch>> {
        let tokens = context.tokens();
        let mut found: HashMap<String, Vec<SyntacticMatch>> = HashMap::new();
        let mut matched_starts: HashSet<usize> = HashSet::new();

        for n in (1..=3).rev() {
            if tokens.len() < n {
                continue;
            }
            for start in 0..=tokens.len() - n {
                if matched_starts.contains(&start) {
                    continue;
                }
                let gram = tokens[start..start + n].join(" ");
                for concept in self.ontology.stem_block(&stem_of(&gram)) {
                    let score = similarity::ratio(concept, &gram);
                    if score >= self.threshold {
                        let label = self.ontology.primary_label(concept).to_string();
                        found.entry(label).or_default().push(SyntacticMatch {
                            matched: gram.clone(),
                            similarity: score,
                        });
                        matched_starts.insert(start);
                    }
                }
            }
        }
        found
    }
}
