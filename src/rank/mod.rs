//! Scoring and selection of matched concepts.

pub mod knee;

use std::collections::HashMap;

use crate::matcher::FoundTopics;
use crate::ontology::Ontology;

/// Order accumulated evidence and cut the list where scores fall off.
///
/// A concept's raw score is its match count times the number of distinct
/// phrases that hit it. Records with an exact vector match are then forced
/// up to the maximum raw score, synonyms collapse onto their primary label
/// keeping the best score, and the sorted curve is cut at its knee. Ties
/// sort by label so the output is stable.
pub fn rank(found: &FoundTopics, ontology: &Ontology) -> Vec<String> {
    if found.is_empty() {
        return Vec::new();
    }

    let mut scores: HashMap<&str, usize> = HashMap::new();
    let mut max_score = 0;
    for (topic, record) in found.iter() {
        let score = record.times * record.grams.len();
        if score > max_score {
            max_score = score;
        }
        scores.insert(topic, score);
    }
    for (topic, record) in found.iter() {
        if record.syntactic {
            scores.insert(topic, max_score);
        }
    }

    let mut unique: HashMap<&str, usize> = HashMap::new();
    for (topic, score) in scores {
        let label = ontology.primary_label_wu(topic);
        let slot = unique.entry(label).or_insert(score);
        if score > *slot {
            *slot = score;
        }
    }

    let mut sorted: Vec<(&str, usize)> = unique.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let curve: Vec<f64> = sorted.iter().map(|(_, score)| *score as f64).collect();
    let keep = match knee::find_knee(&curve) {
        Some(keep) => keep,
        None if sorted.len() < 5 => sorted.len(),
        // A plateau of ties at the top keeps the whole plateau.
        None if sorted[0].1 == sorted[4].1 => {
            let top = sorted[0].1;
            sorted.iter().take_while(|(_, score)| *score == top).count()
        }
        None => 5,
    };

    sorted
        .iter()
        .take(keep)
        .map(|(label, _)| ontology.display_label(label))
        .collect()
}
