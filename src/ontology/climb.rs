//! Generalization over the broader-than hierarchy.
//!
//! Starting from the directly matched concepts, walk broader edges and
//! promote a parent once enough distinct children support it. The loop keeps
//! an explicit visited set and frontier: each concept enters the frontier at
//! most once, so the walk terminates even if the hierarchy (incorrectly)
//! contains a cycle. Promoted parents are resolved to primary labels, and
//! the original inputs are subtracted so the result is pure inference.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::config::{ClassifierConfig, ClimbMode};
use crate::ontology::Ontology;

/// Climbing policy.
#[derive(Debug, Clone)]
pub struct ClimbOptions {
    pub mode: ClimbMode,
    /// Distinct narrower children required before a parent is promoted.
    pub min_narrower: usize,
    /// Hop cap. `None` climbs until the fixed point.
    pub max_hops: Option<usize>,
}

impl Default for ClimbOptions {
    fn default() -> Self {
        Self {
            mode: ClimbMode::AllAncestors,
            min_narrower: 1,
            max_hops: None,
        }
    }
}

impl From<&ClassifierConfig> for ClimbOptions {
    fn from(config: &ClassifierConfig) -> Self {
        Self {
            mode: config.climb_mode,
            min_narrower: config.min_narrower,
            max_hops: config.max_hops,
        }
    }
}

/// Infer broader concepts for `found`, disjoint from `found` itself.
///
/// Support accumulates across hops: a parent reached from different children
/// in different hops still counts every distinct child toward promotion.
pub fn climb(
    ontology: &Ontology,
    found: &HashSet<String>,
    options: &ClimbOptions,
) -> BTreeSet<String> {
    let mut support: HashMap<String, HashSet<String>> = HashMap::new();
    let mut visited: HashSet<String> = found.clone();
    let mut promoted: HashSet<String> = HashSet::new();
    let mut frontier: Vec<String> = found.iter().cloned().collect();
    let mut hops = 0;

    while !frontier.is_empty() {
        if options.max_hops.is_some_and(|cap| hops >= cap) {
            break;
        }

        for narrower in &frontier {
            for broader in ontology.broaders_of(narrower) {
                support
                    .entry(broader.to_string())
                    .or_default()
                    .insert(narrower.clone());
            }
        }

        let newly: Vec<String> = support
            .iter()
            .filter(|(broader, children)| {
                children.len() >= options.min_narrower && !visited.contains(broader.as_str())
            })
            .map(|(broader, _)| broader.clone())
            .collect();

        for broader in &newly {
            visited.insert(broader.clone());
            promoted.insert(broader.clone());
        }

        hops += 1;
        frontier = match options.mode {
            ClimbMode::FirstBroader => Vec::new(),
            ClimbMode::AllAncestors => newly,
        };
    }

    let exclude: HashSet<String> = found
        .iter()
        .flat_map(|key| [key.clone(), ontology.primary_label(key).to_string()])
        .collect();

    promoted
        .iter()
        .map(|key| ontology.primary_label(key).to_string())
        .filter(|label| !exclude.contains(label))
        .collect()
}
