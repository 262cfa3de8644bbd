//! The classification pipeline, front to back.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::error::{ConfigError, PaperError};
use crate::matcher::MatchContext;
use crate::matcher::semantic::SemanticMatcher;
use crate::matcher::syntactic::SyntacticMatcher;
use crate::model::EmbeddingModel;
use crate::ontology::Ontology;
use crate::ontology::climb::{ClimbOptions, climb};
use crate::paper::Paper;
use crate::rank;

/// Labels produced by the three stages for one paper.
///
/// All entries are ontology primary labels. The semantic list keeps its
/// score order; the other two are sorted. The enhanced list is disjoint
/// from the directly matched ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub syntactic: Vec<String>,
    pub semantic: Vec<String>,
    pub enhanced: Vec<String>,
}

/// Ties the ontology, the embedding model and the tunables together.
///
/// Holds only read-only shared state, so one instance can serve any number
/// of threads.
#[derive(Debug)]
pub struct Classifier {
    ontology: Arc<Ontology>,
    model: Arc<EmbeddingModel>,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(
        ontology: Arc<Ontology>,
        model: Arc<EmbeddingModel>,
        config: ClassifierConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ontology,
            model,
            config,
        })
    }

    /// Run both matchers and the climber over one paper.
    pub fn classify(&self, paper: &Paper) -> Result<Prediction, PaperError> {
        paper.validate()?;
        let text = paper.text();
        let context = MatchContext::from_text(&text);

        let syntactic = self.syntactic_pass(&context);
        let semantic = self.semantic_pass(&context);
        let enhanced = self.enhance(&syntactic, &semantic);
        debug!(
            syntactic = syntactic.len(),
            semantic = semantic.len(),
            enhanced = enhanced.len(),
            "classified paper"
        );

        Ok(Prediction {
            syntactic,
            semantic,
            enhanced,
        })
    }

    /// Only the direct label-matching stage.
    pub fn classify_syntactic(&self, paper: &Paper) -> Result<Vec<String>, PaperError> {
        paper.validate()?;
        let context = MatchContext::from_text(&paper.text());
        Ok(self.syntactic_pass(&context))
    }

    /// Only the embedding-backed stage.
    pub fn classify_semantic(&self, paper: &Paper) -> Result<Vec<String>, PaperError> {
        paper.validate()?;
        let context = MatchContext::from_text(&paper.text());
        Ok(self.semantic_pass(&context))
    }

    /// Nearest embedding-space phrases to a free-text phrase.
    pub fn similar_topics(&self, phrase: &str, top_n: usize) -> Vec<(String, f64)> {
        let tokens = crate::text::clean_tokens(phrase);
        let mut queries: Vec<&str> = Vec::new();
        let joined = tokens.join("_");
        if tokens.len() > 1 {
            queries.push(&joined);
        }
        queries.extend(tokens.iter().map(String::as_str));
        self.model
            .most_similar(&queries, self.config.word_similarity, top_n)
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    pub fn model(&self) -> &EmbeddingModel {
        &self.model
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn syntactic_pass(&self, context: &MatchContext) -> Vec<String> {
        let found = SyntacticMatcher::new(&self.ontology, self.config.syntactic_threshold)
            .run(context);
        let mut labels: Vec<String> = found.into_keys().collect();
        labels.sort_unstable();
        labels
    }

    fn semantic_pass(&self, context: &MatchContext) -> Vec<String> {
        let found = SemanticMatcher::new(
            &self.ontology,
            &self.model,
            self.config.semantic_threshold,
            self.config.word_similarity,
        )
        .run(context);
        rank::rank(&found, &self.ontology)
    }

    fn enhance(&self, syntactic: &[String], semantic: &[String]) -> Vec<String> {
        let found: HashSet<String> = syntactic.iter().chain(semantic).cloned().collect();
        climb(&self.ontology, &found, &ClimbOptions::from(&self.config))
            .into_iter()
            .collect()
    }
}
