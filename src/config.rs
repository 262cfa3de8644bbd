//! Classifier configuration, persisted as TOML.
//!
//! All knobs the matching pipeline exposes live here: the two similarity
//! thresholds, the embedding word-similarity floor, and the hierarchy
//! climbing policy. File values can be overridden field-by-field from the
//! CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How far the ontology climber generalizes from directly matched concepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClimbMode {
    /// One hop: only the direct broader concepts of the found set.
    FirstBroader,
    /// Iterate hops until no new ancestor is promoted (fixed point).
    AllAncestors,
}

impl std::fmt::Display for ClimbMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClimbMode::FirstBroader => write!(f, "first-broader"),
            ClimbMode::AllAncestors => write!(f, "all-ancestors"),
        }
    }
}

/// Tunable parameters for one classification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum string similarity for a syntactic n-gram match.
    #[serde(default = "default_syntactic_threshold")]
    pub syntactic_threshold: f64,
    /// Minimum embedding-to-topic similarity for a semantic candidate.
    #[serde(default = "default_semantic_threshold")]
    pub semantic_threshold: f64,
    /// Minimum vector-space word similarity for an embedding neighbor.
    #[serde(default = "default_word_similarity")]
    pub word_similarity: f64,
    /// Climbing policy for the enhanced topic set.
    #[serde(default = "default_climb_mode")]
    pub climb_mode: ClimbMode,
    /// Distinct narrower children required before a broader concept is promoted.
    #[serde(default = "default_min_narrower")]
    pub min_narrower: usize,
    /// Optional cap on climbing hops. `None` runs to the fixed point.
    #[serde(default)]
    pub max_hops: Option<usize>,
}

fn default_syntactic_threshold() -> f64 {
    0.94
}
fn default_semantic_threshold() -> f64 {
    0.94
}
fn default_word_similarity() -> f64 {
    0.7
}
fn default_climb_mode() -> ClimbMode {
    ClimbMode::AllAncestors
}
fn default_min_narrower() -> usize {
    1
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            syntactic_threshold: default_syntactic_threshold(),
            semantic_threshold: default_semantic_threshold(),
            word_similarity: default_word_similarity(),
            climb_mode: default_climb_mode(),
            min_narrower: default_min_narrower(),
            max_hops: None,
        }
    }
}

impl ClassifierConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Check value ranges. Thresholds are similarities in (0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("syntactic_threshold", self.syntactic_threshold),
            ("semantic_threshold", self.semantic_threshold),
            ("word_similarity", self.word_similarity),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid {
                    message: format!("{name} must lie in (0, 1], got {value}"),
                });
            }
        }
        if self.min_narrower == 0 {
            return Err(ConfigError::Invalid {
                message: "min_narrower must be at least 1".into(),
            });
        }
        Ok(())
    }
}
