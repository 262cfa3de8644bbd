//! Paper input records.
//!
//! A paper carries up to three free-text fields. Keywords arrive either as a
//! comma-joined string or as a list and are normalized to one canonical
//! comma-joined form before matching. The assembled text is what the matchers
//! see; a paper with no text at all is rejected before any matching begins.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::PaperError;

/// Keywords as they appear in the wild: one joined string or a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    Joined(String),
    List(Vec<String>),
}

/// One scholarly paper to classify. All fields optional, at least one required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paper {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Keywords>,
}

impl Paper {
    /// Build a paper from plain optional strings, keywords comma-joined.
    pub fn new(
        title: Option<String>,
        abstract_text: Option<String>,
        keywords: Option<String>,
    ) -> Self {
        Self {
            title,
            abstract_text,
            keywords: keywords.map(Keywords::Joined),
        }
    }

    /// Keywords normalized to lowercase, trimmed, comma-joined. `None` when
    /// absent or empty after trimming.
    pub fn normalized_keywords(&self) -> Option<String> {
        let raw: Vec<String> = match &self.keywords {
            Some(Keywords::Joined(s)) => s.split(',').map(str::to_string).collect(),
            Some(Keywords::List(items)) => items.clone(),
            None => return None,
        };
        let cleaned: Vec<String> = raw
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned.join(", "))
        }
    }

    /// The text the matchers see: non-empty fields joined with `". "`,
    /// NFKC-normalized.
    pub fn text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(title) = &self.title {
            let trimmed = title.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
        if let Some(abstract_text) = &self.abstract_text {
            let trimmed = abstract_text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
        if let Some(keywords) = self.normalized_keywords() {
            parts.push(keywords);
        }
        parts.join(". ").nfkc().collect()
    }

    /// Fail fast when there is nothing to classify.
    pub fn validate(&self) -> Result<(), PaperError> {
        if self.text().is_empty() {
            Err(PaperError::EmptyText)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_fields_with_sentence_breaks() {
        let paper = Paper::new(
            Some("Deep learning for graphs".into()),
            Some("We study message passing.".into()),
            Some("GNN, Graph Theory".into()),
        );
        assert_eq!(
            paper.text(),
            "Deep learning for graphs. We study message passing.. gnn, graph theory"
        );
    }

    #[test]
    fn keywords_normalize_from_string_and_list() {
        let joined = Paper::new(None, None, Some(" Machine Learning ,AI,  ".into()));
        assert_eq!(
            joined.normalized_keywords().as_deref(),
            Some("machine learning, ai")
        );

        let listed = Paper {
            keywords: Some(Keywords::List(vec!["  NLP ".into(), "Parsing".into()])),
            ..Default::default()
        };
        assert_eq!(listed.normalized_keywords().as_deref(), Some("nlp, parsing"));
    }

    #[test]
    fn empty_paper_fails_validation() {
        let paper = Paper::default();
        assert!(matches!(paper.validate(), Err(PaperError::EmptyText)));

        let blank = Paper::new(Some("   ".into()), None, Some(" , ,".into()));
        assert!(matches!(blank.validate(), Err(PaperError::EmptyText)));

        let ok = Paper::new(Some("Sorting networks".into()), None, None);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn deserializes_both_keyword_shapes() {
        let from_string: Paper =
            serde_json::from_str(r#"{"title": "t", "keywords": "a, b"}"#).unwrap();
        assert_eq!(from_string.normalized_keywords().as_deref(), Some("a, b"));

        let from_list: Paper =
            serde_json::from_str(r#"{"title": "t", "keywords": ["A", "B"]}"#).unwrap();
        assert_eq!(from_list.normalized_keywords().as_deref(), Some("a, b"));
    }

    #[test]
    fn abstract_field_uses_json_name() {
        let paper: Paper = serde_json::from_str(r#"{"abstract": "body text"}"#).unwrap();
        assert_eq!(paper.abstract_text.as_deref(), Some("body text"));
        assert!(paper.validate().is_ok());
    }

    #[test]
    fn text_applies_compatibility_normalization() {
        // The ligature ﬁ decomposes to "fi" under NFKC.
        let paper = Paper::new(Some("eﬃcient ﬁltering".into()), None, None);
        assert_eq!(paper.text(), "efficient filtering");
    }
}
