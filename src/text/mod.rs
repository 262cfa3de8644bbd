//! Text normalization.
//!
//! Turns raw paper text into the two streams the matchers consume:
//! - a clean token stream (lowercased, stopwords and punctuation removed)
//!   for the syntactic matcher;
//! - a tagged token stream (case preserved, punctuation kept as barriers)
//!   for the semantic matcher's phrase grammar.

pub mod phrase;
pub mod stopwords;
pub mod tag;

use std::sync::LazyLock;

use regex::Regex;

use crate::text::stopwords::is_stopword;
use crate::text::tag::TaggedToken;

/// Word tokens keep internal hyphens and parentheses (ontology keys contain
/// both); anything else becomes a single-character punctuation token.
static WORD_TOKENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w()\-]+|[^\w\s]").unwrap());

/// Split text into word and punctuation tokens, preserving case.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_TOKENS
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The clean stream: lowercased word tokens with stopwords and pure
/// punctuation removed.
pub fn clean_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .map(|t| t.to_lowercase())
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .filter(|t| !is_stopword(t))
        .collect()
}

/// The tagged stream: every token with its coarse part-of-speech tag.
pub fn tagged_tokens(text: &str) -> Vec<TaggedToken> {
    tag::tag_tokens(&tokenize(text))
}
