//! Heuristic part-of-speech tagging.
//!
//! A lightweight rule-based tagger, not a statistical model. The phrase
//! grammar downstream only needs to distinguish adjectives and nouns from
//! everything that breaks a noun phrase, so the tag set is coarse and the
//! rules favor recall on noun phrases: an unrecognized content word is
//! assumed to be a noun, which is the common case in scholarly text.

use crate::text::stopwords::is_stopword;

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Adjective,
    Noun,
    Verb,
    Stopword,
    Number,
    Punct,
}

/// A surface token with its tag. Case is preserved; chunk normalization
/// lowercases later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub tag: PosTag,
}

/// Common adjectives, including participial forms that act as modifiers in
/// technical writing ("distributed systems", "supervised learning").
#[rustfmt::skip]
const ADJECTIVE_WORDS: &[&str] = &[
    // Colors and everyday qualities
    "red", "blue", "green", "yellow", "black", "white", "gray", "grey",
    "brown", "pink", "big", "small", "large", "tiny", "huge", "high", "low",
    "long", "wide", "narrow", "fast", "slow", "quick", "rapid", "lazy",
    "hot", "cold", "new", "old", "good", "bad", "early", "late", "full",
    "empty", "deep", "shallow", "hard", "soft", "simple", "complex",
    // Participial modifiers common in technical prose
    "distributed", "supervised", "unsupervised", "automated", "embedded",
    "integrated", "structured", "unstructured", "advanced", "unified",
    "annotated", "fixed", "extended", "combined", "improved", "enhanced",
    "weighted", "directed", "undirected", "labeled", "unlabeled",
];

/// Verbs frequent enough to matter; auxiliaries are already stopwords.
#[rustfmt::skip]
const VERB_WORDS: &[&str] = &[
    "go", "goes", "went", "gone", "make", "makes", "took", "take", "takes",
    "give", "gives", "gave", "show", "shows", "present", "presents",
    "propose", "proposes", "describe", "describes", "introduce",
    "introduces", "use", "uses", "apply", "applies", "demonstrate",
    "demonstrates", "evaluate", "evaluates", "compare", "compares",
    "outperform", "outperforms", "achieve", "achieves", "obtain", "obtains",
    "consider", "considers", "become", "becomes", "remain", "remains",
    "jump", "jumps", "run", "runs", "ran", "write", "writes", "wrote",
];

fn is_adjective(word: &str) -> bool {
    if ADJECTIVE_WORDS.contains(&word) {
        return true;
    }
    word.ends_with("al")
        || word.ends_with("ive")
        || word.ends_with("ous")
        || word.ends_with("ful")
        || word.ends_with("less")
        || word.ends_with("able")
        || word.ends_with("ible")
        || word.ends_with("ary")
        || (word.ends_with("ic") && !word.ends_with("stic") && word.len() > 4)
}

fn is_verb(word: &str) -> bool {
    if VERB_WORDS.contains(&word) {
        return true;
    }
    // Past-tense rule. "eed" words (speed, feed) and short words (bed, red)
    // are overwhelmingly not verbs.
    word.ends_with("ed") && !word.ends_with("eed") && word.len() >= 4
}

/// Classify one token. Order matters: stopwords swallow auxiliaries and
/// determiners before the content-word rules run.
pub fn classify(token: &str) -> PosTag {
    let lower = token.to_lowercase();

    if lower.chars().all(|c| !c.is_alphanumeric()) {
        return PosTag::Punct;
    }
    if is_stopword(&lower) {
        return PosTag::Stopword;
    }
    if lower.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        return PosTag::Number;
    }
    if is_adjective(&lower) {
        return PosTag::Adjective;
    }
    if is_verb(&lower) {
        return PosTag::Verb;
    }
    PosTag::Noun
}

/// Tag a token sequence produced by the word-and-punctuation tokenizer.
pub fn tag_tokens<T: AsRef<str>>(tokens: &[T]) -> Vec<TaggedToken> {
    tokens
        .iter()
        .map(|t| TaggedToken {
            text: t.as_ref().to_string(),
            tag: classify(t.as_ref()),
        })
        .collect()
}
