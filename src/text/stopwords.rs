//! Embedded English stopword list.
//!
//! The standard English list used by NLP toolkits, embedded so the classifier
//! has no runtime download. Contraction fragments ("re", "ve", "ll", ...)
//! are included because the word tokenizer splits on apostrophes.

use std::collections::HashSet;
use std::sync::LazyLock;

#[rustfmt::skip]
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "you're", "you've", "you'll", "you'd", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "she's", "her",
    "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were",
    "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off",
    "over", "under", "again", "further", "then", "once", "here", "there",
    "when", "where", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "don't", "should", "should've", "now", "d", "ll", "m",
    "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
    "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won",
    "won't", "wouldn", "wouldn't",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOPWORDS.iter().copied().collect());

/// True when `word` (already lowercased) is an English stopword.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_function_words_are_stopwords() {
        for word in ["the", "over", "is", "of", "and", "with"] {
            assert!(is_stopword(word), "{word} should be a stopword");
        }
    }

    #[test]
    fn content_words_are_not_stopwords() {
        for word in ["quick", "brown", "fox", "jumped", "lazy", "neural", "network"] {
            assert!(!is_stopword(word), "{word} should not be a stopword");
        }
    }

    #[test]
    fn list_has_no_duplicates() {
        let set: HashSet<&str> = ENGLISH_STOPWORDS.iter().copied().collect();
        assert_eq!(set.len(), ENGLISH_STOPWORDS.len());
    }
}
