//! Noun-phrase chunking and everygram expansion.
//!
//! The chunk grammar is fixed: zero or more adjectives followed by one or
//! more nouns. Everything outside a chunk is discarded. Chunks are then
//! normalized (noise characters stripped, lowercased) and expanded into all
//! contiguous sub-spans of one to three words, the candidate unit the
//! embedding model is queried with.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::tag::{PosTag, TaggedToken};

/// Characters treated as noise inside a chunk: list markers, quotes,
/// trademark signs and similar typography that leaks out of PDF abstracts.
static NOISE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[=,…'’+\-–“”"/‘\[\]®™%]"#).unwrap());

/// Longest span of adjectives-then-nouns starting at each position, leftmost
/// first, non-overlapping. Matches the chunking behavior of a regexp grammar
/// `ADJ* NOUN+` applied to the tag sequence.
pub fn extract_chunks(tokens: &[TaggedToken]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < tokens.len() {
        let mut j = start;
        while j < tokens.len() && tokens[j].tag == PosTag::Adjective {
            j += 1;
        }
        let mut k = j;
        while k < tokens.len() && tokens[k].tag == PosTag::Noun {
            k += 1;
        }
        if k > j {
            if let Some(chunk) = normalize_chunk(&tokens[start..k]) {
                chunks.push(chunk);
            }
            start = k;
        } else {
            start += 1;
        }
    }
    chunks
}

/// Normalize one chunk's surface text: noise characters become spaces, a
/// single leading or trailing dot per word is stripped, dot runs collapse,
/// everything is lowercased. Returns `None` when nothing survives.
pub fn normalize_chunk(tokens: &[TaggedToken]) -> Option<String> {
    let mut words = Vec::new();
    for token in tokens {
        let cleaned = NOISE_CHARS.replace_all(&token.text, " ").to_lowercase();
        for piece in cleaned.split_whitespace() {
            let piece = piece.strip_prefix('.').unwrap_or(piece);
            let piece = piece.strip_suffix('.').unwrap_or(piece);
            let piece = collapse_dots(piece);
            if !piece.is_empty() {
                words.push(piece);
            }
        }
    }
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn collapse_dots(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_dot = false;
    for c in word.chars() {
        if c == '.' {
            if !prev_dot {
                out.push(c);
            }
            prev_dot = true;
        } else {
            out.push(c);
            prev_dot = false;
        }
    }
    out
}

/// All contiguous sub-spans of `words` with length in `min_n..=max_n`,
/// ordered by start position, then by length.
pub fn everygrams<'a>(words: &'a [&'a str], min_n: usize, max_n: usize) -> Vec<&'a [&'a str]> {
    let mut grams = Vec::new();
    for i in 0..words.len() {
        for n in min_n..=max_n {
            if i + n <= words.len() {
                grams.push(&words[i..i + n]);
            }
        }
    }
    grams
}
