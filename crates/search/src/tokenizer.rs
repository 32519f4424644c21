//! Bag-of-words tokenizer
//!
//! A token is a maximal run of word characters (letters, digits, underscore),
//! lowercased. Everything else, punctuation and line breaks included, acts as
//! a separator. No stemming, no stopwords.

use std::collections::HashSet;

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize text into lowercase words, in order of appearance.
///
/// Duplicates are kept.
///
/// # Example
///
/// ```
/// use sift_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Hello, World! hello");
/// assert_eq!(tokens, vec!["hello", "world", "hello"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Tokenize and deduplicate, keeping the first occurrence of each token.
///
/// This is the enumeration order used for query tokens.
///
/// # Example
///
/// ```
/// use sift_search::tokenizer::tokenize_unique;
///
/// let tokens = tokenize_unique("sat cat SAT the");
/// assert_eq!(tokens, vec!["sat", "cat", "the"]);
/// ```
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// The set of distinct tokens in a text.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}
