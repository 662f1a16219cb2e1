use std::collections::HashSet;

/// Lowercase the text and collapse runs of whitespace to single spaces
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split text into lowercase word tokens
///
/// A token is a maximal run of word characters (alphanumeric or underscore)
/// and apostrophes, so contractions like "don't" stay whole. Text with no
/// word characters produces an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in normalize_text(text).chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '\'' {
            current.push(ch);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Generate every contiguous n-gram of length n_min..=n_max as a
/// space-joined string
pub fn generate_ngrams(tokens: &[String], n_min: usize, n_max: usize) -> Vec<String> {
    let mut ngrams = Vec::new();
    for n in n_min..=n_max.min(tokens.len()) {
        if n == 0 {
            continue;
        }
        for gram in tokens.windows(n) {
            ngrams.push(gram.join(" "));
        }
    }
    ngrams
}

/// Keep only n-grams whose constituent tokens are all non-stopwords
pub fn filter_ngrams(ngrams: Vec<String>, stopwords: &HashSet<String>) -> Vec<String> {
    ngrams
        .into_iter()
        .filter(|ng| ng.split(' ').all(|w| !stopwords.contains(w)))
        .collect()
}
