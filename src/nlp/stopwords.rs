use std::collections::HashSet;

use stop_words::{LANGUAGE, get};

/// Fallback stopword set used when a language has no packaged list
const FALLBACK_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "to", "of", "in", "on", "for", "with", "is", "it",
    "that", "this", "at", "as", "are", "be", "was", "were", "so", "if", "we", "you", "they", "i",
    "he", "she",
];

/// Resolve the stopword set for a language code
///
/// Looks up the packaged list for common ISO-639-1 codes; any unknown code
/// falls back to a small built-in English set. Total function, and the
/// result is never empty.
pub fn stopwords(language: &str) -> HashSet<String> {
    match resolve_language(language) {
        Some(lang) => get(lang).into_iter().map(|w| w.to_string()).collect(),
        None => FALLBACK_STOPWORDS.iter().map(|s| s.to_string()).collect(),
    }
}

fn resolve_language(code: &str) -> Option<LANGUAGE> {
    let lang = match code.to_lowercase().as_str() {
        "en" | "english" => LANGUAGE::English,
        "de" | "german" => LANGUAGE::German,
        "fr" | "french" => LANGUAGE::French,
        "es" | "spanish" => LANGUAGE::Spanish,
        "it" | "italian" => LANGUAGE::Italian,
        "pt" | "portuguese" => LANGUAGE::Portuguese,
        "nl" | "dutch" => LANGUAGE::Dutch,
        "ru" | "russian" => LANGUAGE::Russian,
        "sv" | "swedish" => LANGUAGE::Swedish,
        "no" | "norwegian" => LANGUAGE::Norwegian,
        "da" | "danish" => LANGUAGE::Danish,
        "fi" | "finnish" => LANGUAGE::Finnish,
        "hu" | "hungarian" => LANGUAGE::Hungarian,
        "tr" | "turkish" => LANGUAGE::Turkish,
        "ar" | "arabic" => LANGUAGE::Arabic,
        _ => return None,
    };
    Some(lang)
}
