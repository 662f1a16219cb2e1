use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{PhraseHit, TimedLine};
use crate::nlp::{filter_ngrams, generate_ngrams, stopwords, tokenize};

use super::PhraseConfig;

/// Two phrases at or above this token-set similarity are merged
const MERGE_SIMILARITY: f64 = 90.0;

/// Detect hot phrases with cross-window novelty
///
/// Scoring combines:
/// 1. frequency within a time window
/// 2. novelty against the phrase's own history in earlier windows
/// 3. a small bonus for longer n-grams
///
/// Returns the full deduplicated set ranked best-first; callers truncate to
/// a top-K if they want one.
pub fn detect_hot_phrases(lines: &[TimedLine], config: &PhraseConfig) -> Vec<PhraseHit> {
    let stop = stopwords(&config.language);

    // Accumulate per-window counts, global counts and first-seen timestamps
    let mut window_counts: HashMap<u64, HashMap<String, usize>> = HashMap::new();
    let mut global_counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: HashMap<String, f64> = HashMap::new();

    for line in lines {
        let tokens = tokenize(&line.text);
        if tokens.is_empty() {
            continue;
        }
        let ngrams = filter_ngrams(generate_ngrams(&tokens, config.n_min, config.n_max), &stop);
        let widx = line.window_index(config.window_seconds);
        let counts = window_counts.entry(widx).or_default();
        for ngram in ngrams {
            *counts.entry(ngram.clone()).or_insert(0) += 1;
            *global_counts.entry(ngram.clone()).or_insert(0) += 1;
            first_seen.entry(ngram).or_insert(line.start);
        }
    }

    // Windows in ascending order so score ties resolve to the earliest one
    let mut window_indices: Vec<u64> = window_counts.keys().copied().collect();
    window_indices.sort_unstable();

    // Score every (window, phrase) pair and keep the best window per phrase
    let mut best_by_phrase: HashMap<String, PhraseHit> = HashMap::new();
    for (position, &widx) in window_indices.iter().enumerate() {
        // Windows before this one that are present in the data
        let prior_windows = &window_indices[..position];

        for (phrase, &count) in &window_counts[&widx] {
            if global_counts[phrase] < config.min_count {
                continue;
            }

            // Mean of this phrase's counts over the earlier windows; 0.0
            // when there are none
            let historical_mean = if prior_windows.is_empty() {
                0.0
            } else {
                let total: usize = prior_windows
                    .iter()
                    .map(|w| window_counts[w].get(phrase).copied().unwrap_or(0))
                    .sum();
                total as f64 / prior_windows.len() as f64
            };

            let novelty = count as f64 - historical_mean;
            let token_count = phrase.split(' ').count();
            let length_bonus = 1.0 + 0.2 * (token_count as f64 - 1.0);
            let score = (count as f64 + novelty * 0.8) * length_bonus;

            let start = (widx * config.window_seconds) as f64;
            let hit = PhraseHit {
                phrase: phrase.clone(),
                start,
                end: start + config.window_seconds as f64,
                score,
                count,
            };

            // Strict comparison so the earliest window wins score ties
            let replace = best_by_phrase
                .get(phrase)
                .is_none_or(|current| score > current.score);
            if replace {
                best_by_phrase.insert(phrase.clone(), hit);
            }
        }
    }

    // Rank by score, then by earlier first appearance; the phrase itself is
    // the last tiebreak so repeat runs produce identical output
    let mut ranked: Vec<PhraseHit> = best_by_phrase.into_values().collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| {
                let a_seen = first_seen.get(&a.phrase).copied().unwrap_or(f64::INFINITY);
                let b_seen = first_seen.get(&b.phrase).copied().unwrap_or(f64::INFINITY);
                a_seen.total_cmp(&b_seen)
            })
            .then_with(|| a.phrase.cmp(&b.phrase))
    });

    debug!(
        phrases = ranked.len(),
        windows = window_indices.len(),
        "scored candidate phrases"
    );

    merge_near_duplicates(ranked)
}

/// Collapse near-duplicate phrases, first match wins
///
/// Candidates arrive ranked; each is compared against the representatives
/// accepted so far and folds into the first one within the similarity
/// threshold. The scan order matters: near-duplicate chains (A~B, B~C,
/// A!~C) group differently under any other order.
fn merge_near_duplicates(ranked: Vec<PhraseHit>) -> Vec<PhraseHit> {
    let mut merged: Vec<PhraseHit> = Vec::new();

    for hit in ranked {
        let mut merged_into = false;
        for rep in merged.iter_mut() {
            if token_set_similarity(&hit.phrase, &rep.phrase) >= MERGE_SIMILARITY {
                // Keep the higher-scoring phrase's identity and window;
                // counts accumulate
                let combined = if hit.score > rep.score {
                    PhraseHit {
                        phrase: hit.phrase.clone(),
                        start: hit.start,
                        end: hit.end,
                        score: hit.score,
                        count: hit.count + rep.count,
                    }
                } else {
                    PhraseHit {
                        phrase: rep.phrase.clone(),
                        start: rep.start,
                        end: rep.end,
                        score: rep.score,
                        count: rep.count + hit.count,
                    }
                };
                *rep = combined;
                merged_into = true;
                break;
            }
        }
        if !merged_into {
            merged.push(hit);
        }
    }

    merged
}

/// Order- and duplicate-insensitive token overlap on a 0-100 scale
///
/// Ratio of shared distinct tokens to distinct tokens in the union, so
/// "great stuff" and "stuff great" score 100 while "buy my" and
/// "my course" score 33.
fn token_set_similarity(a: &str, b: &str) -> f64 {
    let set_a: HashSet<&str> = a.split(' ').collect();
    let set_b: HashSet<&str> = b.split(' ').collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 100.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    100.0 * intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    // Uses an unmapped language code so the small built-in fallback
    // stopword set applies and none of the sample words are filtered.
    fn config(window_seconds: u64, n_max: usize) -> PhraseConfig {
        PhraseConfig {
            window_seconds,
            language: "zz".to_string(),
            n_min: 1,
            n_max,
            min_count: 2,
        }
    }

    fn sales_pitch_lines() -> Vec<TimedLine> {
        vec![
            TimedLine::new(0.0, 5.0, "buy my course now"),
            TimedLine::new(10.0, 5.0, "buy my course"),
            TimedLine::new(70.0, 5.0, "buy my course today"),
        ]
    }

    #[test]
    fn test_empty_transcript() {
        let hits = detect_hot_phrases(&[], &PhraseConfig::default());
        assert!(hits.is_empty());
    }

    #[test]
    fn test_lines_without_word_characters_are_skipped() {
        let lines = vec![
            TimedLine::new(0.0, 1.0, "!!!"),
            TimedLine::new(1.0, 1.0, "..."),
        ];
        assert!(detect_hot_phrases(&lines, &config(60, 2)).is_empty());
    }

    #[test]
    fn test_best_window_prefers_concentration_over_history() {
        // Windows 0 and 1 both contain "my course"; window 1 has count 1
        // against a window-0 historical mean of 2, so its novelty is
        // negative and window 0 must win.
        let hits = detect_hot_phrases(&sales_pitch_lines(), &config(60, 2));

        let my_course = hits
            .iter()
            .find(|h| h.phrase == "my course")
            .expect("'my course' should qualify");
        assert_eq!(my_course.start, 0.0);
        assert_eq!(my_course.end, 60.0);
        assert_eq!(my_course.count, 2);
        // Window 0: (2 + 0.8*2) * 1.2
        assert!((my_course.score - 4.32).abs() < 1e-9);
    }

    #[test]
    fn test_min_count_gate() {
        // "now" and "today" appear once each and must not be emitted
        let hits = detect_hot_phrases(&sales_pitch_lines(), &config(60, 2));
        assert!(hits.iter().all(|h| h.phrase != "now"));
        assert!(hits.iter().all(|h| h.phrase != "today"));
        assert!(hits.iter().all(|h| h.count >= 2));
    }

    #[test]
    fn test_two_grams_outrank_one_grams_on_equal_counts() {
        let hits = detect_hot_phrases(&sales_pitch_lines(), &config(60, 2));
        // 2-grams carry the length bonus: 4.32 vs 3.6
        assert_eq!(hits[0].phrase, "buy my");
        assert_eq!(hits[1].phrase, "my course");
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let lines = sales_pitch_lines();
        let cfg = config(60, 2);
        let first = detect_hot_phrases(&lines, &cfg);
        let second = detect_hot_phrases(&lines, &cfg);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reordered_token_variants_merge() {
        let lines = vec![
            TimedLine::new(0.0, 5.0, "great stuff"),
            TimedLine::new(5.0, 5.0, "great stuff"),
            TimedLine::new(10.0, 5.0, "stuff great"),
            TimedLine::new(15.0, 5.0, "stuff great"),
        ];
        let cfg = PhraseConfig {
            n_min: 2,
            n_max: 2,
            ..config(60, 2)
        };
        let hits = detect_hot_phrases(&lines, &cfg);

        // Same token set, similarity 100: exactly one representative, with
        // the earlier-seen phrase winning the score tie and counts summed
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].phrase, "great stuff");
        assert_eq!(hits[0].count, 4);
    }

    #[test]
    fn test_dissimilar_phrases_stay_separate() {
        let lines = vec![
            TimedLine::new(0.0, 5.0, "alpha beta"),
            TimedLine::new(5.0, 5.0, "alpha beta"),
            TimedLine::new(10.0, 5.0, "alpha gamma"),
            TimedLine::new(15.0, 5.0, "alpha gamma"),
        ];
        let cfg = PhraseConfig {
            n_min: 2,
            n_max: 2,
            ..config(60, 2)
        };
        let hits = detect_hot_phrases(&lines, &cfg);

        // One shared token out of three distinct: similarity 33, no merge
        let phrases: Vec<&str> = hits.iter().map(|h| h.phrase.as_str()).collect();
        assert!(phrases.contains(&"alpha beta"));
        assert!(phrases.contains(&"alpha gamma"));
    }

    #[test]
    fn test_stopword_filtering_with_packaged_list() {
        // With the packaged English list, "my" is a stopword, so every
        // n-gram containing it disappears
        let cfg = PhraseConfig {
            language: "en".to_string(),
            n_min: 1,
            n_max: 2,
            ..PhraseConfig::default()
        };
        let hits = detect_hot_phrases(&sales_pitch_lines(), &cfg);
        assert!(hits.iter().all(|h| !h.phrase.contains("my")));
        assert!(hits.iter().any(|h| h.phrase == "buy"));
        assert!(hits.iter().any(|h| h.phrase == "course"));
    }

    #[test]
    fn test_token_set_similarity() {
        assert_eq!(token_set_similarity("great stuff", "stuff great"), 100.0);
        assert_eq!(token_set_similarity("go go go", "go"), 100.0);
        assert!((token_set_similarity("buy my", "my course") - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(token_set_similarity("alpha", "beta"), 0.0);
    }
}
