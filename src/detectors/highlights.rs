use tracing::debug;

use crate::models::{Highlight, TimedLine, total_duration};
use crate::nlp::tokenize;

use super::HighlightConfig;

/// Tokens counted as laughter or enthusiasm markers
const LAUGH_MARKERS: &[&str] = &["lol", "lmao", "haha", "rofl", "omg"];

/// Composite scores need to clear both this floor and the 85th percentile
const SCORE_FLOOR: f64 = 0.8;

/// Detect highlight-worthy segments from transcript dynamics
///
/// Four per-window signals feed a weighted composite of z-scores:
/// word rate spikes, exclamation marks, uppercase ratio, and laughter
/// tokens. Windows above an adaptive threshold are returned best-first.
pub fn detect_highlights(lines: &[TimedLine], config: &HighlightConfig) -> Vec<Highlight> {
    if lines.is_empty() {
        return Vec::new();
    }

    let total = total_duration(lines);
    let n_windows = ((total / config.window_seconds as f64).ceil() as usize).max(1);

    let mut word_rates = vec![0.0; n_windows];
    let mut exclaim_rates = vec![0.0; n_windows];
    let mut upper_rates = vec![0.0; n_windows];
    let mut laugh_rates = vec![0.0; n_windows];

    for line in lines {
        let idx = (line.window_index(config.window_seconds) as usize).min(n_windows - 1);
        let tokens = tokenize(&line.text);

        // A zero duration is treated as a one-second line for rate purposes
        let duration = if line.duration == 0.0 {
            1.0
        } else {
            line.duration
        };
        word_rates[idx] += tokens.len() as f64 / duration.max(1e-6);

        exclaim_rates[idx] += line.text.matches('!').count() as f64;

        let upper_chars = line
            .text
            .chars()
            .filter(|c| c.is_alphabetic() && c.is_uppercase())
            .count();
        let alpha_chars = line.text.chars().filter(|c| c.is_alphabetic()).count().max(1);
        upper_rates[idx] += upper_chars as f64 / alpha_chars as f64;

        laugh_rates[idx] += tokens
            .iter()
            .filter(|t| LAUGH_MARKERS.contains(&t.as_str()))
            .count() as f64;
    }

    let word_z = zscores(&word_rates);
    let exclaim_z = zscores(&exclaim_rates);
    let upper_z = zscores(&upper_rates);
    let laugh_z = zscores(&laugh_rates);

    let scores: Vec<f64> = (0..n_windows)
        .map(|i| 0.5 * word_z[i] + 0.2 * exclaim_z[i] + 0.2 * upper_z[i] + 0.1 * laugh_z[i])
        .collect();

    // Adaptive threshold: the 85th-percentile-by-rank score, floored
    let mut sorted_scores = scores.clone();
    sorted_scores.sort_by(f64::total_cmp);
    let percentile_idx = (0.85 * (n_windows - 1) as f64) as usize;
    let threshold = sorted_scores[percentile_idx].max(SCORE_FLOOR);

    debug!(
        windows = n_windows,
        threshold, "scored highlight candidate windows"
    );

    let mut highlights: Vec<Highlight> = Vec::new();
    for (i, &score) in scores.iter().enumerate() {
        if score >= threshold {
            let start = (i as u64 * config.window_seconds) as f64;
            let end = (start + config.window_seconds as f64).min(total);
            let reason = format!(
                "word-rate:{:.2}, exclaim:{:.2}, upper:{:.2}",
                word_z[i], exclaim_z[i], upper_z[i]
            );
            highlights.push(Highlight {
                start,
                end,
                score,
                reason,
            });
        }
    }

    highlights.sort_by(|a, b| b.score.total_cmp(&a.score));
    highlights
}

/// Z-normalize with sample standard deviation
///
/// The divisor is max(1, n-1) and the deviation is floored at a small
/// epsilon so a flat or single-window array yields all zeros instead of a
/// division by zero.
fn zscores(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance =
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n.saturating_sub(1).max(1) as f64;
    let stddev = variance.sqrt().max(1e-6);
    values.iter().map(|x| (x - mean) / stddev).collect()
}
