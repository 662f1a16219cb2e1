use serde::{Deserialize, Serialize};

/// A hot phrase and the window in which it scored best
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseHit {
    /// Normalized, space-joined token sequence (1-3 tokens)
    pub phrase: String,
    /// Start of the best-scoring window, in seconds
    pub start: f64,
    /// End of the best-scoring window, in seconds
    pub end: f64,
    /// Frequency-and-novelty score; unbounded
    pub score: f64,
    /// Occurrences in the best window, accumulated across merges
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_round_trip() {
        let hit = PhraseHit {
            phrase: "buy my course".to_string(),
            start: 0.0,
            end: 60.0,
            score: 4.32,
            count: 3,
        };
        let json = serde_json::to_string(&hit).unwrap();
        let back: PhraseHit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hit);
    }
}
