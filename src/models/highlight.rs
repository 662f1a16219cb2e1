use serde::{Deserialize, Serialize};

/// A time segment with anomalous conversational energy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Window start in seconds
    pub start: f64,
    /// Window end in seconds, clipped to the transcript duration
    pub end: f64,
    /// Composite z-score across the energy signals
    pub score: f64,
    /// Human-readable summary of the contributing component z-scores
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_round_trip() {
        let highlight = Highlight {
            start: 30.0,
            end: 60.0,
            score: 1.99,
            reason: "word-rate:2.85, exclaim:2.85, upper:0.00".to_string(),
        };
        let json = serde_json::to_string(&highlight).unwrap();
        let back: Highlight = serde_json::from_str(&json).unwrap();
        assert_eq!(back, highlight);
    }
}
