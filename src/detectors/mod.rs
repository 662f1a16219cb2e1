pub mod highlights;
pub mod phrases;

pub use highlights::*;
pub use phrases::*;

/// Configuration for hot-phrase detection
#[derive(Debug, Clone)]
pub struct PhraseConfig {
    /// Window size in seconds for frequency bucketing
    pub window_seconds: u64,
    /// Language code for stopword resolution
    pub language: String,
    /// Smallest n-gram length to consider
    pub n_min: usize,
    /// Largest n-gram length to consider
    pub n_max: usize,
    /// Minimum global occurrence count for a phrase to qualify
    pub min_count: usize,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self {
            window_seconds: 60,
            language: "en".to_string(),
            n_min: 1,
            n_max: 3,
            min_count: 2,
        }
    }
}

/// Configuration for highlight detection
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    /// Window size in seconds for signal bucketing
    pub window_seconds: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self { window_seconds: 30 }
    }
}
