use serde::{Deserialize, Serialize};

/// A single timed line of transcript text
///
/// Lines are supplied by a collaborator (subtitle parser, caption fetcher)
/// already ordered by `start` ascending. The detectors do not validate the
/// ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedLine {
    /// Start timestamp in seconds
    #[serde(default)]
    pub start: f64,
    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,
    /// Raw line text
    #[serde(default)]
    pub text: String,
}

impl TimedLine {
    pub fn new(start: f64, duration: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            text: text.into(),
        }
    }

    /// End timestamp in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Index of the fixed-length time bucket this line's start falls into
    pub fn window_index(&self, window_seconds: u64) -> u64 {
        (self.start / window_seconds as f64).floor() as u64
    }
}

/// Total duration of an ordered transcript: last line's end, in seconds
pub fn total_duration(lines: &[TimedLine]) -> f64 {
    lines.last().map(|l| l.end()).unwrap_or(0.0)
}
