pub mod detectors;
pub mod io;
pub mod models;
pub mod nlp;

pub use detectors::{HighlightConfig, PhraseConfig, detect_highlights, detect_hot_phrases};
pub use io::{
    AnalysisMetadata, AnalysisReport, TranscriptError, load_transcript_file, parse_srt,
    parse_transcript_json, parse_vtt, write_highlights_csv, write_phrases_csv,
};
pub use models::{Highlight, PhraseHit, TimedLine, total_duration};
pub use nlp::{stopwords, tokenize};
