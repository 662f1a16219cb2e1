use std::path::Path;

use thiserror::Error;

use crate::models::TimedLine;

/// Errors from loading a transcript file
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("unsupported transcript format: {0:?} (expected .json, .srt or .vtt)")]
    UnsupportedFormat(String),
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),
    #[error("invalid transcript JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Load a transcript from a .json, .srt or .vtt file
pub fn load_transcript_file(path: &Path) -> Result<Vec<TimedLine>, TranscriptError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let content = std::fs::read_to_string(path)?;

    match extension.as_str() {
        "json" => parse_transcript_json(&content),
        "srt" => parse_srt(&content),
        "vtt" => parse_vtt(&content),
        _ => Err(TranscriptError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}

/// Parse a JSON array of `{start, duration, text}` objects
pub fn parse_transcript_json(json: &str) -> Result<Vec<TimedLine>, TranscriptError> {
    let lines: Vec<TimedLine> = serde_json::from_str(json)?;
    Ok(lines)
}

/// Parse SubRip (.srt) content
///
/// Blocks are separated by blank lines: an optional index row, a timing row
/// `HH:MM:SS,mmm --> HH:MM:SS,mmm`, then text rows. Blocks without a timing
/// row are skipped.
pub fn parse_srt(content: &str) -> Result<Vec<TimedLine>, TranscriptError> {
    let mut lines = Vec::new();

    for block in split_blocks(content) {
        let rows: Vec<&str> = block.iter().map(|r| r.trim()).collect();
        let Some(timing_row) = rows.iter().position(|r| r.contains("-->")) else {
            continue;
        };

        let (start, end) = parse_timing_row(rows[timing_row])?;
        let text = rows[timing_row + 1..]
            .iter()
            .filter(|r| !r.is_empty() && !r.chars().all(|c| c.is_ascii_digit()))
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        lines.push(TimedLine::new(start, (end - start).max(0.0), text));
    }

    Ok(lines)
}

/// Parse WebVTT (.vtt) content
///
/// Same block structure as SubRip with dot-separated milliseconds; the
/// WEBVTT header and blocks without a timing row are skipped.
pub fn parse_vtt(content: &str) -> Result<Vec<TimedLine>, TranscriptError> {
    let mut lines = Vec::new();

    for block in split_blocks(content) {
        let rows: Vec<&str> = block.iter().map(|r| r.trim()).collect();
        let Some(timing_row) = rows.iter().position(|r| r.contains("-->")) else {
            continue;
        };

        let (start, end) = parse_timing_row(rows[timing_row])?;
        let text = rows[timing_row + 1..]
            .iter()
            .filter(|r| !r.is_empty() && !r.starts_with("WEBVTT"))
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        lines.push(TimedLine::new(start, (end - start).max(0.0), text));
    }

    Ok(lines)
}

/// Split content into blank-line-separated blocks of non-empty rows
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for row in content.lines() {
        if row.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(row);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parse `<start> --> <end>` into a pair of second offsets
fn parse_timing_row(row: &str) -> Result<(f64, f64), TranscriptError> {
    let mut parts = row.split("-->");
    let start_raw = parts.next().unwrap_or("");
    let end_raw = parts.next().unwrap_or("");

    let start = parse_timestamp(start_raw)?;
    // VTT timing rows may carry cue settings after the end timestamp
    let end_field = end_raw.trim().split_whitespace().next().unwrap_or("");
    let end = parse_timestamp(end_field)?;

    Ok((start, end))
}

/// Parse `HH:MM:SS,mmm` / `HH:MM:SS.mmm` (hours optional) into seconds
fn parse_timestamp(raw: &str) -> Result<f64, TranscriptError> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Err(TranscriptError::MalformedTimestamp(raw.to_string()));
    }

    let mut total = 0.0;
    for field in cleaned.split(':') {
        let value: f64 = field
            .parse()
            .map_err(|_| TranscriptError::MalformedTimestamp(raw.to_string()))?;
        total = total * 60.0 + value;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcript_json() {
        let json = r#"[
            {"start": 0.0, "duration": 5.0, "text": "hello there"},
            {"start": 10.0, "text": "missing duration"}
        ]"#;

        let lines = parse_transcript_json(json).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "hello there");
        assert_eq!(lines[1].duration, 0.0);
    }

    #[test]
    fn test_parse_srt() {
        let srt = "1\n00:00:01,000 --> 00:00:04,500\nfirst line\nstill first\n\n2\n00:01:00,000 --> 00:01:02,000\nsecond line\n";

        let lines = parse_srt(srt).unwrap();

        assert_eq!(lines.len(), 2);
        assert!((lines[0].start - 1.0).abs() < 1e-9);
        assert!((lines[0].duration - 3.5).abs() < 1e-9);
        assert_eq!(lines[0].text, "first line still first");
        assert!((lines[1].start - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_vtt() {
        let vtt = "WEBVTT\n\n00:00:00.500 --> 00:00:02.000\nhello\n\n00:00:05.000 --> 00:00:06.500 align:start\nworld again\n";

        let lines = parse_vtt(vtt).unwrap();

        assert_eq!(lines.len(), 2);
        assert!((lines[0].start - 0.5).abs() < 1e-9);
        assert!((lines[0].duration - 1.5).abs() < 1e-9);
        assert_eq!(lines[1].text, "world again");
    }

    #[test]
    fn test_parse_srt_skips_blocks_without_timing() {
        let srt = "NOTE something\n\n1\n00:00:00,000 --> 00:00:01,000\nkept\n";
        let lines = parse_srt(srt).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "kept");
    }

    #[test]
    fn test_malformed_timestamp() {
        let srt = "1\n00:xx:00,000 --> 00:00:01,000\nbad\n";
        let err = parse_srt(srt).unwrap_err();
        assert!(matches!(err, TranscriptError::MalformedTimestamp(_)));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert!((parse_timestamp("00:00:01,500").unwrap() - 1.5).abs() < 1e-9);
        assert!((parse_timestamp("01:02:03.250").unwrap() - 3723.25).abs() < 1e-9);
        assert!((parse_timestamp("02:03.000").unwrap() - 123.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_transcript_file_dispatch() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("t.json");
        std::fs::write(&json_path, r#"[{"start": 1.0, "duration": 2.0, "text": "hi"}]"#).unwrap();
        let lines = load_transcript_file(&json_path).unwrap();
        assert_eq!(lines.len(), 1);

        let bad_path = dir.path().join("t.txt");
        std::fs::write(&bad_path, "whatever").unwrap();
        let err = load_transcript_file(&bad_path).unwrap_err();
        assert!(matches!(err, TranscriptError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_srt("").unwrap().is_empty());
        assert!(parse_vtt("").unwrap().is_empty());
        assert!(parse_transcript_json("[]").unwrap().is_empty());
    }
}
