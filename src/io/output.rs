use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{Highlight, PhraseHit};

/// Combined machine-readable analysis report
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Top phrases, best-first
    pub phrases: Vec<PhraseHit>,
    /// Highlights, best-first
    pub highlights: Vec<Highlight>,
    /// Metadata about the analyzed transcript
    pub metadata: AnalysisMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    pub total_lines: usize,
    pub duration_seconds: f64,
    pub phrases_found: usize,
    pub highlights_found: usize,
}

impl AnalysisReport {
    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Write phrases as CSV with the columns phrase,start,end,score,count
pub fn write_phrases_csv(path: &Path, phrases: &[PhraseHit]) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;

    writeln!(file, "phrase,start,end,score,count")?;
    for p in phrases {
        writeln!(
            file,
            "{},{:.2},{:.2},{:.4},{}",
            csv_field(&p.phrase),
            p.start,
            p.end,
            p.score,
            p.count
        )?;
    }

    Ok(())
}

/// Write highlights as CSV with the columns start,end,score,reason
pub fn write_highlights_csv(path: &Path, highlights: &[Highlight]) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;

    writeln!(file, "start,end,score,reason")?;
    for h in highlights {
        writeln!(
            file,
            "{:.2},{:.2},{:.4},{}",
            h.start,
            h.end,
            h.score,
            csv_field(&h.reason)
        )?;
    }

    Ok(())
}

/// Quote a CSV field when it contains a delimiter, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Format seconds as MM:SS for display
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
