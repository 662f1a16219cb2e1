use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use clipscout::{
    AnalysisMetadata, AnalysisReport, HighlightConfig, PhraseConfig, TimedLine, detect_highlights,
    detect_hot_phrases, io::format_timestamp, load_transcript_file, tokenize, total_duration,
    write_highlights_csv, write_phrases_csv,
};

#[derive(Parser)]
#[command(name = "clipscout")]
#[command(author, version, about = "Transcript analytics for hot phrases and highlights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a transcript and export phrases, highlights and a report
    Analyze {
        /// Input transcript file (.json, .srt or .vtt)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "out")]
        out: PathBuf,

        /// Stopword language code
        #[arg(long, default_value = "en")]
        language: String,

        /// Window size in seconds for phrase detection
        #[arg(long, default_value = "60")]
        phrase_window_seconds: u64,

        /// Window size in seconds for highlight detection
        #[arg(long, default_value = "30")]
        highlight_window_seconds: u64,

        /// Minimum global occurrence count for a phrase
        #[arg(long, default_value = "2")]
        min_count: usize,

        /// Number of top phrases to export
        #[arg(long, default_value = "30")]
        top_k: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print transcript statistics without writing anything
    Stats {
        /// Input transcript file (.json, .srt or .vtt)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            out,
            language,
            phrase_window_seconds,
            highlight_window_seconds,
            min_count,
            top_k,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_transcript(
                input,
                out,
                language,
                phrase_window_seconds,
                highlight_window_seconds,
                min_count,
                top_k,
            )
        }
        Commands::Stats { input, verbose } => {
            setup_logging(verbose);
            print_stats(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn analyze_transcript(
    input: PathBuf,
    out: PathBuf,
    language: String,
    phrase_window_seconds: u64,
    highlight_window_seconds: u64,
    min_count: usize,
    top_k: usize,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let lines = load_transcript_file(&input).context("Failed to load input transcript")?;
    let duration = total_duration(&lines);

    info!("Loaded {} lines, {:.1}s total", lines.len(), duration);

    let phrase_config = PhraseConfig {
        window_seconds: phrase_window_seconds,
        language,
        min_count,
        ..Default::default()
    };
    let mut phrases = detect_hot_phrases(&lines, &phrase_config);
    let total_phrases = phrases.len();
    info!("Found {} distinct phrases", total_phrases);
    phrases.truncate(top_k);

    let highlight_config = HighlightConfig {
        window_seconds: highlight_window_seconds,
    };
    let highlights = detect_highlights(&lines, &highlight_config);
    info!("Found {} highlights", highlights.len());

    std::fs::create_dir_all(&out)
        .with_context(|| format!("Failed to create output directory: {:?}", out))?;

    let phrases_path = out.join("phrases.csv");
    let highlights_path = out.join("highlights.csv");
    let report_path = out.join("report.json");

    write_phrases_csv(&phrases_path, &phrases)?;
    write_highlights_csv(&highlights_path, &highlights)?;

    let report = AnalysisReport {
        metadata: AnalysisMetadata {
            total_lines: lines.len(),
            duration_seconds: duration,
            phrases_found: total_phrases,
            highlights_found: highlights.len(),
        },
        phrases,
        highlights,
    };
    report.write_json(&report_path)?;

    info!("Output written to {:?}", out);

    print_summary(&report);

    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!("Top Phrases");
    println!("-----------");
    for p in report.phrases.iter().take(15) {
        println!(
            "{:>7.2}  {}-{}  x{}  {}",
            p.score,
            format_timestamp(p.start),
            format_timestamp(p.end),
            p.count,
            p.phrase
        );
    }
    if report.phrases.is_empty() {
        println!("(none)");
    }
    println!();

    println!("Highlights");
    println!("----------");
    for h in report.highlights.iter().take(15) {
        println!(
            "{:>7.2}  {}-{}  {}",
            h.score,
            format_timestamp(h.start),
            format_timestamp(h.end),
            h.reason
        );
    }
    if report.highlights.is_empty() {
        println!("(none)");
    }
}

fn print_stats(input: PathBuf) -> Result<()> {
    info!("Analyzing transcript from {:?}", input);
    let lines = load_transcript_file(&input).context("Failed to load input transcript")?;

    let duration = total_duration(&lines);
    let token_count: usize = lines.iter().map(|l| tokenize(&l.text).len()).sum();
    let empty_lines = lines
        .iter()
        .filter(|l| tokenize(&l.text).is_empty())
        .count();

    println!("Transcript Statistics");
    println!("=====================");
    println!("Lines: {}", lines.len());
    println!("Word tokens: {}", token_count);
    println!("Lines without word tokens: {}", empty_lines);
    println!("Duration: {:.1}s ({})", duration, format_timestamp(duration));

    let phrase_windows = windows_spanned(&lines, PhraseConfig::default().window_seconds);
    let highlight_windows = windows_spanned(&lines, HighlightConfig::default().window_seconds);
    println!("Phrase windows (60s): {}", phrase_windows);
    println!("Highlight windows (30s): {}", highlight_windows);

    Ok(())
}

fn windows_spanned(lines: &[TimedLine], window_seconds: u64) -> usize {
    if lines.is_empty() {
        return 0;
    }
    ((total_duration(lines) / window_seconds as f64).ceil() as usize).max(1)
}
