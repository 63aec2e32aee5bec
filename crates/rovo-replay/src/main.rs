//! # rovo-replay
//!
//! Replays a captured agent response transcript through the stream parser,
//! optionally cut into fixed-size reads to mimic network delivery, and prints
//! one JSON line per event on stdout.

#![deny(unsafe_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::Parser;
use futures::StreamExt;
use rovo_settings::RovoSettings;
use rovo_settings::types::MAX_REPLAY_CHUNK_SIZE;
use rovo_stream::{ParserOptions, parse_response_stream};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Replay a captured Rovo response stream.
#[derive(Parser, Debug)]
#[command(name = "rovo-replay", about = "Replay a captured Rovo response stream")]
struct Cli {
    /// Transcript file, or `-` for stdin.
    input: PathBuf,

    /// Bytes per simulated read (0 feeds the whole transcript at once).
    #[arg(long, value_parser = parse_chunk_size)]
    chunk_size: Option<usize>,

    /// Emit streamed text once per part instead of once per delta.
    #[arg(long)]
    merge_all_chunks: bool,

    /// Log filter for stderr output (`RUST_LOG` takes precedence).
    #[arg(long)]
    log_level: Option<String>,

    /// Settings file to load instead of `~/.rovo/settings.json`.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Exit non-zero when any frame failed to parse.
    #[arg(long)]
    fail_on_error: bool,
}

fn parse_chunk_size(raw: &str) -> std::result::Result<usize, String> {
    let size: usize = raw.trim().parse().map_err(|e| format!("{e}"))?;
    if size > MAX_REPLAY_CHUNK_SIZE {
        return Err(format!("must be at most {MAX_REPLAY_CHUNK_SIZE}"));
    }
    Ok(size)
}

/// CLI flags layered over loaded settings.
#[derive(Debug, PartialEq, Eq)]
struct ReplayConfig {
    chunk_size: usize,
    options: ParserOptions,
    log_level: String,
}

impl ReplayConfig {
    fn resolve(cli: &Cli, settings: RovoSettings) -> Self {
        Self {
            chunk_size: cli.chunk_size.unwrap_or(settings.replay.chunk_size),
            options: ParserOptions {
                merge_all_chunks: cli.merge_all_chunks || settings.parser.merge_all_chunks,
            },
            log_level: cli.log_level.clone().unwrap_or(settings.logging.level),
        }
    }
}

/// Counts reported at the end of a replay.
#[derive(Debug, Default, PartialEq, Eq)]
struct ReplaySummary {
    events: usize,
    parsing_errors: usize,
}

fn load_settings(path: Option<&Path>) -> Result<RovoSettings> {
    match path {
        Some(path) => rovo_settings::load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(rovo_settings::load_settings().unwrap_or_default()),
    }
}

async fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut input = Vec::new();
        let _ = tokio::io::stdin()
            .read_to_end(&mut input)
            .await
            .context("Failed to read transcript from stdin")?;
        Ok(input)
    } else {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read transcript: {}", path.display()))
    }
}

/// Cut the transcript into reads of `chunk_size` bytes.
///
/// Cuts ignore char boundaries on purpose; the stream adapter reassembles them.
fn into_chunks(input: Vec<u8>, chunk_size: usize) -> Vec<Bytes> {
    let input = Bytes::from(input);
    if chunk_size == 0 {
        return vec![input];
    }
    (0..input.len())
        .step_by(chunk_size)
        .map(|start| input.slice(start..input.len().min(start + chunk_size)))
        .collect()
}

async fn replay<W: Write>(chunks: Vec<Bytes>, options: ParserOptions, out: &mut W) -> Result<ReplaySummary> {
    let reads = futures::stream::iter(chunks.into_iter().map(Ok::<_, std::io::Error>));
    let mut events = std::pin::pin!(parse_response_stream(reads, options));

    let mut summary = ReplaySummary::default();
    while let Some(event) = events.next().await {
        debug!(kind = event.kind_name(), "replayed event");
        serde_json::to_writer(&mut *out, &event).context("Failed to encode event")?;
        writeln!(out).context("Failed to write event")?;
        summary.events += 1;
        if event.is_parsing_error() {
            summary.parsing_errors += 1;
        }
    }
    out.flush().context("Failed to flush output")?;
    Ok(summary)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref())?;
    let config = ReplayConfig::resolve(&cli, settings);
    rovo_core::logging::init_subscriber(&config.log_level);

    let input = read_input(&cli.input).await?;
    let chunks = into_chunks(input, config.chunk_size);
    info!(
        reads = chunks.len(),
        merge_all_chunks = config.options.merge_all_chunks,
        "replaying transcript"
    );

    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    let summary = replay(chunks, config.options, &mut out).await?;
    info!(events = summary.events, parsing_errors = summary.parsing_errors, "replay finished");

    if cli.fail_on_error && summary.parsing_errors > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
