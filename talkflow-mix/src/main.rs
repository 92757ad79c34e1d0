//! TalkFlow mixdown (talkflow-mix) - Main entry point
//!
//! Loads a saved voice session, resolves its output sequence through the
//! assembly pipeline, and writes the master MP3 to disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talkflow_mix::config::{AudioConfig, DEFAULT_OUTPUT_NAME};
use talkflow_mix::pipeline::MixdownPipeline;
use talkflow_mix::session::Session;

/// Command-line arguments for talkflow-mix
#[derive(Parser, Debug)]
#[command(name = "talkflow-mix")]
#[command(about = "Assemble synthesized TalkFlow voice tracks into one MP3")]
#[command(version)]
struct Args {
    /// Session file (JSON) holding the tracks and output sequence
    session: PathBuf,

    /// Output MP3 path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// Optional TOML config file overriding the audio defaults
    #[arg(short, long, env = "TALKFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// Sample rate declared by the synthesis collaborator
    #[arg(long, env = "TALKFLOW_SAMPLE_RATE")]
    sample_rate: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talkflow_mix=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AudioConfig::load(path).context("Failed to load config file")?,
        None => AudioConfig::default(),
    };
    if let Some(sample_rate) = args.sample_rate {
        config.sample_rate = sample_rate;
    }
    config.validate().context("Invalid audio configuration")?;

    let session = Session::load(&args.session).context("Failed to load session file")?;
    info!(
        tracks = session.tracks.len(),
        items = session.sequence.len(),
        "Loaded session"
    );

    let pipeline = MixdownPipeline::new(config);
    let blob = pipeline
        .render(&session.sequence, &session)
        .await
        .context("Failed to render master audio")?;

    blob.write_to(&args.output)
        .context("Failed to write output file")?;
    info!(
        path = %args.output.display(),
        bytes = blob.len(),
        "Wrote master audio"
    );

    Ok(())
}
