//! Generates one MP3 clip per distinct hanzi entry in the flashcard data
//! plus a manifest mapping each entry to its filename.
//!
//! Usage:
//!   generate-audio [PROJECT_ROOT]
//!
//! Reads `data/deck-data.json` and `data/sentence-data.json` under the
//! project root (default `.`), writes clips and `manifest.json` into
//! `data/audio/`. The synthesis endpoint comes from `HANZI_TTS_BASE_URL`
//! and optionally `HANZI_TTS_API_KEY`. Exits non-zero when any entry
//! failed; re-running retries only the missing clips.

use hanzi_audio::{run, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let project_root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let config = Config::builder().project_root(&project_root).build()?;

    println!("Voice: {}", config.voice);
    println!("Output: {}/", config.audio_dir.display());
    println!();

    let summary = run(&config).await?;

    println!("Entries: {}", summary.entry_count);
    if summary.skipped > 0 {
        println!("Skipping {} already-generated files.", summary.skipped);
    }

    if summary.attempted == 0 {
        println!("Nothing to generate — all files exist.");
    } else {
        println!(
            "Generated {}/{} in {:.1}s",
            summary.generated.len(),
            summary.attempted,
            summary.elapsed.as_secs_f64()
        );
    }

    println!();
    println!("Manifest written: {}", summary.manifest_path.display());
    println!(
        "Total audio size: {:.2} MB",
        summary.total_audio_bytes as f64 / 1024.0 / 1024.0
    );

    if !summary.all_succeeded() {
        println!();
        println!("{} failures:", summary.failures.len());
        for (entry, msg) in &summary.failures {
            println!("  {}: {}", entry, msg);
        }
        std::process::exit(1);
    }
    Ok(())
}
