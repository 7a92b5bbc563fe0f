//! Whole-run orchestration: collect → plan → generate → write manifest.

use crate::collect::collect_entries;
use crate::config::Config;
use crate::generate::{plan, GenerationPlan, Generator};
use crate::tts::{SpeechClient, SpeechOptions};
use crate::Result;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Everything the binary needs to report a run and choose an exit code.
#[derive(Debug)]
pub struct RunSummary {
    /// Distinct entries collected from the input documents.
    pub entry_count: usize,
    /// Entries satisfied by the on-disk cache, no network call issued.
    pub skipped: usize,
    /// Entries that needed synthesis this run.
    pub attempted: usize,
    /// Successfully generated entries with written clip size in bytes.
    pub generated: Vec<(String, u64)>,
    /// Failed entries with their synthesis error message.
    pub failures: Vec<(String, String)>,
    /// Wall time spent in the generation phase.
    pub elapsed: Duration,
    pub manifest_path: PathBuf,
    /// On-disk size of every clip the manifest names.
    pub total_audio_bytes: u64,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Execute one full generation run.
///
/// Input errors abort before any generation; per-entry synthesis failures
/// are carried in the summary and the manifest is written regardless, so a
/// later run can retry just the missing clips.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let entries = collect_entries(&config.deck_path, &config.sentence_path)?;
    info!(entries = entries.len(), voice = %config.voice, "collected entries");

    std::fs::create_dir_all(&config.audio_dir)?;

    let GenerationPlan {
        manifest,
        pending,
        skipped,
    } = plan(&entries, &config.audio_dir);
    debug!(skipped, pending = pending.len(), "cache partition");

    let attempted = pending.len();
    let (generated, failures, elapsed) = if pending.is_empty() {
        (Vec::new(), Vec::new(), Duration::ZERO)
    } else {
        let mut builder = SpeechClient::builder()
            .base_url(&config.base_url)
            .endpoint_path(&config.endpoint_path);
        if let Some(key) = &config.api_key {
            builder = builder.api_key(key);
        }
        let client = builder.build()?;
        let options = SpeechOptions::new()
            .with_voice(&config.voice)
            .with_rate(&config.rate);
        let generator = Generator::new(client, options, config.concurrency);
        let report = generator.run(pending).await;
        (report.generated, report.failures, report.elapsed)
    };

    let manifest_path = config.manifest_path();
    manifest.write(&manifest_path)?;
    let total_audio_bytes = manifest.total_audio_bytes(&config.audio_dir);

    Ok(RunSummary {
        entry_count: entries.len(),
        skipped,
        attempted,
        generated,
        failures,
        elapsed,
        manifest_path,
        total_audio_bytes,
    })
}
