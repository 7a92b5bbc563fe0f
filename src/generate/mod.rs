//! Clip generation: cache partition, bounded synthesis fan-out, and atomic
//! clip writes.

mod pool;

pub use pool::{BoundedPool, PoolError, PoolResult};

use crate::manifest::Manifest;
use crate::naming::audio_filename;
use crate::tts::{SpeechClient, SpeechOptions};
use crate::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// One entry that still needs synthesis.
#[derive(Debug, Clone)]
pub struct PendingClip {
    pub entry: String,
    pub path: PathBuf,
}

/// Cache partition of the full entry set: the complete manifest, the entries
/// that still need synthesis, and the count of already-satisfied entries.
#[derive(Debug)]
pub struct GenerationPlan {
    pub manifest: Manifest,
    pub pending: Vec<PendingClip>,
    pub skipped: usize,
}

impl GenerationPlan {
    pub fn nothing_to_generate(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Partition entries by the on-disk cache. An entry is satisfied when its
/// target file exists and is non-empty; satisfied entries get no network
/// call, which makes the whole pipeline idempotent and resumable.
pub fn plan(entries: &[String], audio_dir: &Path) -> GenerationPlan {
    let mut manifest = Manifest::new();
    let mut pending = Vec::new();
    let mut skipped = 0;

    for entry in entries {
        let filename = audio_filename(entry);
        let path = audio_dir.join(&filename);
        manifest.insert(entry.clone(), filename);
        let cached = std::fs::metadata(&path)
            .map(|m| m.len() > 0)
            .unwrap_or(false);
        if cached {
            skipped += 1;
        } else {
            pending.push(PendingClip {
                entry: entry.clone(),
                path,
            });
        }
    }

    GenerationPlan {
        manifest,
        pending,
        skipped,
    }
}

/// Per-entry outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Entry and written clip size in bytes.
    pub generated: Vec<(String, u64)>,
    /// Entry and failure message.
    pub failures: Vec<(String, String)>,
    pub elapsed: Duration,
}

impl GenerationReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives pending entries through the synthesis client under the
/// concurrency cap.
pub struct Generator {
    client: SpeechClient,
    options: SpeechOptions,
    pool: BoundedPool,
}

impl Generator {
    pub fn new(client: SpeechClient, options: SpeechOptions, concurrency: usize) -> Self {
        Self {
            client,
            options,
            pool: BoundedPool::new(concurrency),
        }
    }

    /// Synthesize every pending clip. Individual failures are collected in
    /// the report and never abort the rest of the batch.
    pub async fn run(&self, pending: Vec<PendingClip>) -> GenerationReport {
        let entries: Vec<String> = pending.iter().map(|c| c.entry.clone()).collect();
        let result = self
            .pool
            .run(pending, |clip| async move {
                let audio = self.client.synthesize(&clip.entry, &self.options).await?;
                let size = write_clip(&clip.path, &audio.data).await?;
                debug!(entry = %clip.entry, size, "clip written");
                Ok::<_, crate::Error>((clip.entry, size))
            })
            .await;

        // Pool failures are indexed into the pending list; map them back to
        // their entry text for the run summary.
        let failures = result
            .failures
            .iter()
            .map(|(idx, err)| (entries[*idx].clone(), err.message.clone()))
            .collect();
        GenerationReport {
            generated: result.successes.into_iter().map(|(_, r)| r).collect(),
            failures,
            elapsed: result.execution_time,
        }
    }
}

/// Write clip bytes to a temporary sibling and rename into place, so an
/// interrupted run can never leave a partial file the cache check would
/// treat as complete.
async fn write_clip(path: &Path, data: &[u8]) -> Result<u64> {
    let tmp = path.with_extension("mp3.part");
    tokio::fs::write(&tmp, data).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(data.len() as u64)
}
