//! Run configuration.
//!
//! Everything the original one-off script kept as module constants (voice,
//! rate, concurrency cap, data paths) lives here as plain configuration
//! passed at startup.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Default neural voice for Mandarin entries.
pub const DEFAULT_VOICE: &str = "zh-CN-XiaoxiaoNeural";
/// Default speech-rate adjustment; flashcard audio is slowed down slightly.
pub const DEFAULT_RATE: &str = "-15%";
/// Default cap on simultaneous in-flight synthesis calls.
pub const DEFAULT_CONCURRENCY: usize = 5;
/// Manifest filename inside the audio directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct Config {
    pub deck_path: PathBuf,
    pub sentence_path: PathBuf,
    pub audio_dir: PathBuf,
    pub voice: String,
    pub rate: String,
    pub concurrency: usize,
    pub base_url: String,
    pub endpoint_path: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Path the manifest is written to.
    pub fn manifest_path(&self) -> PathBuf {
        self.audio_dir.join(MANIFEST_FILENAME)
    }
}

/// Builder with the original script's defaults and environment fallbacks
/// for the synthesis endpoint.
pub struct ConfigBuilder {
    project_root: PathBuf,
    deck_path: Option<PathBuf>,
    sentence_path: Option<PathBuf>,
    audio_dir: Option<PathBuf>,
    voice: String,
    rate: String,
    concurrency: usize,
    base_url: Option<String>,
    endpoint_path: String,
    api_key: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            project_root: PathBuf::from("."),
            deck_path: None,
            sentence_path: None,
            audio_dir: None,
            voice: DEFAULT_VOICE.to_string(),
            rate: DEFAULT_RATE.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            base_url: None,
            endpoint_path: "/v1/audio/speech".to_string(),
            api_key: None,
        }
    }

    /// Directory the `data/` layout hangs off; individual paths may still be
    /// overridden afterwards.
    pub fn project_root(mut self, root: impl AsRef<Path>) -> Self {
        self.project_root = root.as_ref().to_path_buf();
        self
    }

    pub fn deck_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.deck_path = Some(path.into());
        self
    }

    pub fn sentence_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sentence_path = Some(path.into());
        self
    }

    pub fn audio_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio_dir = Some(path.into());
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn rate(mut self, rate: impl Into<String>) -> Self {
        self.rate = rate.into();
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.voice.is_empty() {
            return Err(Error::configuration("voice must not be empty"));
        }
        let base_url = self
            .base_url
            .or_else(|| std::env::var("HANZI_TTS_BASE_URL").ok())
            .ok_or_else(|| {
                Error::configuration("synthesis base URL required (set HANZI_TTS_BASE_URL)")
            })?;
        let api_key = self
            .api_key
            .or_else(|| std::env::var("HANZI_TTS_API_KEY").ok());
        let endpoint_path = if self.endpoint_path.starts_with('/') {
            self.endpoint_path
        } else {
            format!("/{}", self.endpoint_path)
        };
        let data_dir = self.project_root.join("data");
        Ok(Config {
            deck_path: self
                .deck_path
                .unwrap_or_else(|| data_dir.join("deck-data.json")),
            sentence_path: self
                .sentence_path
                .unwrap_or_else(|| data_dir.join("sentence-data.json")),
            audio_dir: self.audio_dir.unwrap_or_else(|| data_dir.join("audio")),
            voice: self.voice,
            rate: self.rate,
            concurrency: self.concurrency,
            base_url,
            endpoint_path,
            api_key,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
