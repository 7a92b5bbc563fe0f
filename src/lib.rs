//! # hanzi-audio
//!
//! Generates MP3 audio clips for the hanzi entries of a Chinese flashcard
//! dataset by calling a text-to-speech HTTP service, and writes a lookup
//! manifest mapping every entry to its clip filename.
//!
//! ## Pipeline
//!
//! A run is a single pass through four stages with no feedback loops:
//!
//! 1. **Collect** — read the deck and sentence documents, dedupe every
//!    hanzi string into a sorted entry set.
//! 2. **Plan** — pure filename derivation plus a cache partition: entries
//!    whose clip already exists non-empty on disk are skipped outright.
//! 3. **Generate** — fan out the remaining entries to the synthesis service
//!    with at most [`config::DEFAULT_CONCURRENCY`] calls in flight; one
//!    entry's failure never aborts the others.
//! 4. **Write** — persist the complete manifest, failures included, so a
//!    re-run retries exactly the missing clips.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`collect`] | Input document parsing and entry deduplication |
//! | [`naming`] | Deterministic entry → filename mapping |
//! | [`tts`] | HTTP speech-synthesis client |
//! | [`generate`] | Cache partition and bounded concurrent generation |
//! | [`manifest`] | Lookup manifest serialization |
//! | [`run`] | Whole-run orchestration and summary |
//! | [`config`] | Run configuration with environment fallbacks |

pub mod collect;
pub mod config;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod naming;
pub mod run;
pub mod tts;

// Re-export main types for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, ErrorContext};
pub use manifest::Manifest;
pub use run::{run, RunSummary};
pub use tts::{SpeechClient, SpeechOptions};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
