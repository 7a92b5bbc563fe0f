//! Speech synthesis client: turns an entry's text into audio bytes via the
//! external TTS HTTP service.

mod client;
mod types;

pub use client::{SpeechClient, SpeechClientBuilder};
pub use types::{AudioClip, SpeechOptions};
