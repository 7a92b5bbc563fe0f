//! Deterministic filename derivation.

/// Extension of every generated clip.
pub const AUDIO_EXT: &str = "mp3";

/// Derive the clip filename for an entry: lowercase hex of the entry's UTF-8
/// bytes plus the fixed extension. Total and injective — distinct byte
/// sequences always hex-encode to distinct strings — so the mapping is safe
/// to recompute on every run, and the filename decodes back to the entry.
pub fn audio_filename(entry: &str) -> String {
    format!("{}.{}", hex::encode(entry.as_bytes()), AUDIO_EXT)
}
