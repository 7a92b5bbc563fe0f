//! Speech synthesis types.

/// Audio payload returned by the synthesis service.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub data: Vec<u8>,
}

impl AudioClip {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Per-call synthesis options.
///
/// `rate` is a signed percentage adjustment of speaking speed, e.g. "-15%".
#[derive(Debug, Clone, Default)]
pub struct SpeechOptions {
    pub voice: Option<String>,
    pub rate: Option<String>,
}

impl SpeechOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_rate(mut self, rate: impl Into<String>) -> Self {
        self.rate = Some(rate.into());
        self
    }
}
