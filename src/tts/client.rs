//! Speech synthesis client.

use super::types::{AudioClip, SpeechOptions};
use crate::{Error, ErrorContext, Result};

/// Client for the external text-to-speech service.
///
/// The service is an opaque collaborator: POST `{input, voice, rate}` to the
/// configured endpoint, get audio bytes back. Errors come back as a
/// [`Error::Synthesis`] with the service's response text in the message so
/// the run summary can report them per entry.
pub struct SpeechClient {
    http_client: reqwest::Client,
    base_url: String,
    endpoint_path: String,
    api_key: Option<String>,
}

impl SpeechClient {
    pub fn builder() -> SpeechClientBuilder {
        SpeechClientBuilder::new()
    }

    pub async fn synthesize(&self, text: &str, options: &SpeechOptions) -> Result<AudioClip> {
        let endpoint = format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint_path);
        let mut body = serde_json::json!({
            "input": text,
        });
        if let Some(voice) = &options.voice {
            body["voice"] = serde_json::Value::String(voice.clone());
        }
        if let Some(rate) = &options.rate {
            body["rate"] = serde_json::Value::String(rate.clone());
        }
        let mut request = self
            .http_client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().await.map_err(|e| {
            Error::synthesis_with_context(
                format!("request failed: {}", e),
                ErrorContext::new()
                    .with_subject(text.to_string())
                    .with_source("speech_client"),
            )
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            Error::synthesis_with_context(
                format!("failed to read response: {}", e),
                ErrorContext::new().with_subject(text.to_string()),
            )
        })?;
        if !status.is_success() {
            let body_str = String::from_utf8_lossy(&bytes);
            return Err(Error::synthesis_with_context(
                format!("API error ({}): {}", status, body_str),
                ErrorContext::new().with_subject(text.to_string()),
            ));
        }
        Ok(AudioClip {
            data: bytes.to_vec(),
        })
    }
}

pub struct SpeechClientBuilder {
    base_url: Option<String>,
    endpoint_path: Option<String>,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl SpeechClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            endpoint_path: None,
            api_key: None,
            timeout_secs: 60,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<SpeechClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("Base URL must be specified"))?;
        let endpoint_path = self
            .endpoint_path
            .unwrap_or_else(|| "/v1/audio/speech".to_string());
        let endpoint_path = if endpoint_path.starts_with('/') {
            endpoint_path
        } else {
            format!("/{}", endpoint_path)
        };
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(SpeechClient {
            http_client,
            base_url,
            endpoint_path,
            api_key: self.api_key,
        })
    }
}

impl Default for SpeechClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
