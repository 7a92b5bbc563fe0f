//! Entry collection.
//!
//! Reads the deck and sentence documents and produces the sorted set of
//! distinct hanzi strings across every category list. Malformed or missing
//! input is fatal; nothing downstream runs without a complete entry set.

use crate::{Error, ErrorContext, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// A card from either input document. Only the text field matters here;
/// everything else in the documents is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub hanzi: String,
}

/// Deck document: categorized card lists, any of which may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckData {
    #[serde(default)]
    pub vocab: Vec<Card>,
    #[serde(default)]
    pub radicals: Vec<Card>,
    #[serde(default)]
    pub numbers: Vec<Card>,
}

/// Sentence document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SentenceData {
    #[serde(default)]
    pub sentences: Vec<Card>,
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        Error::input_with_context(
            format!("failed to read {}: {}", path.display(), e),
            ErrorContext::new()
                .with_subject(path.display().to_string())
                .with_source("collector"),
        )
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        Error::input_with_context(
            format!("failed to parse {}: {}", path.display(), e),
            ErrorContext::new()
                .with_subject(path.display().to_string())
                .with_source("collector"),
        )
    })
}

/// Collect every distinct hanzi string from both documents, sorted.
pub fn collect_entries(deck_path: &Path, sentence_path: &Path) -> Result<Vec<String>> {
    let deck: DeckData = load_json(deck_path)?;
    let sentences: SentenceData = load_json(sentence_path)?;
    Ok(entries_from(&deck, &sentences))
}

/// Pure dedup over already-parsed documents.
pub fn entries_from(deck: &DeckData, sentences: &SentenceData) -> Vec<String> {
    let mut entries = BTreeSet::new();
    for card in deck
        .vocab
        .iter()
        .chain(deck.radicals.iter())
        .chain(deck.numbers.iter())
        .chain(sentences.sentences.iter())
    {
        entries.insert(card.hanzi.clone());
    }
    entries.into_iter().collect()
}
