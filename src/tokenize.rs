//! Conversion between text and the summarization model's token ids.

use std::path::Path;

use log::info;
use tokenizers::{Tokenizer, TruncationParams};

use crate::error::{NewsError, Result};

/// Encodes text into model vocabulary ids and back.
pub trait TokenCodec {
    /// Tokenizes `text`, special tokens included.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokenizer rejects the input.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Turns `ids` back into text, skipping special tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the ids can't be decoded.
    fn decode(&self, ids: &[u32]) -> Result<String>;
}

/// A HuggingFace tokenizer, loaded once and reused for every article.
pub struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    /// Loads a tokenizer from a local `tokenizer.json` when `source` names an
    /// existing file, or from the HuggingFace hub otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokenizer can't be read or downloaded.
    pub fn load(source: &str) -> Result<Self> {
        let inner = if Path::new(source).is_file() {
            info!("Loading tokenizer from {source}");
            Tokenizer::from_file(source)
        } else {
            info!("Loading tokenizer {source} from the hub");
            Tokenizer::from_pretrained(source, None)
        }
        .map_err(|e| NewsError::Tokenizer(format!("Failed to load {source}: {e}")))?;

        Ok(Self { inner })
    }

    /// Truncates every encoded input to `max_tokens`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokenizer refuses the truncation settings.
    pub fn with_truncation(mut self, max_tokens: usize) -> Result<Self> {
        self.inner
            .with_truncation(Some(TruncationParams {
                max_length: max_tokens,
                ..Default::default()
            }))
            .map_err(|e| NewsError::Tokenizer(e.to_string()))?;
        Ok(self)
    }
}

impl From<Tokenizer> for HfTokenizer {
    fn from(inner: Tokenizer) -> Self {
        Self { inner }
    }
}

impl TokenCodec for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| NewsError::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| NewsError::Tokenizer(e.to_string()))
    }
}
