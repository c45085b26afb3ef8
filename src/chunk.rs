//! Splitting tokenized articles into windows that fit the model's input.

use std::num::NonZeroUsize;

use log::debug;

use crate::error::Result;
use crate::tokenize::TokenCodec;

/// Consecutive token ids taken from an article, at most the configured window long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenChunk(Vec<u32>);

impl TokenChunk {
    pub fn ids(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Partitions `ids` into non-overlapping windows of `max_length` tokens; only
/// the last window may be shorter. No ids yield no chunks.
pub fn chunk_tokens(ids: &[u32], max_length: NonZeroUsize) -> Vec<TokenChunk> {
    ids.chunks(max_length.get())
        .map(|window| TokenChunk(window.to_vec()))
        .collect()
}

/// Tokenizes `text` once and partitions the result with [`chunk_tokens`].
///
/// # Errors
///
/// Returns an error if the codec fails to tokenize the text.
pub fn chunk_text<C: TokenCodec>(
    codec: &C,
    text: &str,
    max_length: NonZeroUsize,
) -> Result<Vec<TokenChunk>> {
    let ids = codec.encode(text)?;
    let chunks = chunk_tokens(&ids, max_length);
    debug!("Split {} tokens into {} chunks", ids.len(), chunks.len());
    Ok(chunks)
}
