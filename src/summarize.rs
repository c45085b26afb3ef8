//! The summarize module turns article text into a summary, chunk by chunk,
//! using a pretrained language model.

use std::num::NonZeroUsize;
use std::str::FromStr;

use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, ChatMessageBuilder, ChatProvider};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::chunk::chunk_text;
use crate::constants::{
    DEFAULT_PROMPT_TEMPLATE, RESPONSE_TOKENS_PER_WORD, SUMMARY_LENGTH_MARGIN, SUMMARY_MAX_WORDS,
    SUMMARY_MIN_WORDS, THINK_STRIPPER,
};
use crate::error::{NewsError, Result};
use crate::tokenize::TokenCodec;

static THINK_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THINK_STRIPPER).expect("Failed to compile THINK_STRIPPER regex"));

/// Output length requested from the model for one chunk. `min <= max` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    /// Bounds for an input of `word_count` words: at most 150 and never more
    /// than the input, at least half the input (50 minimum) but 10 below the
    /// maximum. Short inputs saturate to `[0, max]`.
    pub fn for_word_count(word_count: usize) -> Self {
        let max = SUMMARY_MAX_WORDS.min(word_count);
        let min = SUMMARY_MIN_WORDS
            .max(word_count / 2)
            .min(max.saturating_sub(SUMMARY_LENGTH_MARGIN))
            .min(max);
        Self { min, max }
    }

    pub fn for_text(text: &str) -> Self {
        Self::for_word_count(word_count(text))
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A model that can summarize a piece of text within length bounds.
pub trait SummaryModel {
    /// Summarizes `text` deterministically, aiming for a length within `bounds`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model backend fails.
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String>;
}

/// [`SummaryModel`] backed by a chat provider of the `llm` crate.
pub struct LlmSummaryModel<P: ?Sized = dyn LLMProvider> {
    provider: Box<P>,
    prompt_template: Option<String>,
}

impl<P: ChatProvider + ?Sized> LlmSummaryModel<P> {
    pub fn new(provider: Box<P>, prompt_template: Option<String>) -> Self {
        Self {
            provider,
            prompt_template,
        }
    }
}

impl<P: ChatProvider + ?Sized> SummaryModel for LlmSummaryModel<P> {
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String> {
        let prompt_template = self
            .prompt_template
            .as_deref()
            .unwrap_or(DEFAULT_PROMPT_TEMPLATE);

        let mut messages: Vec<ChatMessageBuilder> =
            vec![ChatMessage::user().content(render_prompt(prompt_template, text, bounds))];

        if !prompt_template.contains("{text}") {
            messages.push(ChatMessage::user().content(text));
        }

        let messages: Vec<ChatMessage> = messages
            .into_iter()
            .map(|message| message.build())
            .collect();

        let response = self
            .provider
            .chat(&messages)
            .await
            .map_err(|err| NewsError::Model(format!("LLM error: {err}.")))?
            .to_string();

        let summary = THINK_STRIPPER_REGEX.replace_all(&response, "");
        let summary = limit_words(summary.trim(), bounds.max);

        let words = word_count(&summary);
        if words < bounds.min {
            warn!("Model returned {words} words, fewer than the requested {}", bounds.min);
        }

        Ok(summary)
    }
}

/// Cuts `text` after `max` words. Text within the limit is returned unchanged.
pub fn limit_words(text: &str, max: usize) -> String {
    if word_count(text) <= max {
        return text.to_owned();
    }
    text.split_whitespace().take(max).collect::<Vec<_>>().join(" ")
}

/// Fills the `{min}`, `{max}` and `{text}` placeholders of a prompt template.
pub fn render_prompt(template: &str, text: &str, bounds: LengthBounds) -> String {
    template
        .replace("{min}", &bounds.min.to_string())
        .replace("{max}", &bounds.max.to_string())
        .replace("{text}", text)
}

/// Builds a deterministic chat provider from a model URL such as
/// `ollama://llama3.2` or `ollama://qwen3:8b@`.
///
/// The scheme picks the backend, the host names the model and the username,
/// when present, is appended as its tag.
///
/// # Errors
///
/// Returns an error if:
/// * The URL is invalid or names no model
/// * The backend is unknown
/// * The provider can't be built
pub fn build_provider(model: &str, api_key: Option<&str>) -> Result<Box<dyn LLMProvider>> {
    let model_url = Url::parse(model).map_err(|source| NewsError::InvalidUrl {
        url: model.to_owned(),
        source,
    })?;

    let backend = LLMBackend::from_str(model_url.scheme())
        .map_err(|e| NewsError::Config(format!("Invalid LLM backend: {e}")))?;
    let model_name = [
        model_url
            .host_str()
            .ok_or_else(|| NewsError::Config("Specify model name as host URL.".to_owned()))?,
        model_url.username(),
    ]
    .iter()
    .filter(|x| !x.is_empty())
    .cloned()
    .collect::<Vec<_>>()
    .join(":");

    info!("Using {} model {model_name}", model_url.scheme());

    let builder = LLMBuilder::new()
        .backend(backend)
        .model(model_name)
        .temperature(0.0)
        .max_tokens(max_response_tokens());

    let builder = match api_key {
        Some(key) => builder.api_key(key),
        None => builder,
    };

    builder
        .build()
        .map_err(|e| NewsError::Model(format!("Failed to build LLM model: {e}")))
}

/// Output allowance for the provider, enough for the longest summary requested.
fn max_response_tokens() -> u32 {
    u32::try_from(SUMMARY_MAX_WORDS * RESPONSE_TOKENS_PER_WORD).unwrap_or(u32::MAX)
}

/// Chunks article text, summarizes every chunk and joins the results.
///
/// The codec and the model are built once and reused for every article.
pub struct Summarizer<C, M> {
    codec: C,
    model: M,
    max_chunk_tokens: NonZeroUsize,
}

impl<C: TokenCodec, M: SummaryModel> Summarizer<C, M> {
    pub fn new(codec: C, model: M, max_chunk_tokens: NonZeroUsize) -> Self {
        Self {
            codec,
            model,
            max_chunk_tokens,
        }
    }

    /// Summarizes `text`, returning `None` when it holds nothing to summarize.
    ///
    /// Chunk summaries are joined with a single space in chunk order. Chunks
    /// that decode to no words are not sent to the model.
    ///
    /// # Errors
    ///
    /// Returns an error if tokenization or any model call fails.
    pub async fn summarize(&self, text: &str) -> Result<Option<String>> {
        let chunks = chunk_text(&self.codec, text, self.max_chunk_tokens)?;
        let mut summaries = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            let decoded = self.codec.decode(chunk.ids())?;
            let bounds = LengthBounds::for_text(&decoded);
            if bounds.max == 0 {
                debug!("Chunk {index} decodes to no words, skipping");
                continue;
            }

            debug!(
                "Summarizing chunk {index} ({} tokens) within {}..={}",
                chunk.len(),
                bounds.min,
                bounds.max
            );
            summaries.push(self.model.summarize(&decoded, bounds).await?);
        }

        if summaries.is_empty() {
            Ok(None)
        } else {
            Ok(Some(summaries.join(" ")))
        }
    }
}
