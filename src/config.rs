//! Startup configuration, read from flags, environment variables and `.env`.

use std::fs;
use std::num::NonZeroUsize;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use url::Url;

use crate::constants::{
    DEFAULT_CHUNK_TOKENS, DEFAULT_MODEL, DEFAULT_NEWS_API_URL, DEFAULT_TOKENIZER,
    MODEL_API_KEY_ENV_NAME, MODEL_ENV_NAME, NEWS_API_KEY_ENV_NAME, NEWS_API_URL_ENV_NAME,
    TOKENIZER_ENV_NAME,
};
use crate::error::NewsError;

/// Search news by keyword and summarize every article
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// NewsAPI key
    #[arg(long, env = NEWS_API_KEY_ENV_NAME, hide_env_values = true)]
    pub api_key: String,

    /// Summarization model URL, e.g. "ollama://llama3.2"
    #[arg(long, short, env = MODEL_ENV_NAME, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key for the summarization backend, if it needs one
    #[arg(long, env = MODEL_API_KEY_ENV_NAME, hide_env_values = true)]
    pub model_api_key: Option<String>,

    /// Tokenizer hub identifier or path to a tokenizer.json
    #[arg(long, short, env = TOKENIZER_ENV_NAME, default_value = DEFAULT_TOKENIZER)]
    pub tokenizer: String,

    /// Maximum number of tokens per summarized chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_TOKENS)]
    pub chunk_tokens: usize,

    /// Truncate article text to this many tokens before chunking
    #[arg(long)]
    pub truncate_tokens: Option<usize>,

    /// Path to the file with a prompt template ({min}, {max} and {text} are substituted)
    #[arg(long, short = 'p')]
    pub prompt_file: Option<String>,

    /// News search endpoint
    #[arg(long, env = NEWS_API_URL_ENV_NAME, default_value = DEFAULT_NEWS_API_URL)]
    pub news_api_url: String,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", default_value_t = 2)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Validated configuration for one run.
#[derive(Debug)]
pub struct Settings {
    pub api_key: String,
    pub news_api_url: Url,
    pub model: String,
    pub model_api_key: Option<String>,
    pub tokenizer: String,
    pub chunk_tokens: NonZeroUsize,
    pub truncate_tokens: Option<NonZeroUsize>,
    pub prompt_template: Option<String>,
}

impl TryFrom<Cli> for Settings {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.api_key.trim().is_empty() {
            return Err(NewsError::Config(format!("{NEWS_API_KEY_ENV_NAME} is empty")).into());
        }

        let news_api_url = Url::parse(&cli.news_api_url).map_err(|source| {
            NewsError::InvalidUrl {
                url: cli.news_api_url.clone(),
                source,
            }
        })?;

        let chunk_tokens = NonZeroUsize::new(cli.chunk_tokens)
            .ok_or_else(|| NewsError::Config("--chunk-tokens must be positive".to_owned()))?;

        let truncate_tokens = match cli.truncate_tokens {
            Some(tokens) => Some(NonZeroUsize::new(tokens).ok_or_else(|| {
                NewsError::Config("--truncate-tokens must be positive".to_owned())
            })?),
            None => None,
        };

        let prompt_template = match cli.prompt_file {
            Some(file) => Some(
                fs::read_to_string(&file)
                    .context(format!("Failed to read prompt file: {file}"))?,
            ),
            None => None,
        };

        Ok(Self {
            api_key: cli.api_key,
            news_api_url,
            model: cli.model,
            model_api_key: cli.model_api_key,
            tokenizer: cli.tokenizer,
            chunk_tokens,
            truncate_tokens,
            prompt_template,
        })
    }
}
