//! newsbrief is an interactive CLI that searches news articles by keyword,
//! scrapes each article and prints a model-written summary of it.
//!
//! Per-round input (keywords, article count, whether to continue) is read
//! from the terminal; everything else comes from flags or the environment.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::info;

use newsbrief::{
    HfTokenizer, HttpScraper, LlmSummaryModel, NewsApiClient, Session, Summarizer, build_provider,
    config::{Cli, Settings},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    Builder::new().filter_level(cli.log_level()).init();

    let settings = Settings::try_from(cli)?;

    let source = NewsApiClient::new(settings.api_key.clone(), settings.news_api_url.clone())?;
    let scraper = HttpScraper::new()?;

    let tokenizer = HfTokenizer::load(&settings.tokenizer)
        .with_context(|| format!("Unable to load tokenizer {}", settings.tokenizer))?;
    let tokenizer = match settings.truncate_tokens {
        Some(max_tokens) => tokenizer.with_truncation(max_tokens.get())?,
        None => tokenizer,
    };

    let provider = build_provider(&settings.model, settings.model_api_key.as_deref())
        .with_context(|| format!("Unable to set up model {}", settings.model))?;
    let model = LlmSummaryModel::new(provider, settings.prompt_template);

    let summarizer = Summarizer::new(tokenizer, model, settings.chunk_tokens);
    let session = Session::new(source, scraper, summarizer);

    info!("Ready, chunks hold up to {} tokens", settings.chunk_tokens);
    session
        .run(&mut io::stdin().lock(), &mut io::stdout().lock())
        .await
}
