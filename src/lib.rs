//! The newsbrief library searches news articles by keyword, scrapes their text
//! and summarizes it chunk by chunk with a pretrained language model.

pub mod chunk;
pub mod config;
pub mod constants;
pub mod error;
pub mod scrape;
pub mod search;
pub mod session;
pub mod summarize;
pub mod tokenize;

pub use chunk::{TokenChunk, chunk_text, chunk_tokens};
pub use error::NewsError;
pub use scrape::{HttpScraper, PageScraper, extract_paragraphs};
pub use search::{
    Article, ArticleSource, NewsApiClient, SearchQuery, interpret_search_response,
    parse_search_response,
};
pub use session::Session;
pub use summarize::{
    LengthBounds, LlmSummaryModel, SummaryModel, Summarizer, build_provider, limit_words,
    render_prompt,
};
pub use tokenize::{HfTokenizer, TokenCodec};
