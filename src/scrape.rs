//! The scrape module downloads article pages and extracts their paragraph text.

use log::{debug, info};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector as ScraperSelector};
use url::Url;

use crate::constants::USER_AGENT;
use crate::error::{NewsError, Result};

static PARAGRAPH_SELECTOR: Lazy<ScraperSelector> =
    Lazy::new(|| ScraperSelector::parse("p").expect("Failed to compile paragraph selector"));

/// Anything that can turn an article URL into its visible text.
pub trait PageScraper {
    /// Fetches `url` and returns the page's paragraph text.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the page can't be fetched.
    async fn scrape(&self, url: &str) -> Result<String>;
}

/// Scraper fetching pages over HTTP.
pub struct HttpScraper {
    client: Client,
}

impl HttpScraper {
    /// Creates a scraper with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client can't be built.
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl PageScraper for HttpScraper {
    async fn scrape(&self, url: &str) -> Result<String> {
        let page_url = Url::parse(url).map_err(|source| NewsError::InvalidUrl {
            url: url.to_owned(),
            source,
        })?;

        info!("Scraping {page_url}");
        let html = self
            .client
            .get(page_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let text = extract_paragraphs(&html);
        debug!("Extracted {} characters from {url}", text.len());
        Ok(text)
    }
}

/// Joins the text of every `<p>` element, in document order, with single spaces.
///
/// Returns an empty string when the document has no paragraphs.
pub fn extract_paragraphs(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .select(&PARAGRAPH_SELECTOR)
        .map(|paragraph| paragraph.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
