//! The search module queries the NewsAPI `everything` endpoint for articles
//! matching a set of keywords.

use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::constants::{MAX_PAGE_SIZE, USER_AGENT};
use crate::error::{NewsError, Result};

/// A news article as returned by the search service.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Full text scraped from `url`, filled in after the search.
    #[serde(skip)]
    pub content: Option<String>,
}

/// Keywords and article count collected from the user for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: Vec<String>,
    pub count: u32,
}

impl SearchQuery {
    pub fn new(keywords: Vec<String>, count: u32) -> Self {
        Self { keywords, count }
    }

    /// Splits comma separated user input into trimmed, non-empty keywords.
    pub fn parse_keywords(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Combines the keywords with a logical OR, as the search service expects in `q`.
    pub fn query_string(&self) -> String {
        self.keywords.join(" OR ")
    }
}

/// Anything that can turn a [`SearchQuery`] into a list of articles.
pub trait ArticleSource {
    /// Runs a single search and returns the articles in service order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response can't be understood.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

/// Client for the NewsAPI `everything` endpoint.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl NewsApiClient {
    /// Creates a client for `endpoint` authenticated by `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client can't be built.
    pub fn new(api_key: String, endpoint: Url) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_key,
            endpoint,
        })
    }

    /// Query parameters sent for `query`. The page size is capped at the
    /// service maximum.
    pub fn search_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let page_size = if query.count > MAX_PAGE_SIZE {
            warn!(
                "Requested {} articles, the search service returns at most {MAX_PAGE_SIZE}",
                query.count
            );
            MAX_PAGE_SIZE
        } else {
            query.count
        };

        vec![
            ("q", query.query_string()),
            ("apiKey", self.api_key.clone()),
            ("pageSize", page_size.to_string()),
        ]
    }
}

impl ArticleSource for NewsApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>> {
        info!("Searching news for: {}", query.query_string());

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&self.search_params(query))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Search answered {status} with {} bytes", body.len());

        interpret_search_response(status, &body)
    }
}

/// Turns a search answer into articles, failing on any non-success status.
///
/// A NewsAPI error document is reported with its own code and message; other
/// non-success bodies are reported by HTTP status.
///
/// # Errors
///
/// Returns [`NewsError::Api`] for error documents and non-success statuses,
/// and [`NewsError::Parse`] for a successful answer that isn't valid JSON.
pub fn interpret_search_response(status: StatusCode, body: &str) -> Result<Vec<Article>> {
    match parse_search_response(body) {
        Err(err @ NewsError::Api { .. }) => Err(err),
        _ if !status.is_success() => Err(NewsError::Api {
            code: status.as_u16().to_string(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_owned(),
        }),
        result => result,
    }
}

/// Extracts the article list from a search response body.
///
/// A body without `articles` yields an empty list.
///
/// # Errors
///
/// Returns [`NewsError::Api`] when the body reports `"status": "error"`, and
/// [`NewsError::Parse`] when it isn't valid JSON.
pub fn parse_search_response(body: &str) -> Result<Vec<Article>> {
    let response: SearchResponse = serde_json::from_str(body)?;

    if response.status.as_deref() == Some("error") {
        return Err(NewsError::Api {
            code: response.code.unwrap_or_else(|| "unknown".to_owned()),
            message: response.message.unwrap_or_default(),
        });
    }

    let articles = response.articles.unwrap_or_default();
    info!("Search returned {} articles", articles.len());
    Ok(articles)
}
