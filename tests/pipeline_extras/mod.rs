#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use llm::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Tool},
    error::LLMError,
};
use newsbrief::{
    Article, ArticleSource, LengthBounds, NewsError, PageScraper, SearchQuery, SummaryModel,
    TokenCodec,
};

#[macro_export]
macro_rules! assert_responses {
    (
        $(
            $test_name:ident : max_words => $max:expr, response => $response:expr, result => $result:expr
        ),+ $(,)?
    ) => {
        $(
            #[tokio::test]
            async fn $test_name() {
                let model = newsbrief::LlmSummaryModel::new(
                    Box::new(StubLlmProvider::new($response.to_owned())),
                    None,
                );
                let result = newsbrief::SummaryModel::summarize(
                    &model,
                    "",
                    newsbrief::LengthBounds { min: 0, max: $max },
                )
                .await
                .expect("Expected successful processing.");

                assert_that(&result).is_equal_to($result.to_owned());
            }
        )+
    }
}

pub fn article(title: &str, description: &str, url: &str) -> Article {
    Article {
        title: Some(title.to_owned()),
        description: Some(description.to_owned()),
        url: Some(url.to_owned()),
        content: None,
    }
}

/// One token per character, so chunk sizes are easy to reason about.
pub struct CharCodec;

impl TokenCodec for CharCodec {
    fn encode(&self, text: &str) -> Result<Vec<u32>, NewsError> {
        Ok(text.chars().map(u32::from).collect())
    }

    fn decode(&self, ids: &[u32]) -> Result<String, NewsError> {
        ids.iter()
            .map(|id| {
                char::from_u32(*id).ok_or_else(|| NewsError::Tokenizer(format!("bad id {id}")))
            })
            .collect()
    }
}

pub struct StubSource {
    pub articles: Vec<Article>,
    pub fail: bool,
    pub queries: Rc<RefCell<Vec<SearchQuery>>>,
}

impl StubSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            fail: false,
            queries: Rc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            articles: Vec::new(),
            fail: true,
            queries: Rc::default(),
        }
    }
}

impl ArticleSource for StubSource {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, NewsError> {
        self.queries.borrow_mut().push(query.clone());
        if self.fail {
            return Err(NewsError::Api {
                code: "apiKeyInvalid".to_owned(),
                message: "Your API key is invalid.".to_owned(),
            });
        }
        Ok(self.articles.clone())
    }
}

/// Serves page text by URL; unknown URLs fail like an unreachable host.
pub struct StubScraper {
    pub pages: HashMap<String, String>,
}

impl StubScraper {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, text)| ((*url).to_owned(), (*text).to_owned()))
                .collect(),
        }
    }
}

impl PageScraper for StubScraper {
    async fn scrape(&self, url: &str) -> Result<String, NewsError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| NewsError::InvalidUrl {
                url: url.to_owned(),
                source: url::ParseError::EmptyHost,
            })
    }
}

/// Answers every chunk with a fixed reply and records what it was asked.
#[derive(Clone, Default)]
pub struct StubModel {
    pub reply: String,
    pub calls: Rc<RefCell<Vec<(String, LengthBounds)>>>,
}

impl StubModel {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_owned(),
            calls: Rc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl SummaryModel for StubModel {
    async fn summarize(&self, text: &str, bounds: LengthBounds) -> Result<String, NewsError> {
        let index = self.calls.borrow().len();
        self.calls.borrow_mut().push((text.to_owned(), bounds));
        Ok(self.reply.replace("{n}", &index.to_string()))
    }
}

pub(crate) struct StubLlmProvider {
    response_content: String,
}

impl StubLlmProvider {
    pub fn new(response_content: String) -> Self {
        StubLlmProvider { response_content }
    }
}

impl ChatProvider for StubLlmProvider {
    fn chat<'life0, 'life1, 'async_trait>(
        &'life0 self,
        _messages: &'life1 [ChatMessage],
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            #[derive(Debug)]
            struct StringResponse(String);

            impl ChatResponse for StringResponse {
                fn text(&self) -> Option<String> {
                    Some(self.0.clone())
                }

                fn tool_calls(&self) -> Option<Vec<llm::ToolCall>> {
                    None
                }

                fn thinking(&self) -> Option<String> {
                    None
                }

                fn usage(&self) -> Option<llm::chat::Usage> {
                    None
                }
            }

            impl std::fmt::Display for StringResponse {
                fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(formatter, "{}", self.0)
                }
            }

            Ok(Box::new(StringResponse(self.response_content.clone())) as Box<dyn ChatResponse>)
        })
    }

    fn chat_with_tools<'life0, 'life1, 'life2, 'async_trait>(
        &'life0 self,
        _messages: &'life1 [ChatMessage],
        _tools: Option<&'life2 [Tool]>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        'life2: 'async_trait,
        Self: 'async_trait,
    {
        panic!("StubLlmProvider overrides chat, tools are never requested")
    }
}
