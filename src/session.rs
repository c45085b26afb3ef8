//! The interactive loop: collect keywords and an article count, present the
//! summarized articles, and ask whether to go again.

use std::io::{BufRead, Write};

use anyhow::Result;
use log::{info, warn};

use crate::constants::{PREVIEW_CHARS, SEPARATOR};
use crate::scrape::PageScraper;
use crate::search::{Article, ArticleSource, SearchQuery};
use crate::summarize::{Summarizer, SummaryModel};
use crate::tokenize::TokenCodec;

const KEYWORDS_PROMPT: &str = "Please enter the keywords for the news you're interested in (comma-separated, e.g., technology, AI): ";
const COUNT_PROMPT: &str = "How many articles would you like to retrieve? ";
const CONTINUE_PROMPT: &str = "\nWould you like to search for more articles? (yes/no): ";

#[derive(Debug, PartialEq, Eq)]
enum State {
    CollectingInput,
    PresentingResults(SearchQuery),
    Terminated,
}

/// Drives one user through search rounds until they stop.
pub struct Session<S, P, C, M> {
    source: S,
    scraper: P,
    summarizer: Summarizer<C, M>,
}

impl<S, P, C, M> Session<S, P, C, M>
where
    S: ArticleSource,
    P: PageScraper,
    C: TokenCodec,
    M: SummaryModel,
{
    pub fn new(source: S, scraper: P, summarizer: Summarizer<C, M>) -> Self {
        Self {
            source,
            scraper,
            summarizer,
        }
    }

    /// Runs rounds reading answers from `input` and printing to `output`
    /// until the user declines to continue or `input` is exhausted.
    ///
    /// Search, scrape and summarization failures are reported to the user and
    /// don't end the session.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading `input` or writing `output` fails.
    pub async fn run<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        writeln!(output, "Welcome to newsbrief, the news summarizer")?;
        writeln!(
            output,
            "This program will fetch and summarize the latest news articles based on your keywords."
        )?;

        let mut state = State::CollectingInput;
        loop {
            state = match state {
                State::CollectingInput => match collect_query(input, output)? {
                    Some(query) => State::PresentingResults(query),
                    None => State::Terminated,
                },
                State::PresentingResults(query) => {
                    self.present_results(&query, output).await?;
                    if ask_to_continue(input, output)? {
                        State::CollectingInput
                    } else {
                        State::Terminated
                    }
                }
                State::Terminated => break,
            };
        }

        writeln!(output, "Thank you for using newsbrief. Goodbye!")?;
        Ok(())
    }

    /// Searches for `query` and presents every returned article in order.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing `output` fails.
    pub async fn present_results<W: Write>(&self, query: &SearchQuery, output: &mut W) -> Result<()> {
        let articles = match self.source.search(query).await {
            Ok(articles) => articles,
            Err(err) => {
                warn!("Search for {} failed: {err}", query.query_string());
                writeln!(output, "\nSearch failed: {err}")?;
                return Ok(());
            }
        };

        if articles.is_empty() {
            writeln!(output, "\nNo articles found.")?;
        }

        for article in articles {
            self.present_article(article, output).await?;
        }

        Ok(())
    }

    async fn present_article<W: Write>(&self, mut article: Article, output: &mut W) -> Result<()> {
        let scraped = match article.url.as_deref() {
            Some(url) => self.scraper.scrape(url).await,
            None => Ok(String::new()),
        };

        writeln!(
            output,
            "\nTitle: {}",
            article.title.as_deref().unwrap_or("No Title")
        )?;
        writeln!(
            output,
            "Description: {}",
            article.description.as_deref().unwrap_or_default()
        )?;

        match scraped {
            Ok(content) => article.content = Some(content),
            Err(err) => {
                warn!("Skipping content of {:?}: {err}", article.url);
                writeln!(output, "Content unavailable: {err}")?;
            }
        }

        let content = article.content.as_deref().unwrap_or_default();
        let preview: String = content.chars().take(PREVIEW_CHARS).collect();
        writeln!(output, "Content Preview: {preview}...")?;

        if !content.trim().is_empty() {
            match self.summarizer.summarize(content).await {
                Ok(Some(summary)) => writeln!(output, "Summary: {summary}")?,
                Ok(None) => info!("Nothing to summarize for {:?}", article.url),
                Err(err) => {
                    warn!("Summarization of {:?} failed: {err}", article.url);
                    writeln!(output, "Summary unavailable: {err}")?;
                }
            }
        }

        writeln!(output, "{SEPARATOR}")?;
        Ok(())
    }
}

/// Prints `prompt` and reads one line, `None` at end of input.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Asks for keywords, then for an article count, until both are valid.
fn collect_query<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<SearchQuery>> {
    let keywords = loop {
        let Some(answer) = read_answer(input, output, KEYWORDS_PROMPT)? else {
            return Ok(None);
        };
        let keywords = SearchQuery::parse_keywords(&answer);
        if !keywords.is_empty() {
            break keywords;
        }
        writeln!(output, "Please enter at least one keyword.")?;
    };

    let count = loop {
        let Some(answer) = read_answer(input, output, COUNT_PROMPT)? else {
            return Ok(None);
        };
        match answer.parse::<u32>() {
            Ok(count) if count > 0 => break count,
            _ => writeln!(output, "Please enter a positive whole number.")?,
        }
    };

    info!("Collected query {keywords:?} for {count} articles");
    Ok(Some(SearchQuery::new(keywords, count)))
}

fn ask_to_continue<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    Ok(read_answer(input, output, CONTINUE_PROMPT)?
        .is_some_and(|answer| answer.eq_ignore_ascii_case("yes")))
}
