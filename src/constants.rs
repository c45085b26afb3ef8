pub const NEWS_API_KEY_ENV_NAME: &str = "NEWS_API_KEY";
pub const NEWS_API_URL_ENV_NAME: &str = "NEWS_API_URL";
pub const MODEL_ENV_NAME: &str = "NEWSBRIEF_MODEL";
pub const MODEL_API_KEY_ENV_NAME: &str = "NEWSBRIEF_MODEL_API_KEY";
pub const TOKENIZER_ENV_NAME: &str = "NEWSBRIEF_TOKENIZER";

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_MODEL: &str = "ollama://llama3.2";
pub const DEFAULT_TOKENIZER: &str = "facebook/bart-large-cnn";

/// NewsAPI rejects larger `pageSize` values.
pub const MAX_PAGE_SIZE: u32 = 100;

pub const DEFAULT_CHUNK_TOKENS: usize = 512;
pub const SUMMARY_MAX_WORDS: usize = 150;
pub const SUMMARY_MIN_WORDS: usize = 50;
pub const SUMMARY_LENGTH_MARGIN: usize = 10;
/// Generous token allowance per requested summary word.
pub const RESPONSE_TOKENS_PER_WORD: usize = 2;

pub const PREVIEW_CHARS: usize = 100;
pub const SEPARATOR: &str = "---------------";

pub(crate) const USER_AGENT: &str = "newsbrief/0.1";

pub(crate) const THINK_STRIPPER: &str = r"<think>[\s\S]*</think>\s*";

pub(crate) const DEFAULT_PROMPT_TEMPLATE: &str = r#"
Summarize the following news article excerpt.
Write between {min} and {max} words.
Your answer should contain only the summary, in the language of the excerpt.
Do not add facts that are not in the excerpt.
Excerpt:
{text}"#;
