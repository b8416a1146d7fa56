//! Daily motivation quote shown on the dashboard.
//!
//! Quotes come from an injected [`QuoteProvider`]. [`DailyQuote`] adds the
//! refresh policy: with `daily_refresh` set, the first quote fetched on a
//! given day is cached in a small JSON file and reused until the date
//! changes. A failing provider falls back to a second provider, normally the
//! built-in [`StaticQuoteProvider`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{QuoteError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn new(text: &str, author: &str) -> Self {
        Self {
            text: text.to_string(),
            author: author.to_string(),
        }
    }
}

/// Source of quotes.
pub trait QuoteProvider {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<Quote>;
}

/// When to go back to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePolicy {
    /// Reuse one quote per calendar day instead of fetching on every call.
    pub daily_refresh: bool,
}

impl Default for QuotePolicy {
    fn default() -> Self {
        Self {
            daily_refresh: true,
        }
    }
}

/// Rotates through a fixed list, one quote per day of the year.
#[derive(Debug, Clone)]
pub struct StaticQuoteProvider {
    quotes: Vec<Quote>,
    day: NaiveDate,
}

impl StaticQuoteProvider {
    /// Built-in quotes, picking the entry for `day`.
    pub fn for_day(day: NaiveDate) -> Self {
        Self::with_quotes(builtin_quotes(), day)
    }

    pub fn with_quotes(quotes: Vec<Quote>, day: NaiveDate) -> Self {
        Self { quotes, day }
    }
}

impl QuoteProvider for StaticQuoteProvider {
    fn name(&self) -> &str {
        "builtin"
    }

    fn fetch(&self) -> Result<Quote> {
        if self.quotes.is_empty() {
            return Err(QuoteError::Empty.into());
        }
        let index = self.day.ordinal0() as usize % self.quotes.len();
        Ok(self.quotes[index].clone())
    }
}

fn builtin_quotes() -> Vec<Quote> {
    vec![
        Quote::new("The secret of getting ahead is getting started.", "Mark Twain"),
        Quote::new("It always seems impossible until it's done.", "Nelson Mandela"),
        Quote::new("Well done is better than well said.", "Benjamin Franklin"),
        Quote::new("Action is the foundational key to all success.", "Pablo Picasso"),
        Quote::new("Quality means doing it right when no one is looking.", "Henry Ford"),
        Quote::new("Pendidikan adalah senjata paling ampuh untuk mengubah dunia.", "Nelson Mandela"),
        Quote::new("Nothing will work unless you do.", "Maya Angelou"),
    ]
}

/// Fetches a quote over HTTP.
///
/// Understands `{"content": .., "author": ..}`, `{"text": .., "author": ..}`
/// and the `[{"q": .., "a": ..}]` shape.
#[derive(Debug, Clone)]
pub struct HttpQuoteProvider {
    url: String,
    timeout: Duration,
}

impl HttpQuoteProvider {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            timeout,
        }
    }

    async fn fetch_async(&self) -> std::result::Result<Quote, QuoteError> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let resp = client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(QuoteError::HttpStatus {
                status: resp.status().as_u16(),
            });
        }
        let body: Value = resp.json().await?;
        parse_quote_body(&body)
    }
}

impl QuoteProvider for HttpQuoteProvider {
    fn name(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Quote> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(runtime.block_on(self.fetch_async())?)
    }
}

fn parse_quote_body(body: &Value) -> std::result::Result<Quote, QuoteError> {
    let entry = match body {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| QuoteError::Malformed("empty array".to_string()))?,
        other => other,
    };
    let text = ["content", "text", "q", "quote"]
        .iter()
        .find_map(|key| entry.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| QuoteError::Malformed(format!("no quote text in {entry}")))?;
    let author = ["author", "a"]
        .iter()
        .find_map(|key| entry.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .unwrap_or("Unknown");
    Ok(Quote::new(text, author))
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedQuote {
    date: NaiveDate,
    quote: Quote,
}

/// A provider plus fallback, cache file and refresh policy.
pub struct DailyQuote {
    provider: Box<dyn QuoteProvider>,
    fallback: Box<dyn QuoteProvider>,
    cache_path: PathBuf,
    policy: QuotePolicy,
}

impl DailyQuote {
    pub fn new(
        provider: Box<dyn QuoteProvider>,
        fallback: Box<dyn QuoteProvider>,
        cache_path: PathBuf,
        policy: QuotePolicy,
    ) -> Self {
        Self {
            provider,
            fallback,
            cache_path,
            policy,
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// The quote to show on `today`.
    ///
    /// Only quotes from the primary provider are cached, so a day that
    /// started on the fallback retries the provider on the next call.
    ///
    /// # Errors
    ///
    /// Returns an error when both providers fail, or when the cache file
    /// cannot be written.
    pub fn quote_for(&self, today: NaiveDate) -> Result<Quote> {
        if self.policy.daily_refresh {
            if let Some(cached) = self.read_cache() {
                if cached.date == today {
                    debug!(date = %today, "using cached quote");
                    return Ok(cached.quote);
                }
            }
        }

        match self.provider.fetch() {
            Ok(quote) => {
                if self.policy.daily_refresh {
                    if let Err(e) = self.write_cache(today, &quote) {
                        warn!(path = %self.cache_path.display(), error = %e, "could not write quote cache");
                    }
                }
                Ok(quote)
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "quote provider failed, using fallback");
                self.fallback.fetch()
            }
        }
    }

    fn read_cache(&self) -> Option<CachedQuote> {
        let content = std::fs::read_to_string(&self.cache_path).ok()?;
        match serde_json::from_str(&content) {
            Ok(cached) => Some(cached),
            Err(e) => {
                warn!(path = %self.cache_path.display(), error = %e, "ignoring unreadable quote cache");
                None
            }
        }
    }

    fn write_cache(&self, date: NaiveDate, quote: &Quote) -> Result<()> {
        if let Some(parent) = self.cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let cached = CachedQuote {
            date,
            quote: quote.clone(),
        };
        std::fs::write(&self.cache_path, serde_json::to_string_pretty(&cached)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counting {
        calls: Rc<Cell<u32>>,
        fail: bool,
    }

    impl QuoteProvider for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch(&self) -> Result<Quote> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(QuoteError::HttpStatus { status: 500 }.into());
            }
            Ok(Quote::new(&format!("quote #{}", self.calls.get()), "Tester"))
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn service(calls: &Rc<Cell<u32>>, fail: bool, dir: &Path, daily_refresh: bool) -> DailyQuote {
        DailyQuote::new(
            Box::new(Counting {
                calls: Rc::clone(calls),
                fail,
            }),
            Box::new(StaticQuoteProvider::with_quotes(
                vec![Quote::new("fallback", "Builtin")],
                day(1),
            )),
            dir.join("quote.json"),
            QuotePolicy { daily_refresh },
        )
    }

    #[test]
    fn daily_refresh_reuses_quote_within_a_day() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let daily = service(&calls, false, dir.path(), true);

        let first = daily.quote_for(day(15)).unwrap();
        let second = daily.quote_for(day(15)).unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);

        let next_day = daily.quote_for(day(16)).unwrap();
        assert_eq!(next_day.text, "quote #2");
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn without_daily_refresh_every_call_fetches() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let daily = service(&calls, false, dir.path(), false);

        daily.quote_for(day(15)).unwrap();
        daily.quote_for(day(15)).unwrap();
        assert_eq!(calls.get(), 2);
        assert!(!daily.cache_path().exists());
    }

    #[test]
    fn failing_provider_falls_back_without_caching() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Rc::new(Cell::new(0));
        let daily = service(&calls, true, dir.path(), true);

        let quote = daily.quote_for(day(15)).unwrap();
        assert_eq!(quote.text, "fallback");
        assert!(!daily.cache_path().exists());
        daily.quote_for(day(15)).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn unwritable_cache_still_returns_fetched_quote() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let calls = Rc::new(Cell::new(0));
        let daily = service(&calls, false, &blocker, true);

        let quote = daily.quote_for(day(15)).unwrap();
        assert_eq!(quote.text, "quote #1");
        assert!(!daily.cache_path().exists());
    }

    #[test]
    fn corrupt_cache_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quote.json"), "{not json").unwrap();
        let calls = Rc::new(Cell::new(0));
        let daily = service(&calls, false, dir.path(), true);
        assert_eq!(daily.quote_for(day(15)).unwrap().text, "quote #1");
    }

    #[test]
    fn static_provider_rotates_by_day() {
        let quotes = vec![Quote::new("a", "x"), Quote::new("b", "y")];
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(StaticQuoteProvider::with_quotes(quotes.clone(), jan1).fetch().unwrap().text, "a");
        assert_eq!(StaticQuoteProvider::with_quotes(quotes, jan2).fetch().unwrap().text, "b");
        assert!(StaticQuoteProvider::with_quotes(Vec::new(), jan1).fetch().is_err());
        assert!(StaticQuoteProvider::for_day(jan1).fetch().is_ok());
    }

    #[test]
    fn parses_known_response_shapes() {
        let quotable = serde_json::json!({"content": "Keep going.", "author": "Someone"});
        assert_eq!(parse_quote_body(&quotable).unwrap(), Quote::new("Keep going.", "Someone"));

        let zen = serde_json::json!([{"q": "Be here.", "a": "Zen"}]);
        assert_eq!(parse_quote_body(&zen).unwrap().author, "Zen");

        let anonymous = serde_json::json!({"text": "Hi"});
        assert_eq!(parse_quote_body(&anonymous).unwrap().author, "Unknown");

        assert!(parse_quote_body(&serde_json::json!([])).is_err());
        assert!(parse_quote_body(&serde_json::json!({"author": "Nobody"})).is_err());
    }

    #[test]
    fn http_provider_reads_remote_quote() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/random")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":"Work hard.","author":"Kartini"}"#)
            .create();

        let provider = HttpQuoteProvider::new(&format!("{}/random", server.url()), Duration::from_secs(5));
        let quote = provider.fetch().unwrap();
        assert_eq!(quote, Quote::new("Work hard.", "Kartini"));
        mock.assert();
    }

    #[test]
    fn http_provider_surfaces_status_errors() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/random").with_status(503).create();

        let provider = HttpQuoteProvider::new(&format!("{}/random", server.url()), Duration::from_secs(5));
        let err = provider.fetch().unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
