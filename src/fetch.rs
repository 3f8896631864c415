//! Page fetching with exponential backoff retry logic.
//!
//! # Architecture
//!
//! - [`FetchAsync`]: Core trait defining an async page download
//! - [`HttpFetcher`]: `reqwest` client sending browser-like headers
//! - [`RetryFetch`]: Decorator that adds retry logic to any `FetchAsync` implementation
//!
//! # Retry Strategy
//!
//! - Exponential backoff starting at the configured base delay
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use rand::{Rng, rng};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, USER_AGENT};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, instrument, warn};

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Trait for async page downloads.
pub trait FetchAsync {
    /// Download `url` and return the response body as text.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// Plain HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(StdDuration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }

    async fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        resp.text().await
    }
}

impl FetchAsync for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let t0 = Instant::now();
        let res = self.get_text(url).await;

        match res {
            Ok(body) => Ok(body),
            Err(e) => {
                warn!(elapsed_ms = t0.elapsed().as_millis(), error = %e, "HTTP fetch failed");
                Err(Box::new(e))
            }
        }
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchAsync`] implementation.
///
/// The delay between retries follows this formula:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    /// Backoff before retry number `attempt` (1-based), without jitter.
    fn backoff(&self, attempt: usize) -> StdDuration {
        let shift = (attempt.saturating_sub(1)).min(31) as u32;
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchAsync for RetryFetch<T>
where
    T: FetchAsync,
{
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis(),
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = self.backoff(attempt) + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_total = total_dt.as_millis(),
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails `failures` times, then returns the URL as the body.
    struct Flaky {
        failures: usize,
        calls: AtomicUsize,
    }

    impl FetchAsync for Flaky {
        async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(format!("failure {}", n).into())
            } else {
                Ok(url.to_string())
            }
        }
    }

    fn flaky(failures: usize) -> Flaky {
        Flaky {
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let fetcher = RetryFetch::new(flaky(2), 3, StdDuration::from_millis(1));
        let body = fetcher.fetch("https://example.com").await.unwrap();
        assert_eq!(body, "https://example.com");
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up() {
        let fetcher = RetryFetch::new(flaky(10), 2, StdDuration::from_millis(1));
        let err = fetcher.fetch("https://example.com").await.unwrap_err();
        assert_eq!(err.to_string(), "failure 2");
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let fetcher = RetryFetch::new(flaky(0), 10, StdDuration::from_secs(1));
        assert_eq!(fetcher.backoff(1), StdDuration::from_secs(1));
        assert_eq!(fetcher.backoff(2), StdDuration::from_secs(2));
        assert_eq!(fetcher.backoff(4), StdDuration::from_secs(8));
        assert_eq!(fetcher.backoff(6), StdDuration::from_secs(30));
        assert_eq!(fetcher.backoff(60), StdDuration::from_secs(30));
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
    }
}
