use crate::error::FetchError;
use rand::Rng;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// User agents to rotate through to avoid bot detection
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Linux; Android 10; SM-G973F) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
];

/// Anything that can turn a URL into raw HTML.
///
/// The orchestrator is generic over this seam so the domain-fallback logic
/// can be exercised against canned documents in tests.
#[allow(async_fn_in_trait)]
pub trait HtmlSource {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher with a bounded timeout and browser-like headers.
///
/// There is deliberately no retry loop here: a failed fetch is a signal for
/// the orchestrator to advance to the next domain, not to hammer the same
/// one (see `scraper::Scraper`).
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .parse()
                .unwrap(),
        );
        headers.insert("Accept-Language", "id,en-US;q=0.5".parse().unwrap());
        headers.insert("Connection", "keep-alive".parse().unwrap());
        headers.insert("Upgrade-Insecure-Requests", "1".parse().unwrap());

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(Self::random_user_agent())
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Get a random user agent from the pool
    fn random_user_agent() -> &'static str {
        let mut rng = rand::thread_rng();
        let index = rng.gen_range(0..USER_AGENTS.len());
        USER_AGENTS[index]
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl HtmlSource for HttpClient {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", Self::random_user_agent())
            .send()
            .await
            .map_err(FetchError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response.text().await.map_err(FetchError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_user_agent() {
        let ua1 = HttpClient::random_user_agent();
        let ua2 = HttpClient::random_user_agent();
        assert!(USER_AGENTS.contains(&ua1));
        assert!(USER_AGENTS.contains(&ua2));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new(Duration::from_secs(10));
        assert!(client.is_ok());
    }
}
