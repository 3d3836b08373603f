/// Errors that can occur while fetching a page from a domain
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("network failure: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Operation-level errors surfaced to callers.
///
/// Per-domain and per-node failures are contained inside the pipeline;
/// only total exhaustion for detail/pages operations reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("no domain could supply data for {0}")]
    NoDomainAvailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_domain_message() {
        let e = ScrapeError::NoDomainAvailable("/manga/test".to_string());
        assert!(e.to_string().contains("/manga/test"));
    }

    #[test]
    fn test_http_status_message() {
        let e = FetchError::HttpStatus(503);
        assert_eq!(e.to_string(), "HTTP status 503");
    }
}
