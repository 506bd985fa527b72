//! HTTP client for the proxy-list feed.
//!
//! No view awareness — just fetches and normalizes the JSON document
//! via reqwest. Every request defeats intermediary caches with a
//! `_=<millis>` query parameter and `Cache-Control: no-store`.

use reqwest::Client;
use serde_json::Value;

use crate::model::{self, ProxyRecord};

/// Errors from feed operations. There is deliberately no retry here —
/// the next scheduled or manual refresh is the only recovery path.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned status {status}")]
    Status { status: u16 },

    #[error("malformed feed: {0}")]
    Malformed(String),
}

/// Fetches the feed URL and hands back normalized records.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: String) -> Self {
        Self {
            http: Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One fetch-and-normalize cycle. The caller fully replaces its
    /// record set with the result — last response wins.
    pub async fn fetch(&self) -> Result<Vec<ProxyRecord>, FeedError> {
        let sep = if self.url.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{sep}_={}",
            self.url,
            chrono::Utc::now().timestamp_millis()
        );

        let response = self
            .http
            .get(&url)
            .header("cache-control", "no-store")
            .send()
            .await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(FeedError::Status { status });
        }

        let doc: Value = response
            .json()
            .await
            .map_err(|e| FeedError::Malformed(format!("failed to parse feed body: {e}")))?;

        parse_document(&doc)
    }
}

/// Normalize a parsed feed document. Split out of `fetch` so the
/// tolerant-parsing path is testable without a server.
pub fn parse_document(doc: &Value) -> Result<Vec<ProxyRecord>, FeedError> {
    model::records_from_document(doc)
        .ok_or_else(|| FeedError::Malformed("expected a top-level JSON array".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_record_objects() {
        let doc = json!([
            {"ip": "1.1.1.1", "protocol": "HTTP", "status": "Active", "latency_ms": 12},
            {"ip": "2.2.2.2", "protocol": "SOCKS5", "status": "Inactive"}
        ]);
        let records = parse_document(&doc).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].latency_ms, Some(12.0));
        assert!(!records[1].is_active());
    }

    #[test]
    fn parses_flat_string_list() {
        let doc = json!(["1.1.1.1:8080", "2.2.2.2"]);
        let records = parse_document(&doc).unwrap();
        assert_eq!(records[0].port, Some(8080));
        assert_eq!(records[1].protocol, "HTTP");
    }

    #[test]
    fn rejects_non_array_document() {
        let err = parse_document(&json!({"proxies": []})).unwrap_err();
        assert!(matches!(err, FeedError::Malformed(_)));
    }
}
