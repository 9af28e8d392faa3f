// src/fetch/client.rs

use anyhow::{Context, Result};
use reqwest::{blocking::Client, header::ACCEPT};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::{data_section, Lookup, LookupError};
use crate::config::Config;

/// Header carrying the API credential.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Subscription-Key";

/// Longest slice of an error body kept in a `LookupError::Server`.
const MAX_ERROR_BODY: usize = 200;

/// Blocking client for the Candid premier profile endpoint.
pub struct EnrichmentClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl EnrichmentClient {
    /// Build a client with its own connection pool and the given request timeout.
    pub fn new(base_url: Url, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("candid-enrich/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            config.timeout,
        )
    }

    /// Wrap an already configured `reqwest` client.
    pub fn with_client(client: Client, base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// `{base}/{ein}`, with the EIN encoded as a single path segment.
pub fn lookup_url(base: &Url, ein: &str) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments.pop_if_empty().push(ein);
    }
    Some(url)
}

impl EnrichmentClient {
    /// GET the full profile response for `ein` and parse it as JSON.
    #[instrument(level = "debug", skip(self))]
    pub fn fetch_body(&self, ein: &str) -> Result<Value, LookupError> {
        let url =
            lookup_url(&self.base_url, ein).ok_or_else(|| LookupError::Url(ein.to_string()))?;
        debug!(%url, "GET profile");

        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(SUBSCRIPTION_KEY_HEADER, self.api_key.as_str())
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(LookupError::Server {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Lookup for EnrichmentClient {
    fn lookup(&self, ein: &str) -> Result<Option<Value>, LookupError> {
        self.fetch_body(ein).map(data_section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http_client, spawn};
    use serde_json::json;
    use std::{thread, time::Duration};

    fn client_for(base: &Url, timeout: Duration) -> EnrichmentClient {
        EnrichmentClient::with_client(http_client(timeout), base.clone(), "secret")
    }

    #[test]
    fn test_lookup_url() {
        let base = Url::parse("https://api.candid.org/premier/v3").unwrap();
        assert_eq!(
            lookup_url(&base, "123456789").unwrap().as_str(),
            "https://api.candid.org/premier/v3/123456789"
        );

        let slashed = Url::parse("https://api.candid.org/premier/v3/").unwrap();
        assert_eq!(
            lookup_url(&slashed, "123456789").unwrap().as_str(),
            "https://api.candid.org/premier/v3/123456789"
        );

        let bare = Url::parse("http://localhost:8080").unwrap();
        assert_eq!(
            lookup_url(&bare, "12-3456789").unwrap().as_str(),
            "http://localhost:8080/12-3456789"
        );
    }

    #[test]
    fn test_lookup_url_encodes_segment() {
        let base = Url::parse("https://api.candid.org/premier/v3").unwrap();
        let url = lookup_url(&base, "12/34 56").unwrap();
        assert_eq!(url.path(), "/premier/v3/12%2F34%2056");
    }

    #[test]
    fn test_lookup_sends_headers_and_parses_data() {
        let server = spawn(|_| {
            (
                200,
                json!({"data": {"summary": {"organization_name": "Acme Foundation"}}})
                    .to_string(),
            )
        });
        let client = client_for(&server.base_url, Duration::from_secs(5));

        let data = client.lookup("123456789").unwrap().unwrap();
        assert_eq!(data["summary"]["organization_name"], "Acme Foundation");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let head = requests[0].to_lowercase();
        assert!(head.starts_with("get /premier/v3/123456789 http/1.1"));
        assert!(head.contains("subscription-key: secret"));
        assert!(head.contains("accept: application/json"));
    }

    #[test]
    fn test_lookup_without_data_is_none() {
        let server = spawn(|_| (200, r#"{"status": "not found"}"#.to_string()));
        let client = client_for(&server.base_url, Duration::from_secs(5));
        assert!(client.lookup("999999999").unwrap().is_none());
    }

    #[test]
    fn test_fetch_body_keeps_whole_response() {
        let server = spawn(|_| {
            (
                200,
                json!({"code": 200, "message": "ok", "data": {"summary": {"state": "IL"}}})
                    .to_string(),
            )
        });
        let client = client_for(&server.base_url, Duration::from_secs(5));

        let body = client.fetch_body("123456789").unwrap();
        assert_eq!(body["message"], "ok");
        assert_eq!(body["data"]["summary"]["state"], "IL");
    }

    #[test]
    fn test_server_error_is_failure() {
        let server = spawn(|_| (500, "internal error".to_string()));
        let client = client_for(&server.base_url, Duration::from_secs(5));
        match client.lookup("111111111") {
            Err(LookupError::Server { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_failure() {
        let server = spawn(|_| (200, "<html>oops</html>".to_string()));
        let client = client_for(&server.base_url, Duration::from_secs(5));
        assert!(matches!(
            client.lookup("123456789"),
            Err(LookupError::Json(_))
        ));
    }

    #[test]
    fn test_timeout_is_failure() {
        let server = spawn(|_| {
            thread::sleep(Duration::from_secs(2));
            (200, "{}".to_string())
        });
        let client = client_for(&server.base_url, Duration::from_millis(200));
        assert!(matches!(
            client.lookup("123456789"),
            Err(LookupError::Http(_))
        ));
    }

    #[test]
    fn test_connection_refused_is_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let base = Url::parse(&format!("http://{}/premier/v3", addr)).unwrap();
        let client = client_for(&base, Duration::from_secs(2));
        assert!(matches!(
            client.lookup("123456789"),
            Err(LookupError::Http(_))
        ));
    }
}
