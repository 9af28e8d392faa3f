// src/fetch/mod.rs

use serde_json::Value;
use thiserror::Error;

pub mod client;

pub use client::{lookup_url, EnrichmentClient};

/// Why a single identifier could not be looked up. Never fatal to a run.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot build lookup URL for {0:?}")]
    Url(String),
}

/// A source of organization profiles keyed by EIN.
pub trait Lookup {
    /// Fetch the `data` payload for `ein`.
    ///
    /// `Ok(None)` means the service answered but had no data section for it.
    fn lookup(&self, ein: &str) -> Result<Option<Value>, LookupError>;
}

/// Take the top-level `data` section out of a response body.
/// A `null` section counts as missing.
pub fn data_section(mut body: Value) -> Option<Value> {
    match body.get_mut("data").map(Value::take) {
        Some(Value::Null) | None => None,
        Some(data) => Some(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_section() {
        let body = json!({"data": {"summary": {"organization_name": "Acme"}}});
        assert_eq!(
            data_section(body),
            Some(json!({"summary": {"organization_name": "Acme"}}))
        );
    }

    #[test]
    fn test_data_section_missing() {
        assert_eq!(data_section(json!({"status": "not found"})), None);
        assert_eq!(data_section(json!({"data": null})), None);
        assert_eq!(data_section(json!(["data"])), None);
    }

    #[test]
    fn test_error_messages() {
        let err = LookupError::Server {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "server returned 500: boom");
    }
}
