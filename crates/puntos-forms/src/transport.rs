//! Submission transport
//!
//! The engine hands serialized forms to a [`Transport`]. [`HttpTransport`]
//! is the production implementation; tests swap in their own.

use crate::config::HttpConfig;
use crate::error::SubmitError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Sends a form body to its action
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `action` and return the decoded reply.
    /// Any non-2xx status is an error.
    async fn post_json(&self, action: &str, body: &Value) -> Result<Value, SubmitError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        let base_url = config
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .context("Invalid http.base_url")?;

        Ok(Self { client, base_url })
    }

    /// Resolve a form action the way the browser resolves `form.action`:
    /// relative to the base, with an empty action meaning the base itself.
    pub fn resolve(&self, action: &str) -> Result<Url, SubmitError> {
        let resolved = match &self.base_url {
            Some(base) => base.join(action),
            None => Url::parse(action),
        };
        resolved.map_err(|e| SubmitError::InvalidUrl {
            url: action.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, action: &str, body: &Value) -> Result<Value, SubmitError> {
        let url = self.resolve(action)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SubmitError::Decode(e.to_string()))
    }
}
