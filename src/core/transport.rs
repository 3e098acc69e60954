use crate::core::discovery::{DEFAULT_TIMEOUT_SECS, TIMEOUT_MARGIN};
use crate::domain::ports::Transport;
use crate::utils::error::{BridgeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// JSON-over-HTTP transport bound to one bridge address.
pub struct HttpTransport {
    client: Client,
    base: Url,
    default_timeout: Duration,
}

impl HttpTransport {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::with_timeout(host, port, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(host: &str, port: u16, default_timeout: Duration) -> Result<Self> {
        let base = Url::parse(&format!("http://{}:{}/", host, port))?;
        Ok(Self {
            client: Client::new(),
            base,
            default_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().copied());
        }
        Ok(url)
    }

    /// The bridge wraps every response in `{ok, ...}`. A body with
    /// `ok != true` is only an error when the HTTP status also says so;
    /// callers see 2xx bodies unchanged.
    async fn unwrap_envelope(
        method: &str,
        path: &str,
        response: reqwest::Response,
    ) -> Result<Value> {
        let status = response.status();
        let body: Value = response.json().await?;

        let ok = body.get("ok").and_then(Value::as_bool) == Some(true);
        if !ok && status.as_u16() >= 400 {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            return Err(BridgeError::ApiError {
                method: method.to_string(),
                path: path.to_string(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.endpoint(path, query)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.default_timeout + TIMEOUT_MARGIN)
            .send()
            .await?;

        Self::unwrap_envelope("GET", path, response).await
    }

    async fn post(&self, path: &str, body: Value, timeout: Duration) -> Result<Value> {
        let url = self.endpoint(path, &[])?;
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(&body)
            .timeout(timeout)
            .send()
            .await?;

        Self::unwrap_envelope("POST", path, response).await
    }
}
