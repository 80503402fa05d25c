use reqwest::{header, Client, Method, Url};
use serde_json::Value;
use thiserror::Error;

use crate::config::ApiConfig;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

/// Thin JSON client over the events backend. Every call shares one timeout
/// and surfaces failures as [`GatewayError`].
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("event-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, GatewayError> {
        let mut url = Url::parse(&self.config.endpoint(endpoint))
            .map_err(|err| GatewayError::InvalidUrl(err.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        self.send(Method::GET, url, None).await
    }

    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, GatewayError> {
        let url = self.url(endpoint)?;
        self.send(Method::POST, url, Some(body)).await
    }

    pub async fn put(&self, endpoint: &str, body: &Value) -> Result<Value, GatewayError> {
        let url = self.url(endpoint)?;
        self.send(Method::PUT, url, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, GatewayError> {
        let url = self.url(endpoint)?;
        self.send(Method::DELETE, url, None).await
    }

    fn url(&self, endpoint: &str) -> Result<Url, GatewayError> {
        Url::parse(&self.config.endpoint(endpoint))
            .map_err(|err| GatewayError::InvalidUrl(err.to_string()))
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value, GatewayError> {
        tracing::debug!(%method, %url, "api request");

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            let err = GatewayError::from(err);
            tracing::warn!(%method, %url, error = %err, "api request failed");
            err
        })?;

        let status = response.status();
        let text = response.text().await.map_err(GatewayError::from)?;

        if !status.is_success() {
            tracing::warn!(%method, %url, status = status.as_u16(), "api returned error status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: Value =
            serde_json::from_str(&text).map_err(|err| GatewayError::Decode(err.to_string()))?;
        tracing::debug!(%method, %url, "api response decoded");
        Ok(value)
    }
}
