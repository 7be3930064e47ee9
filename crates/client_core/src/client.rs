use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    error::ApiError,
    protocol::{encode_route, EncodeResponse, SubmissionPayload},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Error encoding text: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Error encoding text: HTTP error: status: {status}{}", server_detail(.detail))]
    Server {
        status: StatusCode,
        detail: Option<ApiError>,
    },
    #[error("Error encoding text: malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

fn server_detail(detail: &Option<ApiError>) -> String {
    match detail {
        Some(err) => format!(" ({})", err.message),
        None => String::new(),
    }
}

impl EncodeError {
    fn server(status: StatusCode, body: &[u8]) -> Self {
        Self::Server {
            status,
            detail: serde_json::from_slice(body).ok(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid server url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Remote encoding endpoint. The cipher itself lives behind this seam.
#[async_trait]
pub trait EncodeService: Send + Sync {
    async fn encode(&self, payload: &SubmissionPayload) -> Result<String, EncodeError>;
}

#[async_trait]
impl<T: EncodeService + ?Sized> EncodeService for Arc<T> {
    async fn encode(&self, payload: &SubmissionPayload) -> Result<String, EncodeError> {
        (**self).encode(payload).await
    }
}

#[derive(Debug, Clone)]
pub struct EncodeClient {
    http: Client,
    endpoint: Url,
}

impl EncodeClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let endpoint = encode_endpoint(server_url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl EncodeService for EncodeClient {
    async fn encode(&self, payload: &SubmissionPayload) -> Result<String, EncodeError> {
        debug!(endpoint = %self.endpoint, fields = payload.len(), "posting encode request");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(EncodeError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(EncodeError::Transport)?;
        if !status.is_success() {
            return Err(EncodeError::server(status, &body));
        }

        let decoded: EncodeResponse = serde_json::from_slice(&body).map_err(EncodeError::Decode)?;
        Ok(decoded.into_ciphertext())
    }
}

/// Joins the encode route onto `server_url`, keeping any path prefix the server is mounted at.
pub fn encode_endpoint(server_url: &str) -> Result<Url, ClientBuildError> {
    let invalid = |source| ClientBuildError::InvalidUrl {
        url: server_url.to_string(),
        source,
    };
    let trimmed = server_url.trim();
    let base = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&base)
        .and_then(|base| base.join(encode_route().trim_start_matches('/')))
        .map_err(invalid)
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
