use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::config::IdentityConfig;

use super::error::IdentityError;
use super::IdentityService;

/// HTTP client for the cloud identity service.
///
/// Retry, backoff and auth against the upstream are the upstream deployment's
/// concern; this client issues a single request per lookup.
pub struct HttpIdentityService {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpIdentityService {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| IdentityError::InvalidBaseUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(IdentityError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        Ok(Self { base_url, http })
    }

    // Segments are pushed individually so usernames with reserved characters
    // stay a single percent-encoded path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, IdentityError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| IdentityError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn get_user_permissions(&self, username: &str) -> Result<Value, IdentityError> {
        let url = self.endpoint(&["users", username, "permissions"])?;
        tracing::debug!("looking up permissions at {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<Value>()
                .await
                .map_err(|e| IdentityError::InvalidPayload(e.to_string())),
            reqwest::StatusCode::NOT_FOUND => Err(IdentityError::UserNotFound(username.to_string())),
            status => Err(IdentityError::UpstreamStatus { status: status.as_u16() }),
        }
    }

    async fn health_check(&self) -> Result<(), IdentityError> {
        let url = self.endpoint(&["health"])?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(IdentityError::UpstreamStatus { status: response.status().as_u16() })
        }
    }
}
