use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use url::Url;

use crate::{ContentPage, FailureKind, FetchError};

const API_KEY_HEADER: &str = "X-MICROCMS-API-KEY";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Origin to send requests to instead of `https://{domain}.microcms.io`.
    pub base_url: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 32 * 1024 * 1024,
            base_url: None,
        }
    }
}

/// A paginated list endpoint of the content API.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<ContentPage, FetchError>;
}

/// microCMS list-endpoint client.
#[derive(Debug, Clone)]
pub struct MicroCmsClient {
    client: reqwest::Client,
    endpoint_url: Url,
    api_key: String,
    max_bytes: u64,
}

impl MicroCmsClient {
    pub fn new(
        service_domain: &str,
        api_key: &str,
        endpoint: &str,
        settings: ClientSettings,
    ) -> Result<Self, FetchError> {
        let service_domain = service_domain.trim();
        let api_key = api_key.trim();
        if service_domain.is_empty() || api_key.is_empty() {
            return Err(FetchError::new(
                FailureKind::MissingCredentials,
                "service domain and api key are required",
            ));
        }

        let base = settings
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://{service_domain}.microcms.io"));
        let endpoint_url = Url::parse(&base)
            .and_then(|base| base.join(&format!("api/v1/{}", endpoint.trim_matches('/'))))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            endpoint_url,
            api_key: api_key.to_string(),
            max_bytes: settings.max_bytes,
        })
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }

    fn page_url(&self, offset: usize, limit: usize) -> Url {
        let mut url = self.endpoint_url.clone();
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }
}

#[async_trait::async_trait]
impl ContentSource for MicroCmsClient {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<ContentPage, FetchError> {
        let url = self.page_url(offset, limit);
        engine_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_defaults_to_service_domain() {
        let client =
            MicroCmsClient::new("demo", "key", "articles", ClientSettings::default()).unwrap();
        assert_eq!(
            client.endpoint_url().as_str(),
            "https://demo.microcms.io/api/v1/articles"
        );
        assert_eq!(
            client.page_url(200, 100).as_str(),
            "https://demo.microcms.io/api/v1/articles?offset=200&limit=100"
        );
    }

    #[test]
    fn base_url_overrides_service_domain() {
        let settings = ClientSettings {
            base_url: Some("http://127.0.0.1:9000".to_string()),
            ..ClientSettings::default()
        };
        let client = MicroCmsClient::new("demo", "key", "/blogs/", settings).unwrap();
        assert_eq!(
            client.endpoint_url().as_str(),
            "http://127.0.0.1:9000/api/v1/blogs"
        );
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let err = MicroCmsClient::new("demo", "  ", "articles", ClientSettings::default())
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::MissingCredentials);
    }
}
