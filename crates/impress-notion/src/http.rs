//! Native transport using reqwest

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use crate::config::NotionConfig;
use crate::error::ConfigError;
use crate::property::{Properties, QueryResponse, RawPage};
use crate::query::QueryArgs;
use crate::transport::{PageTransport, TransportError};

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

pub struct HttpTransport {
    client: Client,
    base_url: Url,
    token: String,
    api_version: String,
}

impl HttpTransport {
    pub fn new(config: &NotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("impress-notion/0.1")
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "client".to_string(),
                message: e.to_string(),
            })?;

        let base_url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "base_url".to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                message: format!("{} cannot hold endpoint paths", config.base_url),
            });
        }

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
            api_version: config.api_version.clone(),
        })
    }

    /// Append `segments` to the base path. Each segment is percent-encoded,
    /// so ids containing `/` stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::RequestFailed {
                message: format!("Base URL cannot hold a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, TransportError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.api_version)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::RequestFailed {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimited);
        }

        let body = response.text().await.map_err(|e| TransportError::ParseError {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let error: ApiErrorBody =
                serde_json::from_str(&body).unwrap_or_else(|_| ApiErrorBody {
                    code: String::new(),
                    message: body.clone(),
                });
            return Err(TransportError::Api {
                status: status.as_u16(),
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::ParseError {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PageTransport for HttpTransport {
    async fn create_page(
        &self,
        database_id: &str,
        properties: Properties,
    ) -> Result<RawPage, TransportError> {
        let url = self.endpoint(&["pages"])?;
        let body = json!({
            "parent": { "database_id": database_id },
            "properties": properties,
        });
        self.send(self.client.post(url).json(&body)).await
    }

    async fn query_database(
        &self,
        database_id: &str,
        args: &QueryArgs,
    ) -> Result<QueryResponse, TransportError> {
        let url = self.endpoint(&["databases", database_id, "query"])?;
        self.send(self.client.post(url).json(args)).await
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<RawPage, TransportError> {
        let url = self.endpoint(&["pages", page_id])?;
        self.send(self.client.get(url)).await
    }
}
