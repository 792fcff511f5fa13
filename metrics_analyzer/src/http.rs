use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AnalyzerError, AnalyzerResult};

/// JSON-over-HTTP client bound to one base url.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> AnalyzerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AnalyzerError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GETs `path` and decodes the body. An empty body decodes as `{}`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AnalyzerResult<T> {
        let url = self.url(path);
        debug!(url = url.as_str(), "GET");

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| AnalyzerError::Http {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzerError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| AnalyzerError::Http {
            url: url.clone(),
            source,
        })?;
        decode_body(&url, &body)
    }
}

pub(crate) fn decode_body<T: DeserializeOwned>(url: &str, body: &str) -> AnalyzerResult<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|source| AnalyzerError::Decode {
        url: url.to_string(),
        source,
    })
}
