use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Result, TldlError},
    types::{SummarizeRequest, SummarizeResponse},
};

#[cfg(test)]
use mockall::automock;

/// The analysis service as seen by the views.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SummarizeClient: Send + Sync + 'static {
    /// `POST /summarize`. Any non-2xx status is an error, its body is ignored.
    async fn summarize(&self, request: &SummarizeRequest) -> Result<SummarizeResponse>;
}

#[derive(Debug, Deserialize)]
struct Welcome {
    message: String,
}

/// `reqwest` implementation talking to a running service.
#[derive(Debug, Clone)]
pub struct HttpSummarizeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpSummarizeClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path).map_err(|e| TldlError::InvalidConfig {
            key: crate::config::API_URL_ENV,
            reason: format!("cannot join {path:?} onto {base}: {e}"),
        })
    }

    /// `GET /`, the service's welcome message. Used as a reachability probe.
    pub async fn welcome(&self) -> Result<String> {
        let url = self.endpoint("")?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TldlError::Status {
                status: response.status().as_u16(),
            });
        }
        Ok(response.json::<Welcome>().await?.message)
    }
}

#[async_trait]
impl SummarizeClient for HttpSummarizeClient {
    async fn summarize(&self, request: &SummarizeRequest) -> Result<SummarizeResponse> {
        let url = self.endpoint("summarize")?;
        debug!(%url, youtube_url = %request.youtube_url, has_query = request.query.is_some(), "dispatching summarize request");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TldlError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.json::<serde_json::Value>().await?;
        Ok(SummarizeResponse::from_json(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path() {
        let client = HttpSummarizeClient::new(Url::parse("https://tldl.example.com/api").unwrap());
        assert_eq!(
            client.endpoint("summarize").unwrap().as_str(),
            "https://tldl.example.com/api/summarize"
        );

        let client = HttpSummarizeClient::new(Url::parse("http://127.0.0.1:8000").unwrap());
        assert_eq!(
            client.endpoint("summarize").unwrap().as_str(),
            "http://127.0.0.1:8000/summarize"
        );
        assert_eq!(client.endpoint("").unwrap().as_str(), "http://127.0.0.1:8000/");
    }
}
