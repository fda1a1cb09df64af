use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, Response};
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::api::GitHubApi;
use crate::github::urls::ApiUrls;

pub struct GitHubClient {
    client: Client,
    urls: ApiUrls,
    authenticated: bool,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = config.github_token.as_deref() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("portfolio-analyzer/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            urls: ApiUrls::new(&config.api_base_url),
            authenticated: config.github_token.is_some(),
        })
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn fetch_resource(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let retry_after = retry_after_secs(&response);
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("GET {} failed with {}: {}", url, status, body);
            return Err(status_error(status, retry_after, url));
        }

        Ok(response.json().await?)
    }

    async fn fetch_page(
        &self,
        url: &str,
        params: &[(String, String)],
        page: u32,
        per_page: u32,
    ) -> Result<Option<Vec<Value>>> {
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Page {} of {} returned {}", page, url, response.status());
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }

    fn urls(&self) -> &ApiUrls {
        &self.urls
    }

    fn has_credential(&self) -> bool {
        self.authenticated
    }
}

/// Maps a response status onto the error taxonomy; 2xx is `Ok`.
pub fn classify_status(status: u16, retry_after: Option<u64>, url: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(status_error(status, retry_after, url))
    }
}

fn status_error(status: u16, retry_after: Option<u64>, url: &str) -> Error {
    match status {
        404 => Error::NotFound(url.to_string()),
        403 => Error::RateLimited { retry_after },
        other => Error::Upstream {
            status: other,
            message: format!("GET {} failed", url),
        },
    }
}

fn retry_after_secs(response: &Response) -> Option<u64> {
    let reset = response
        .headers()
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())?;

    let now = Utc::now().timestamp();
    Some(reset.saturating_sub(now).max(0) as u64)
}
