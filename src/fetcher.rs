use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use bytes::Bytes;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use url::Url;

use crate::error::FetchError;
use crate::progress::Progress;

#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    semaphore: Arc<Semaphore>,
    progress: Option<Arc<Progress>>,
}

impl Fetcher {
    pub fn new(
        user_agent: &str,
        max_concurrency: usize,
        timeout: Duration,
        progress: Option<Arc<Progress>>,
    ) -> anyhow::Result<Self> {
        // Anything other than 200 is a failure, so redirects must reach us as-is.
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(max_concurrency.max(1))),
            progress,
        })
    }

    /// GET `url` and decode the body as JSON. Only `200 OK` counts as success.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let bytes = self.get_bytes(url.clone()).await?;
        serde_json::from_slice(&bytes).map_err(|source| {
            tracing::warn!(%url, error = %source, "response body did not decode");
            FetchError::Decode { url, source }
        })
    }

    async fn get_bytes(&self, url: Url) -> Result<Bytes, FetchError> {
        // The semaphore is never closed.
        let _permit = self.semaphore.acquire().await.ok();

        if let Some(p) = &self.progress {
            p.http_start(&url);
        }
        let res = self.send(&url).await;
        if let Some(p) = &self.progress {
            match &res {
                Ok(bytes) => p.http_ok(&url, bytes.len()),
                Err(_) => p.http_err(&url),
            }
        }
        res
    }

    async fn send(&self, url: &Url) -> Result<Bytes, FetchError> {
        tracing::debug!(%url, "GET");
        let resp = self.client.get(url.clone()).send().await.map_err(|source| {
            tracing::warn!(%url, error = %source, "request failed");
            FetchError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = resp.status();
        if status != StatusCode::OK {
            let status_text = status.canonical_reason().unwrap_or("").to_string();
            tracing::warn!(%url, status = status.as_u16(), %status_text, "unexpected status");
            return Err(FetchError::Api {
                url: url.clone(),
                status: status.as_u16(),
                status_text,
            });
        }

        resp.bytes().await.map_err(|source| {
            tracing::warn!(%url, error = %source, "read response body");
            FetchError::Transport {
                url: url.clone(),
                source,
            }
        })
    }
}
