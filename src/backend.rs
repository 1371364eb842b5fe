//! Page sources for the application list
//!
//! `PageSource` is the seam between the pagination state machine and the
//! network. `HttpPageSource` talks to a json-server style endpoint that takes
//! `_page` / `_limit` query parameters and answers with a JSON array.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::debug;

use crate::config::Config;
use crate::errors::FetchError;
use crate::pagination::PageRequest;

/// Something that can hand out one page of items at a time.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send + 'static;

    /// Fetch `request.limit` items of page `request.page` (1-based).
    /// An empty vector means there is no more data.
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Self::Item>, FetchError>;
}

/// reqwest-backed page source
pub struct HttpPageSource<T> {
    client: Client,
    base_url: Url,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpPageSource<T> {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .timeout(config.http_timeout())
            .build()?;

        Self::with_client(client, &config.api_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid applications API URL {}: {}", base_url, e))?;

        Ok(Self {
            client,
            base_url,
            _item: PhantomData,
        })
    }

    /// Full URL requested for a page
    pub fn page_url(&self, request: PageRequest) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("_page", &request.page.to_string())
            .append_pair("_limit", &request.limit.to_string());
        url
    }
}

#[async_trait]
impl<T> PageSource for HttpPageSource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Item = T;

    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<T>, FetchError> {
        let url = self.page_url(request);
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status_code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let items: Vec<T> = serde_json::from_slice(&body)?;
        debug!("Page {} returned {} items", request.page, items.len());

        Ok(items)
    }
}
