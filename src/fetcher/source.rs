use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::fetcher::{client::fetch, errors::FetchError};

/// Anything that can hand back the HTML of a page by URL.
///
/// The lookup pipeline only ever talks to this trait, so tests can swap the
/// network for canned pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError>;
}

/// Live pages over HTTP through the shared client.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpPageSource;

impl HttpPageSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        let page = fetch(url.as_str()).await?;
        if page.url_final != *url {
            debug!(from = %url, to = %page.url_final, "wiki redirected");
        }
        Ok(page.body_utf8)
    }
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for &T {
    async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        (**self).fetch_page(url).await
    }
}
