use crate::generator::GeneratorError;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CmsEntry {
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: CmsRedirect,
}

/// Redirect fields of an entry. Drafts may leave any of them unset, so they are
/// only required once an entry is retained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CmsRedirect {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub permanent: bool,
}

#[derive(Debug, Deserialize)]
struct CmsPage {
    #[serde(default)]
    results: Vec<CmsEntry>,
}

/// Client for the paginated redirect content endpoint of the CMS.
pub struct CmsClient {
    http_client: Client,
    base_url: String,
    content_path: String,
    api_key: SecretString,
    page_size: usize,
}

impl CmsClient {
    pub fn new(
        base_url: String,
        content_path: String,
        api_key: SecretString,
        page_size: usize,
        timeout: Duration,
    ) -> Result<Self, GeneratorError> {
        if page_size == 0 {
            return Err(GeneratorError::InvalidPageSize);
        }
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            content_path,
            api_key,
            page_size,
        })
    }

    pub async fn fetch_page(&self, offset: usize) -> Result<Vec<CmsEntry>, GeneratorError> {
        let url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.content_path
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .query(&[("limit", self.page_size), ("offset", offset)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GeneratorError::UnexpectedStatus {
                status: status.as_u16(),
                offset,
                body,
            });
        }

        let page: CmsPage = response.json().await?;
        Ok(page.results)
    }

    /// Fetches pages until one comes back empty or shorter than the page size.
    ///
    /// A full page never ends pagination, even if it happens to be the last one.
    #[instrument(level = "info", skip(self), fields(page_size = self.page_size))]
    pub async fn fetch_all(&self) -> Result<Vec<CmsEntry>, GeneratorError> {
        let mut entries = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(offset).await?;
            let fetched = page.len();
            debug!(offset, fetched, "fetched page");
            entries.extend(page);

            if fetched < self.page_size {
                break;
            }
            offset += self.page_size;
        }

        info!("Fetched {} entries", entries.len());
        Ok(entries)
    }
}
