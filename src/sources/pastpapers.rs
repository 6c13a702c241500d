//! pastpapers.wiki source implementation.

use futures_util::StreamExt;
use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use scraper::Html;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::config::Config;
use crate::extract::{extract_detail, extract_listing, DetailSelectors, ListingSelectors};
use crate::models::{FetchResult, ListingQuery, PaperDetail, PaperStub};
use crate::sources::{DownloadError, SourceError};
use crate::utils::{resolve_filename, HttpClient};

/// pastpapers.wiki source
///
/// The site has no API, so listings and posts are scraped from its HTML.
#[derive(Debug, Clone)]
pub struct PastPapersSource {
    client: HttpClient,
    download_dir: PathBuf,
}

impl PastPapersSource {
    /// Create a source with the default configuration
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&Config::default())
    }

    /// Create a source from configuration
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::new(&config.site)?,
            download_dir: config.downloads.resolved_path()?,
        })
    }

    /// Directory downloads are written to
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Search the site. Returns an empty list if the page can't be fetched.
    pub async fn search(&self, term: &str, page: u32) -> Vec<PaperStub> {
        self.listing(&ListingQuery::search(term, page)).await
    }

    /// Most recent posts. Returns an empty list if the page can't be fetched.
    pub async fn recent(&self, page: u32) -> Vec<PaperStub> {
        self.listing(&ListingQuery::recent(page)).await
    }

    /// Fetch one listing page and extract its stubs
    pub async fn listing(&self, query: &ListingQuery) -> Vec<PaperStub> {
        match self.try_listing(query).await {
            Ok(stubs) => {
                tracing::debug!("Found {} papers at {}", stubs.len(), query.path());
                stubs
            }
            Err(e) => {
                tracing::warn!("Listing error for {}: {}", query.path(), e);
                Vec::new()
            }
        }
    }

    async fn try_listing(&self, query: &ListingQuery) -> Result<Vec<PaperStub>, SourceError> {
        let html = self.client.get_text(&query.path()).await?;

        let document = Html::parse_document(&html);
        Ok(extract_listing(&document, &ListingSelectors::for_query(query)))
    }

    /// Fetch and extract a detail page. Returns `None` if the page can't be fetched.
    pub async fn get_details(&self, url: &str) -> Option<PaperDetail> {
        match self.try_details(url).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                tracing::warn!("Details error for {}: {}", url, e);
                None
            }
        }
    }

    async fn try_details(&self, url: &str) -> Result<PaperDetail, SourceError> {
        let html = self.client.get_text(url).await?;

        let document = Html::parse_document(&html);
        Ok(extract_detail(
            &document,
            self.client.base_url(),
            &DetailSelectors::default(),
        ))
    }

    /// Stream `url` into the downloads directory.
    ///
    /// The filename comes from the response's Content-Disposition, then
    /// `suggested_name`, then a generic fallback. The returned path is only handed
    /// back after the file has been flushed.
    pub async fn download(
        &self,
        url: &str,
        suggested_name: Option<&str>,
    ) -> Result<FetchResult, DownloadError> {
        let url = self.client.url_for(url)?;

        let response = self
            .client
            .get(&url)?
            .send()
            .await
            .map_err(|e| DownloadError::network(&url, e))?;

        if !response.status().is_success() {
            return Err(DownloadError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let disposition = header(CONTENT_DISPOSITION);
        let content_type = header(CONTENT_TYPE);

        let filename = resolve_filename(
            disposition.as_deref(),
            suggested_name,
            content_type.as_deref(),
        );

        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| DownloadError::io(&self.download_dir, e))?;

        let file_path = self.download_dir.join(&filename);
        let bytes = persist_stream(response, &url, &file_path).await?;

        tracing::info!("Downloaded {} bytes to {}", bytes, file_path.display());
        Ok(FetchResult::new(file_path, bytes))
    }
}

/// Write a response body to `file_path` chunk by chunk.
///
/// The writer is flushed on the error path too, so whatever arrived before a
/// failure is on disk when the error is returned.
async fn persist_stream(
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let file = tokio::fs::File::create(file_path)
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    let result = async {
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DownloadError::network(url, e))?;

            writer
                .write_all(&chunk)
                .await
                .map_err(|e| DownloadError::io(file_path, e))?;

            bytes_written += chunk.len() as u64;
        }
        Ok::<(), DownloadError>(())
    }
    .await;

    let flushed = writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e));

    result.and(flushed).map(|()| bytes_written)
}
