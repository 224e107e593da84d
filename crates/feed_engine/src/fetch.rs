use std::time::Duration;

use feed_core::{ArticleSummary, PageRequest};
use feed_logging::{feed_debug, feed_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::normalize::{normalize_article, normalize_page};
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec!["application/json".to_string()],
        }
    }
}

/// The remote article API as seen by the feed.
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    /// One page of the article list, already normalized.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<ArticleSummary>, FetchError>;

    /// A single article by numeric id or slug. `Ok(None)` when the API has no
    /// such article.
    async fn fetch_article(&self, key: &str) -> Result<Option<ArticleSummary>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestArticleSource {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestArticleSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// `{base}/{segments...}`, keeping any path the base URL already has.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::new(FailureKind::InvalidUrl, "base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn page_url(&self, request: &PageRequest) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&["articles"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &request.page.to_string())
                .append_pair("limit", &request.limit.to_string());
            if let Some(section) = request.section.as_deref() {
                query.append_pair("section", section);
            }
        }
        Ok(url)
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        ct.to_ascii_lowercase().ends_with("+json")
            || self
                .settings
                .allowed_content_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    /// GET `url` and return the body of a successful JSON response.
    async fn get_json(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        feed_debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("GET {url} returned {status}"),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if !content_type
            .as_deref()
            .is_some_and(|ct| self.is_content_type_allowed(ct))
        {
            return Err(FetchError::new(
                FailureKind::UnexpectedContentType { content_type },
                format!("{url} did not answer with JSON; check that the articles endpoint exists"),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        feed_debug!("GET {} -> {} bytes", url, bytes.len());
        Ok(bytes)
    }

    /// Single-article GET where a 404 means "no such article".
    async fn lookup(&self, segments: &[&str]) -> Result<Option<ArticleSummary>, FetchError> {
        let url = self.endpoint(segments)?;
        match self.get_json(url).await {
            Ok(bytes) => normalize_article(&bytes),
            Err(err) if err.kind == FailureKind::HttpStatus(404) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait::async_trait]
impl ArticleSource for ReqwestArticleSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<ArticleSummary>, FetchError> {
        let url = self.page_url(request)?;
        let bytes = self.get_json(url).await?;
        let articles = normalize_page(&bytes);
        if let Err(err) = &articles {
            feed_warn!("page {} could not be normalized: {}", request.page, err);
        }
        articles
    }

    async fn fetch_article(&self, key: &str) -> Result<Option<ArticleSummary>, FetchError> {
        let looks_like_slug = key.contains('-');
        match self.lookup(&["articles", key]).await {
            Ok(Some(article)) => Ok(Some(article)),
            Ok(None) if looks_like_slug => self.lookup(&["articles", "slug", key]).await,
            Ok(None) => Ok(None),
            Err(err) if looks_like_slug => {
                feed_warn!("lookup of {} failed ({}), retrying as slug", key, err);
                self.lookup(&["articles", "slug", key]).await
            }
            Err(err) => Err(err),
        }
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
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

    fn source(base_url: &str) -> ReqwestArticleSource {
        ReqwestArticleSource::new(FetchSettings {
            base_url: base_url.to_string(),
            ..FetchSettings::default()
        })
        .unwrap()
    }

    fn request(section: Option<&str>) -> PageRequest {
        PageRequest {
            generation: 0,
            page: 3,
            limit: 20,
            section: section.map(ToOwned::to_owned),
            append: true,
        }
    }

    #[test]
    fn page_url_keeps_base_path_and_encodes_section() {
        let source = source("https://news.example.com/api/");
        let url = source.page_url(&request(Some("world & africa"))).unwrap();

        assert_eq!(
            url.as_str(),
            "https://news.example.com/api/articles?page=3&limit=20&section=world+%26+africa"
        );
    }

    #[test]
    fn page_url_omits_missing_section() {
        let url = source("http://localhost:3000/api")
            .page_url(&request(None))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/articles?page=3&limit=20");
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let err = source("not a url").page_url(&request(None)).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn json_content_types() {
        let source = source(DEFAULT_BASE_URL);
        assert!(source.is_content_type_allowed("application/json; charset=utf-8"));
        assert!(source.is_content_type_allowed("Application/JSON"));
        assert!(source.is_content_type_allowed("application/hal+json"));
        assert!(!source.is_content_type_allowed("text/html"));
    }
}
