//! Per-request orchestration: validate → fetch → parse → extract →
//! size policy, with links on request. Any stage failure short-circuits;
//! no partial text is ever returned alongside an error.

use scraper::Html;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::extractor;
use crate::fetcher::{FetchError, Fetcher};
use crate::links::{self, ExtractedLink};
use crate::policy;

#[derive(Debug, Clone, Deserialize)]
pub struct FetchRequest {
    pub url: String,
    #[serde(default)]
    pub max_chars: Option<u32>,
    #[serde(default)]
    pub include_links: bool,
}

#[derive(Debug, Serialize)]
pub struct FetchOutcome {
    pub text: String,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<ExtractedLink>>,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unparseable document: {0}")]
    Parse(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Machine-readable kind for the error object in the response
    /// contract.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Fetch(err) => err.kind(),
            Self::Parse(_) => "parse",
            Self::Internal(_) => "internal",
        }
    }
}

/// Validate the request before any network call. Only http/https URLs
/// are fetchable, and a zero character budget is meaningless.
pub fn validate(request: &FetchRequest) -> Result<Url, PipelineError> {
    if request.max_chars == Some(0) {
        return Err(PipelineError::Validation(
            "max_chars must be at least 1".to_string(),
        ));
    }

    let url = Url::parse(&request.url)
        .map_err(|e| PipelineError::Validation(format!("invalid url: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PipelineError::Validation(format!(
            "unsupported url scheme: {other}"
        ))),
    }
}

#[instrument(skip_all, fields(url = %request.url))]
pub async fn run(fetcher: &Fetcher, request: &FetchRequest) -> Result<FetchOutcome, PipelineError> {
    let url = validate(request)?;

    let raw = fetcher.fetch(&url).await?;
    debug!(
        status = %raw.status,
        content_type = %raw.content_type,
        charset = %raw.charset,
        bytes = raw.body_raw.len(),
        "fetched document"
    );

    let max_chars = request.max_chars.map(|n| n as usize);
    let include_links = request.include_links;

    // Parsing and extraction are synchronous CPU-bound work; run them off
    // the async worker. A panic in extraction surfaces as InternalError
    // instead of tearing down the connection.
    let outcome = tokio::task::spawn_blocking(move || {
        let doc = Html::parse_document(&raw.body_utf8);
        let blocks = extractor::extract(&doc);
        let (text, truncated) = policy::apply(&blocks, max_chars);
        let links = include_links.then(|| links::extract_links(&doc, &raw.url_final));
        FetchOutcome {
            text,
            truncated,
            links,
        }
    })
    .await
    .map_err(|e| PipelineError::Internal(e.to_string()))?;

    Ok(outcome)
}
