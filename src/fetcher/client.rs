use crate::config::Config;
use crate::fetcher::{decode::build_document, errors::FetchError, types::RawDocument};
use reqwest::{Client, ClientBuilder, header::HeaderValue};
use tracing::instrument;
use url::Url;

const MAX_REDIRECTS: usize = 5;
const USER_AGENT: &str = "TextfetchBot/0.1 (+https://textfetch.example.com)";

/// Outbound HTTP client with the guards the pipeline relies on: bounded
/// timeouts, a redirect cap, and a body-size ceiling enforced while the
/// response streams in.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    max_body_bytes: usize,
}

impl Fetcher {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let client = ClientBuilder::new()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    HeaderValue::from_static(
                        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                    ),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes(),
        })
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &Url) -> Result<RawDocument, FetchError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > self.max_body_bytes as u64
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        // Binary payloads (images, PDFs, archives) are rejected rather
        // than mis-decoded.
        if !is_text_like(&content_type) {
            let bare = content_type
                .split(';')
                .next()
                .unwrap_or(&content_type)
                .trim()
                .to_string();
            return Err(FetchError::UnsupportedContentType(bare));
        }

        // Stream the body so an oversized response aborts mid-transfer
        // instead of being buffered whole (Content-Length may be absent
        // or lie).
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(FetchError::from_reqwest_error)?
        {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::BodyTooLarge((body.len() + chunk.len()) as u64));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(build_document(
            final_url,
            status,
            &content_type,
            body.into(),
        ))
    }
}

fn is_text_like(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.contains("text/html")
        || ct.contains("application/xhtml")
        || ct.contains("application/xml")
        || ct.starts_with("text/")
}
