use bytes::Bytes;
use reqwest::StatusCode;
use url::Url;

/// One fetched page, decoded to UTF-8 and ready for parsing. Lives for
/// the duration of a single request.
#[derive(Debug)]
pub struct RawDocument {
    /// URL after following redirects; relative links resolve against it.
    pub url_final: Url,
    pub status: StatusCode,
    pub content_type: String,
    /// Name of the encoding the body was decoded with.
    pub charset: String,
    pub body_raw: Bytes,
    pub body_utf8: String,
}
