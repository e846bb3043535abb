use crate::fetcher::types::RawDocument;
use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Decode a fetched body and wrap it into a [`RawDocument`]. Decoding is
/// lossy: undecodable byte sequences become replacement characters, so
/// partial text survives rather than failing the request.
pub fn build_document(
    url_final: Url,
    status: StatusCode,
    content_type: &str,
    body_bytes: Bytes,
) -> RawDocument {
    let encoding = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, encoding);

    RawDocument {
        url_final,
        status,
        content_type: content_type.to_string(),
        charset: encoding.name().to_string(),
        body_raw: body_bytes,
        body_utf8,
    }
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    // 1. Check Content-Type header for charset
    if let Some(captures) = CHARSET_REGEX.captures(content_type)
        && let Some(charset_str) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(charset_str.as_str().as_bytes())
    {
        return encoding;
    }

    // 2. Check for <meta charset> in first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    // Look for <meta charset="...">
    if let Some(captures) = META_CHARSET_REGEX.captures(&search_str)
        && let Some(charset_str) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(charset_str.as_str().as_bytes())
    {
        return encoding;
    }

    // Look for <meta http-equiv="Content-Type" content="...; charset=...">
    if let Some(captures) = META_HTTP_EQUIV_REGEX.captures(&search_str)
        && let Some(charset_str) = captures.get(1)
        && let Some(encoding) = Encoding::for_label(charset_str.as_str().as_bytes())
    {
        return encoding;
    }

    // 3. Use chardetng for heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    detector.guess(None, true)
}

fn decode_to_utf8(body_bytes: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        warn!(
            charset = encoding.name(),
            "malformed byte sequences replaced during decode"
        );
    }

    decoded.into_owned()
}
