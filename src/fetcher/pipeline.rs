use crate::fetcher::{
    errors::FetchError,
    types::{Charset, PageResponse},
};
use bytes::Bytes;
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

const META_SCAN_BYTES: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// Decode a successful HTML response body into a [`PageResponse`].
pub fn process_response(
    url_final: Url,
    body: Bytes,
    content_type: &str,
) -> Result<PageResponse, FetchError> {
    let charset = detect_charset(content_type, &body);
    debug!(charset = charset.encoding().name(), "decoding page");
    let body_utf8 = decode_to_utf8(&body, &charset)?;

    Ok(PageResponse {
        url_final,
        body_utf8,
    })
}

/// Header charset first, then the two `<meta>` forms, then a statistical guess.
fn detect_charset(content_type: &str, body: &[u8]) -> Charset {
    if let Some(charset) = label_from(&CHARSET_REGEX, content_type) {
        return charset;
    }

    let head = &body[..body.len().min(META_SCAN_BYTES)];
    let head_str = String::from_utf8_lossy(head);

    if let Some(charset) = label_from(&META_CHARSET_REGEX, &head_str) {
        return charset;
    }
    if let Some(charset) = label_from(&META_HTTP_EQUIV_REGEX, &head_str) {
        return charset;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, head.len() == body.len());
    Charset::from_encoding(detector.guess(None, true))
}

fn label_from(regex: &Regex, haystack: &str) -> Option<Charset> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes()).map(Charset::from_encoding)
}

fn decode_to_utf8(body: &[u8], charset: &Charset) -> Result<String, FetchError> {
    let encoding = charset.encoding();
    let (decoded, _encoding, had_errors) = encoding.decode(body);

    if had_errors {
        return Err(FetchError::Charset(format!(
            "failed to decode content as {}",
            encoding.name()
        )));
    }

    Ok(decoded.into_owned())
}
