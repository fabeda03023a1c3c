use url::Url;

/// Text encodings the decoder handles by name. Wiki pages are nearly always
/// UTF-8; the rest cover mirrors and archived copies.
#[derive(Debug, Clone, PartialEq)]
pub enum Charset {
    Utf8,
    Windows1252,
    Utf16Le,
    Utf16Be,
    Other(&'static encoding_rs::Encoding),
}

impl Charset {
    pub fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        if encoding == encoding_rs::UTF_8 {
            Self::Utf8
        } else if encoding == encoding_rs::WINDOWS_1252 {
            Self::Windows1252
        } else if encoding == encoding_rs::UTF_16LE {
            Self::Utf16Le
        } else if encoding == encoding_rs::UTF_16BE {
            Self::Utf16Be
        } else {
            Self::Other(encoding)
        }
    }

    pub fn encoding(&self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Windows1252 => encoding_rs::WINDOWS_1252,
            Self::Utf16Le => encoding_rs::UTF_16LE,
            Self::Utf16Be => encoding_rs::UTF_16BE,
            Self::Other(encoding) => encoding,
        }
    }
}

/// A fetched HTML page, decoded to UTF-8. `url_final` differs from the
/// requested URL when the wiki redirected (renamed pages, alias titles).
#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub body_utf8: String,
}
