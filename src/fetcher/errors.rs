use reqwest::StatusCode;
use thiserror::Error;

/// Failure to turn a wiki URL into decoded HTML.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("could not reach the wiki: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("wiki answered {status}")]
    Http { status: StatusCode, retriable: bool },

    #[error("page too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("not an html page: {0}")]
    UnsupportedContentType(String),

    #[error("undecodable page: {0}")]
    Charset(String),

    #[error("reading body failed: {0}")]
    Io(String),

    #[error("unexpected client error: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Whether a later attempt could plausibly succeed. Lookups never retry on
    /// their own; the console only uses this to word its message.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Http { retriable, .. } => *retriable,
            Self::InvalidUrl(_)
            | Self::BodyTooLarge(_)
            | Self::UnsupportedContentType(_)
            | Self::Charset(_) => false,
            Self::Connect(_)
            | Self::ConnectTimeout
            | Self::RequestTimeout
            | Self::RedirectLoop
            | Self::Io(_)
            | Self::Unknown(_) => true,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Http {
                status,
                retriable: status.is_server_error(),
            };
        }
        match (err.is_timeout(), err.is_connect()) {
            (true, true) => Self::ConnectTimeout,
            (true, false) => Self::RequestTimeout,
            _ if err.is_redirect() => Self::RedirectLoop,
            (false, true) => Self::Connect(err.to_string()),
            _ if err.is_request() => Self::Connect(err.to_string()),
            _ => Self::Unknown(err.to_string()),
        }
    }
}
