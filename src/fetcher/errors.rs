use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("dns failure: {0}")]
    Dns(String),

    #[error("tls error: {0}")]
    Tls(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Machine-readable kind string for the error object in the response
    /// contract.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "fetch_invalid_url",
            Self::Dns(_) => "fetch_dns",
            Self::Tls(_) => "fetch_tls",
            Self::ConnectTimeout | Self::RequestTimeout => "fetch_timeout",
            Self::TooManyRedirects => "fetch_redirect_loop",
            Self::Http { .. } => "fetch_http_status",
            Self::BodyTooLarge(_) => "fetch_body_too_large",
            Self::UnsupportedContentType(_) => "fetch_unsupported_content_type",
            Self::Io(_) => "fetch_io",
            Self::Unknown(_) => "fetch_unknown",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConnectTimeout | Self::RequestTimeout)
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::TooManyRedirects
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_request() {
            // DNS, connection errors
            Self::Dns(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Io(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
