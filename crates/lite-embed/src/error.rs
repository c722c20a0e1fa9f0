//! Embed errors
//!
//! Only the async boundaries and configuration loading return these.
//! Attribute-driven rendering never fails; missing shadow nodes just skip
//! the dependent side effect.

use lite_dom::DomError;

/// Embed error
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("HTTP error {status} fetching {url}")]
    Http { status: u16, url: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed metadata: {0}")]
    Metadata(String),

    #[error("player API failed to load: {0}")]
    ScriptLoad(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}

impl From<reqwest::Error> for EmbedError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => EmbedError::Http {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => EmbedError::Network(err.to_string()),
        }
    }
}
