use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode API response: {message}")]
    Decode { message: String, body: String },

    #[error("API error: {message}")]
    Api { message: String, body: String },
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Raw response body, for the variants that captured one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Decode { body, .. } | Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
