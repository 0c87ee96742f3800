use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Server responded with status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ScanError>;
