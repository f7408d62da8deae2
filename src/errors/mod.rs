use std::fmt;

#[derive(Debug)]
pub enum UploadError {
    MissingElement(String),
    ConfigError(String),
    FileReadError(String),
    NetworkError(String),
    InvalidResponse(String),
    TemplateError(String),
    OutputError(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UploadError::MissingElement(msg) => write!(f, "Missing element: {}", msg),
            UploadError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            UploadError::FileReadError(msg) => write!(f, "File read error: {}", msg),
            UploadError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            UploadError::InvalidResponse(msg) => {
                write!(f, "Invalid response: {}", msg)
            }
            UploadError::TemplateError(msg) => write!(f, "Template error: {}", msg),
            UploadError::OutputError(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(err: serde_json::Error) -> Self {
        UploadError::InvalidResponse(err.to_string())
    }
}

impl From<askama::Error> for UploadError {
    fn from(err: askama::Error) -> Self {
        UploadError::TemplateError(err.to_string())
    }
}
