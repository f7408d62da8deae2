use std::time::Duration;

use crate::errors::UploadError;

/// Path of the server's upload endpoint, relative to the base URL.
pub const UPLOAD_PATH: &str = "/upload";
pub const FORM_ID: &str = "upload-form";
pub const RESULTS_ID: &str = "results";
/// The only failure text ever shown in the results container.
pub const ERROR_MESSAGE: &str = "An error occurred while processing the file.";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub base_url: String,
    pub form_id: String,
    pub results_id: String,
    pub session_cookie: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            form_id: String::from(FORM_ID),
            results_id: String::from(RESULTS_ID),
            session_cookie: None,
            timeout: None,
        }
    }
}

impl UploaderConfig {
    /// Reads `UPLOAD_BASE_URL`, `UPLOAD_SESSION_COOKIE` and `UPLOAD_TIMEOUT_SECS`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self, UploadError> {
        let defaults = Self::default();

        let base_url = std::env::var("UPLOAD_BASE_URL").unwrap_or(defaults.base_url);
        let session_cookie = std::env::var("UPLOAD_SESSION_COOKIE")
            .ok()
            .filter(|cookie| !cookie.trim().is_empty());
        let timeout = match std::env::var("UPLOAD_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            session_cookie,
            timeout,
            ..defaults
        })
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), UPLOAD_PATH)
    }
}

pub fn parse_timeout(raw: &str) -> Result<Duration, UploadError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(UploadError::ConfigError(format!(
            "UPLOAD_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
            raw
        ))),
    }
}
