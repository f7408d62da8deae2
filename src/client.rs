use futures::future::BoxFuture;
use log::{debug, warn};
use reqwest::header::COOKIE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::config::UploaderConfig;
use crate::errors::UploadError;
use crate::models::payload::{FieldValue, FormPayload};
use crate::models::response::UploadResponse;

/// Carries one captured form to the upload endpoint.
pub trait UploadTransport: Send + Sync {
    fn post(&self, payload: FormPayload) -> BoxFuture<'_, Result<UploadResponse, UploadError>>;
}

pub struct HttpTransport {
    client: Client,
    url: String,
    session_cookie: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &UploaderConfig) -> Result<Self, UploadError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UploadError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.upload_url(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send(&self, payload: FormPayload) -> Result<UploadResponse, UploadError> {
        let form = multipart_form(payload)?;
        let mut request = self.client.post(&self.url).multipart(form);
        // The endpoint sits behind a login; send the session along like a browser would
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!("Received {} bytes from {}", body.len(), self.url);

        // Status is only logged; the body decides the outcome
        let upload_response = UploadResponse::new(status, body.to_vec());
        if !upload_response.is_success() {
            warn!("Upload endpoint answered {} for {}", status, self.url);
        }
        Ok(upload_response)
    }
}

impl UploadTransport for HttpTransport {
    fn post(&self, payload: FormPayload) -> BoxFuture<'_, Result<UploadResponse, UploadError>> {
        Box::pin(self.send(payload))
    }
}

/// Encodes the payload as `multipart/form-data`, one part per field in order.
pub fn multipart_form(payload: FormPayload) -> Result<Form, UploadError> {
    let mut form = Form::new();
    for field in payload.fields {
        form = match field.value {
            FieldValue::Text(value) => form.text(field.name, value),
            FieldValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| {
                        UploadError::FileReadError(format!(
                            "Invalid content type '{}': {}",
                            content_type, e
                        ))
                    })?;
                form.part(field.name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_targets_fixed_upload_path() {
        let config = UploaderConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..UploaderConfig::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.url(), "http://localhost:8080/upload");
    }

    #[test]
    fn multipart_uses_form_boundary() {
        let mut payload = FormPayload::new();
        payload.push_text("uploader", "lab-7");
        payload.push_file("file", "data.csv", "text/csv", b"a,b\n".to_vec());

        let form = multipart_form(payload).unwrap();
        assert!(!form.boundary().is_empty());
    }

    #[test]
    fn bad_content_type_is_rejected() {
        let mut payload = FormPayload::new();
        payload.push_file("file", "data.csv", "not a mime", Vec::new());
        assert!(matches!(
            multipart_form(payload),
            Err(UploadError::FileReadError(_))
        ));
    }
}
