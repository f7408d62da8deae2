use crate::errors::UploadError;
use crate::models::result_item::ResultItem;

/// Raw answer from the upload endpoint, before any interpretation.
#[derive(Debug, Clone)]
pub struct UploadResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UploadResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as an ordered list of result items. The status code is
    /// not consulted: whatever the server sent must be the expected JSON array.
    pub fn result_items(&self) -> Result<Vec<ResultItem>, UploadError> {
        parse_result_items(&self.body)
    }
}

pub fn parse_result_items(body: &[u8]) -> Result<Vec<ResultItem>, UploadError> {
    let items: Vec<ResultItem> = serde_json::from_slice(body)?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_server_order() {
        let body = br#"[
            {"status":"already existing","doi":"10.1/def"},
            {"status":"newly inserted","doi":"10.1/abc"}
        ]"#;
        let items = parse_result_items(body).unwrap();
        assert_eq!(
            items,
            vec![
                ResultItem::new("already existing", "10.1/def"),
                ResultItem::new("newly inserted", "10.1/abc"),
            ]
        );
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_result_items(b"[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_json_and_non_arrays() {
        let html = UploadResponse::new(200, "<html><body>Login</body></html>");
        assert!(matches!(
            html.result_items(),
            Err(UploadError::InvalidResponse(_))
        ));

        let object = UploadResponse::new(200, r#"{"status":"inserted","doi":"10.1/abc"}"#);
        assert!(matches!(
            object.result_items(),
            Err(UploadError::InvalidResponse(_))
        ));
    }

    #[test]
    fn one_malformed_item_fails_the_whole_response() {
        let body = br#"[{"status":"newly inserted","doi":"10.1/abc"},{"status":"oops"}]"#;
        assert!(parse_result_items(body).is_err());
    }

    #[test]
    fn error_status_with_valid_body_still_decodes() {
        let response = UploadResponse::new(500, "[]");
        assert!(!response.is_success());
        assert!(response.result_items().unwrap().is_empty());
    }
}
