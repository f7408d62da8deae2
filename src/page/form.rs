use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::UploadError;
use crate::models::payload::FormPayload;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    Text { name: String, value: String },
    File { name: String, path: Option<PathBuf> },
}

impl FormInput {
    pub fn name(&self) -> &str {
        match self {
            FormInput::Text { name, .. } | FormInput::File { name, .. } => name,
        }
    }
}

/// The upload form: named inputs in document order.
#[derive(Debug, Clone)]
pub struct UploadForm {
    id: String,
    inputs: Vec<FormInput>,
}

impl UploadForm {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inputs: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inputs(&self) -> &[FormInput] {
        &self.inputs
    }

    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.push(FormInput::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, path: Option<PathBuf>) -> Self {
        self.inputs.push(FormInput::File {
            name: name.into(),
            path,
        });
        self
    }

    /// Changes the value of an existing text input, or adds one.
    pub fn set_text(&mut self, name: &str, new_value: impl Into<String>) {
        let new_value = new_value.into();
        for input in &mut self.inputs {
            if let FormInput::Text { name: n, value } = input {
                if n.as_str() == name {
                    *value = new_value;
                    return;
                }
            }
        }
        self.inputs.push(FormInput::Text {
            name: name.to_string(),
            value: new_value,
        });
    }

    /// Points an existing file input at another file, or adds one.
    pub fn set_file(&mut self, name: &str, new_path: Option<PathBuf>) {
        for input in &mut self.inputs {
            if let FormInput::File { name: n, path } = input {
                if n.as_str() == name {
                    *path = new_path;
                    return;
                }
            }
        }
        self.inputs.push(FormInput::File {
            name: name.to_string(),
            path: new_path,
        });
    }

    /// Snapshots every input into a payload. File contents are read now, not
    /// when the file was chosen.
    pub async fn capture(&self) -> Result<FormPayload, UploadError> {
        let mut payload = FormPayload::new();

        for input in &self.inputs {
            match input {
                FormInput::Text { name, value } => payload.push_text(name, value),
                FormInput::File { name, path: None } => {
                    // An empty file input is still submitted, as an empty unnamed part.
                    payload.push_file(name, "", OCTET_STREAM, Vec::new());
                }
                FormInput::File {
                    name,
                    path: Some(path),
                } => {
                    let bytes = tokio::fs::read(path).await.map_err(|e| {
                        UploadError::FileReadError(format!(
                            "Failed to read {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    debug!("Captured {} bytes from {}", bytes.len(), path.display());
                    payload.push_file(name, file_name(path), content_type(path), bytes);
                }
            }
        }

        Ok(payload)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|os_str| os_str.to_str())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

// Guessed from the extension, falling back to application/octet-stream
fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payload::FieldValue;
    use std::io::Write;

    fn csv_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("chemicals")
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn captures_text_and_file_in_form_order() {
        let fixture = csv_fixture("Species,chemical,Amount,DOI\nA,B,1.5,10.1/abc\n");
        let form = UploadForm::new("upload-form")
            .with_text("uploader", "lab-7")
            .with_file("file", Some(fixture.path().to_path_buf()));

        let payload = form.capture().await.unwrap();

        assert_eq!(payload.len(), 2);
        assert_eq!(payload.fields[0].name, "uploader");
        assert_eq!(payload.get("uploader"), Some(&FieldValue::Text("lab-7".into())));
        match payload.get("file") {
            Some(FieldValue::File {
                file_name,
                content_type,
                bytes,
            }) => {
                assert!(file_name.starts_with("chemicals"));
                assert!(file_name.ends_with(".csv"));
                assert_eq!(content_type, "text/csv");
                assert_eq!(bytes.as_slice(), fixture_bytes(&fixture).as_slice());
            }
            other => panic!("expected a file field, got {:?}", other),
        }
    }

    fn fixture_bytes(fixture: &tempfile::NamedTempFile) -> Vec<u8> {
        std::fs::read(fixture.path()).unwrap()
    }

    #[tokio::test]
    async fn empty_file_input_becomes_empty_part() {
        let form = UploadForm::new("upload-form").with_file("file", None);
        let payload = form.capture().await.unwrap();
        assert_eq!(
            payload.get("file"),
            Some(&FieldValue::File {
                file_name: String::new(),
                content_type: OCTET_STREAM.to_string(),
                bytes: Vec::new(),
            })
        );
    }

    #[tokio::test]
    async fn unreadable_file_is_a_capture_error() {
        let dir = tempfile::tempdir().unwrap();
        let form = UploadForm::new("upload-form")
            .with_file("file", Some(dir.path().join("missing.xlsx")));
        let err = form.capture().await.unwrap_err();
        assert!(matches!(err, UploadError::FileReadError(_)));
        assert!(err.to_string().contains("missing.xlsx"));
    }

    #[tokio::test]
    async fn captures_current_values() {
        let fixture = csv_fixture("a,b\n");
        let mut form = UploadForm::new("upload-form")
            .with_text("note", "first")
            .with_file("file", Some(fixture.path().to_path_buf()));
        form.set_text("note", "second");
        form.set_text("batch", "7");
        form.set_file("file", None);

        let payload = form.capture().await.unwrap();
        assert_eq!(payload.get("note"), Some(&FieldValue::Text("second".into())));
        assert_eq!(payload.get("batch"), Some(&FieldValue::Text("7".into())));
        assert!(matches!(
            payload.get("file"),
            Some(FieldValue::File { bytes, .. }) if bytes.is_empty()
        ));
        let names: Vec<_> = form.inputs().iter().map(FormInput::name).collect();
        assert_eq!(names, vec!["note", "file", "batch"]);
    }
}
