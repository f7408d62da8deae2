/// Form contents captured at submission time, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    pub fields: Vec<PayloadField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadField {
    pub name: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(PayloadField {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        });
    }

    pub fn push_file(
        &mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) {
        self.fields.push(PayloadField {
            name: name.into(),
            value: FieldValue::File {
                file_name: file_name.into(),
                content_type: content_type.into(),
                bytes,
            },
        });
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
