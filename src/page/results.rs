use askama::Template;

use crate::errors::UploadError;
use crate::models::result_item::{Classification, ResultItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub classification: Classification,
    pub text: String,
}

impl From<&ResultItem> for ResultRow {
    fn from(item: &ResultItem) -> Self {
        Self {
            classification: item.classification(),
            text: item.display_text(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultNode {
    Row(ResultRow),
    Error(String),
}

impl ResultNode {
    pub fn is_error(&self) -> bool {
        matches!(self, ResultNode::Error(_))
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            ResultNode::Row(row) => row.classification.class_name(),
            ResultNode::Error(_) => "",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ResultNode::Row(row) => &row.text,
            ResultNode::Error(message) => message,
        }
    }
}

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsTemplate<'a> {
    id: &'a str,
    nodes: &'a [ResultNode],
}

/// The element status rows are rendered into.
#[derive(Debug, Clone)]
pub struct ResultsContainer {
    id: String,
    nodes: Vec<ResultNode>,
}

impl ResultsContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nodes(&self) -> &[ResultNode] {
        &self.nodes
    }

    pub fn rows(&self) -> impl Iterator<Item = &ResultRow> {
        self.nodes.iter().filter_map(|node| match node {
            ResultNode::Row(row) => Some(row),
            ResultNode::Error(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn append_row(&mut self, row: ResultRow) {
        self.nodes.push(ResultNode::Row(row));
    }

    /// Replaces everything with a single error notice.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.nodes.clear();
        self.nodes.push(ResultNode::Error(message.into()));
    }

    /// Clears the container, then appends one row per item in order.
    pub fn render_items(&mut self, items: &[ResultItem]) {
        self.clear();
        for item in items {
            self.append_row(ResultRow::from(item));
        }
    }

    pub fn render_html(&self) -> Result<String, UploadError> {
        let html = ResultsTemplate {
            id: &self.id,
            nodes: &self.nodes,
        }
        .render()?;
        Ok(html)
    }
}
