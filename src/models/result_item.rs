use serde::{Deserialize, Serialize};
use std::fmt;

/// One server-reported outcome for one uploaded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub status: String,
    pub doi: String,
}

impl ResultItem {
    pub fn new(status: impl Into<String>, doi: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            doi: doi.into(),
        }
    }

    pub fn classification(&self) -> Classification {
        Classification::of(&self.status)
    }

    pub fn display_text(&self) -> String {
        format!("{} (DOI: {})", self.status, self.doi)
    }
}

/// How a result row is styled.
///
/// The server's status wording is the contract here: any status containing the
/// substring `inserted` (case-sensitive) counts as a fresh insert, everything
/// else is shown as an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Inserted,
    Existing,
}

impl Classification {
    pub fn of(status: &str) -> Self {
        if status.contains("inserted") {
            Classification::Inserted
        } else {
            Classification::Existing
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Classification::Inserted => "inserted",
            Classification::Existing => "existing",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.class_name())
    }
}
