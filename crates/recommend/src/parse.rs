use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::BookRecord;

/// What came back from the model, decoded if possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ParsedOutcome {
    /// The reply was exactly a JSON array of books.
    Structured(Vec<BookRecord>),
    /// Anything else, kept verbatim for display.
    Unstructured(String),
}

impl ParsedOutcome {
    pub fn is_structured(&self) -> bool {
        matches!(self, ParsedOutcome::Structured(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParsedOutcome::Structured(_) => "structured",
            ParsedOutcome::Unstructured(_) => "unstructured",
        }
    }
}

/// Decode a model reply as a JSON array of books.
///
/// Decoding is all-or-nothing: prose around the array, a missing field or a
/// wrong type on any element yields `Unstructured` with the raw text.
pub fn parse_recommendations(raw: &str) -> ParsedOutcome {
    match serde_json::from_str::<Vec<BookRecord>>(raw) {
        Ok(books) => ParsedOutcome::Structured(books),
        Err(e) => {
            debug!(error = %e, reply_len = raw.len(), "Reply is not a book array, keeping raw text");
            ParsedOutcome::Unstructured(raw.to_string())
        }
    }
}
