//! Record types
//!
//! A `Record` is the single persisted entity. `RecordFields` is everything
//! except the id, which is what create and update take.

use serde::{Deserialize, Serialize};

/// A stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Auto-assigned primary key
    pub id: i64,
    pub fields: RecordFields,
}

/// The user-supplied part of a record.
///
/// Absent image or signature is `None`. The store never writes an empty
/// blob: `Some(vec![])` is normalised to NULL on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub text: String,
    pub number: i64,
    /// ISO date (`YYYY-MM-DD`), stored as text and not validated
    pub date: String,
    /// PNG-encoded image
    pub image: Option<Vec<u8>>,
    /// PNG-encoded signature drawing
    pub signature: Option<Vec<u8>>,
}

impl RecordFields {
    pub fn new(text: impl Into<String>, number: i64, date: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            number,
            date: date.into(),
            image: None,
            signature: None,
        }
    }

    pub fn with_image(mut self, image: Option<Vec<u8>>) -> Self {
        self.image = image;
        self
    }

    pub fn with_signature(mut self, signature: Option<Vec<u8>>) -> Self {
        self.signature = signature;
        self
    }

    /// Drop empty blobs so they are stored as NULL
    pub(crate) fn normalized_blobs(&self) -> (Option<&[u8]>, Option<&[u8]>) {
        (non_empty(&self.image), non_empty(&self.signature))
    }
}

fn non_empty(blob: &Option<Vec<u8>>) -> Option<&[u8]> {
    blob.as_deref().filter(|b| !b.is_empty())
}

impl Record {
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            id: self.id,
            text: self.fields.text.clone(),
            number: self.fields.number,
            date: self.fields.date.clone(),
            image_bytes: self.fields.image.as_ref().map(Vec::len),
            signature_bytes: self.fields.signature.as_ref().map(Vec::len),
        }
    }
}

/// Serializable view of a record with blob sizes in place of blob bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: i64,
    pub text: String,
    pub number: i64,
    pub date: String,
    pub image_bytes: Option<usize>,
    pub signature_bytes: Option<usize>,
}
