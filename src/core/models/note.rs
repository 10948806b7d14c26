//! Note model

use serde::{Deserialize, Serialize};

/// File attached to a note (stored by URI only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteAttachment {
    /// Location of the attached file
    pub uri: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// MIME type, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// A note taken for a discipline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: String,
    /// Owning discipline
    pub discipline_id: String,
    /// Title
    pub title: String,
    /// Body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Attached files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<NoteAttachment>,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,
    /// Last edit time, milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Note {
    /// Create a note with no content or attachments
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        discipline_id: impl Into<String>,
        title: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            discipline_id: discipline_id.into(),
            title: title.into(),
            content: None,
            attachments: Vec::new(),
            created_at,
            updated_at: None,
        }
    }

    /// Case-insensitive match against title and content
    #[must_use]
    pub fn matches(&self, lowered_term: &str) -> bool {
        let text = format!("{} {}", self.title, self.content.as_deref().unwrap_or(""));
        text.to_lowercase().contains(lowered_term)
    }
}
