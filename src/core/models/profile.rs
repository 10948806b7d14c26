//! Student profile model

use serde::{Deserialize, Serialize};

/// The single local student profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique identifier
    pub id: String,
    /// Student name
    pub name: String,
    /// Degree program (e.g., "Engenharia de Computação")
    pub course: String,
    /// Institution name
    pub institution: String,
    /// Current semester label (e.g., "2025.1")
    pub semester: String,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,
}

impl Profile {
    /// First word of the name, used for greetings
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}
