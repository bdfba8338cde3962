use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned note identifier.
///
/// The backend issues integers, but the client treats ids as opaque values and
/// accepts strings as well. An id is only ever compared for equality; `0` is as
/// valid as any other value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteId::Number(n) => write!(f, "{}", n),
            NoteId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        NoteId::Number(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        NoteId::Text(value.to_string())
    }
}

impl std::str::FromStr for NoteId {
    type Err = std::convert::Infallible;

    /// Numeric input becomes a `Number`, anything else stays `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => NoteId::Number(n),
            Err(_) => NoteId::Text(trimmed.to_string()),
        })
    }
}

/// A note as cached by the client.
///
/// Extra fields sent by the backend (owner ids and the like) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    pub fn new(id: impl Into<NoteId>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Title and content of a note that has not been persisted yet.
///
/// This is also the request body of the create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content.clone())
    }
}
