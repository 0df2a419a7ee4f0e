use serde::Serialize;

/// Identifier of a note as returned by the creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteId(String);

impl NoteId {
    /// Strings are taken verbatim and numbers are rendered in decimal.
    /// Anything else, including an empty string, is not an id.
    pub fn from_json(value: &serde_json::Value) -> Option<NoteId> {
        let id = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if id.is_empty() { None } else { Some(Self(id)) }
    }
}

impl AsRef<str> for NoteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl Default for NewNote {
    fn default() -> Self {
        Self {
            title: "Test Note".into(),
            description: "This is a test note.".into(),
            category: "Home".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteUpdate {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub category: String,
}

impl Default for NoteUpdate {
    fn default() -> Self {
        Self {
            title: "Updated Note".into(),
            description: "Updated description".into(),
            completed: true,
            category: "Work".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NotePatch {
    pub completed: bool,
}
