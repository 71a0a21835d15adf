use serde::{Deserialize, Serialize};

pub const PROGRAM_LANGUAGE: &str = "Java";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub code: String,
    pub language: String,
    pub date: String,
    pub description: String,
}

/// A program that has not been stored yet. The store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProgram {
    pub name: String,
    pub code: String,
    pub date: String,
    pub description: String,
}

impl NewProgram {
    pub fn into_record(self, id: String) -> Program {
        Program {
            id,
            name: self.name,
            code: self.code,
            language: PROGRAM_LANGUAGE.to_string(),
            date: self.date,
            description: self.description,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Image,
    Pdf,
    Text,
}

impl NoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteKind::Image => "image",
            NoteKind::Pdf => "pdf",
            NoteKind::Text => "text",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            NoteKind::Image => "Image note",
            NoteKind::Pdf => "PDF document",
            NoteKind::Text => "Text note",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Plain text for text notes, a `data:` URL for images and PDFs.
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub date: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub kind: NoteKind,
    pub date: String,
    pub description: String,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: String, kind: NoteKind, date: String) -> Self {
        Self {
            title: title.into(),
            content,
            kind,
            date,
            description: kind.description().to_string(),
        }
    }

    pub fn into_record(self, id: String) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            kind: self.kind,
            date: self.date,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_uses_legacy_field_names() {
        let note = NewNote::new("a.png", "data:image/png;base64,AA".into(), NoteKind::Image, "1/2/2024".into())
            .into_record("abc".into());
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["description"], "Image note");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn reads_records_written_by_older_builds() {
        let raw = r#"[{"id":"k1","name":"Program 1 - A.java","code":"class A {}","language":"Java","date":"3/4/2024","description":"Java program extracted from file"}]"#;
        let programs: Vec<Program> = serde_json::from_str(raw).unwrap();
        assert_eq!(programs[0].name, "Program 1 - A.java");
        assert_eq!(programs[0].language, PROGRAM_LANGUAGE);
    }
}
