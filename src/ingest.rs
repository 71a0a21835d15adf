use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

use crate::records::{NewNote, NewProgram, NoteKind};
use crate::store::{KeyValueStore, RecordStore, StoreError};

pub const EXTRACTED_DESCRIPTION: &str = "Java program extracted from file";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadKind {
    Java,
    Note(NoteKind),
}

impl UploadKind {
    /// Decides what an uploaded file becomes from its name and MIME type.
    /// `None` means the file is skipped.
    pub fn classify(name: &str, mime: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".java") {
            Some(UploadKind::Java)
        } else if mime.starts_with("image/") {
            Some(UploadKind::Note(NoteKind::Image))
        } else if mime == "application/pdf" || lower.ends_with(".pdf") {
            Some(UploadKind::Note(NoteKind::Pdf))
        } else if mime.starts_with("text/") || lower.ends_with(".txt") || lower.ends_with(".md") {
            Some(UploadKind::Note(NoteKind::Text))
        } else {
            None
        }
    }
}

/// Splits Java source in front of every `public class`, `class ` or
/// `import ` token and turns each non-blank piece into a program.
///
/// This is a text heuristic: keywords inside strings or comments split too.
pub fn extract_programs(content: &str, file_name: &str, date: &str) -> Vec<NewProgram> {
    static RE_BOUNDARY: OnceLock<Regex> = OnceLock::new();
    let re_boundary =
        RE_BOUNDARY.get_or_init(|| Regex::new(r"public class|class |import ").unwrap());

    let mut cuts: Vec<usize> = re_boundary.find_iter(content).map(|m| m.start()).collect();
    cuts.push(content.len());

    let mut programs = Vec::new();
    let mut start = 0usize;
    for cut in cuts {
        let block = content[start..cut].trim();
        start = cut;
        if block.is_empty() {
            continue;
        }
        programs.push(NewProgram {
            name: format!("Program {} - {}", programs.len() + 1, file_name),
            code: block.to_string(),
            date: date.to_string(),
            description: EXTRACTED_DESCRIPTION.to_string(),
        });
    }
    programs
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    Programs(usize),
    Note(NoteKind),
    Skipped,
}

#[derive(Clone, Debug)]
pub enum IngestError {
    Read { file: String, message: String },
    Store(StoreError),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Read { file, message } => write!(f, "could not read {file}: {message}"),
            IngestError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<StoreError> for IngestError {
    fn from(e: StoreError) -> Self {
        IngestError::Store(e)
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub fn locale_date() -> String {
    js_sys::Date::new_0()
        .to_locale_date_string("default", &JsValue::UNDEFINED)
        .into()
}

async fn read_text(file: &File) -> Result<String, JsValue> {
    let text = JsFuture::from(file.text()).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("file did not decode as text"))
}

async fn read_data_url(file: &File) -> Result<String, JsValue> {
    let reader = FileReader::new()?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader.read_as_data_url(file)?;
    JsFuture::from(loaded).await?;
    reader.set_onload(None);
    reader.set_onerror(None);
    reader
        .result()?
        .as_string()
        .ok_or_else(|| JsValue::from_str("reader produced no data URL"))
}

/// Reads one uploaded file and stores whatever records it yields.
pub async fn ingest_file<S: KeyValueStore>(
    store: &RecordStore<S>,
    file: &File,
) -> Result<IngestOutcome, IngestError> {
    let name = file.name();
    let Some(kind) = UploadKind::classify(&name, &file.type_()) else {
        return Ok(IngestOutcome::Skipped);
    };
    let read_error = |e: JsValue| IngestError::Read {
        file: name.clone(),
        message: js_message(&e),
    };
    let date = locale_date();

    match kind {
        UploadKind::Java => {
            let content = read_text(file).await.map_err(read_error)?;
            let programs = extract_programs(&content, &name, &date);
            let count = programs.len();
            for program in programs {
                store.save_program(program)?;
            }
            Ok(IngestOutcome::Programs(count))
        }
        UploadKind::Note(note_kind) => {
            let content = match note_kind {
                NoteKind::Text => read_text(file).await,
                NoteKind::Image | NoteKind::Pdf => read_data_url(file).await,
            }
            .map_err(read_error)?;
            store.save_note(NewNote::new(name.clone(), content, note_kind, date))?;
            Ok(IngestOutcome::Note(note_kind))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UploadProgress {
    pub index: usize,
    pub total: usize,
    pub file_name: String,
}

impl UploadProgress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.index as f64 / self.total as f64 * 100.0
        }
    }

    pub fn message(&self) -> String {
        format!("Processing {}... ({}/{})", self.file_name, self.index, self.total)
    }
}

/// Per-batch counts shown once every file has been handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl UploadSummary {
    pub fn record(&mut self, outcome: &Result<IngestOutcome, IngestError>) {
        match outcome {
            Ok(IngestOutcome::Skipped) => self.skipped += 1,
            Ok(_) => self.uploaded += 1,
            Err(_) => self.failed += 1,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    pub fn message(&self) -> String {
        if self.is_clean() {
            return "All files uploaded successfully!".to_string();
        }
        let mut parts = vec![format!("{} uploaded", self.uploaded)];
        if self.failed > 0 {
            parts.push(format!("{} failed", self.failed));
        }
        if self.skipped > 0 {
            parts.push(format!("{} skipped", self.skipped));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_uploads_by_name_and_mime() {
        assert_eq!(UploadKind::classify("Main.java", ""), Some(UploadKind::Java));
        assert_eq!(UploadKind::classify("Main.JAVA", "text/x-java"), Some(UploadKind::Java));
        assert_eq!(
            UploadKind::classify("cat.png", "image/png"),
            Some(UploadKind::Note(NoteKind::Image))
        );
        assert_eq!(
            UploadKind::classify("paper.pdf", ""),
            Some(UploadKind::Note(NoteKind::Pdf))
        );
        assert_eq!(
            UploadKind::classify("x", "application/pdf"),
            Some(UploadKind::Note(NoteKind::Pdf))
        );
        assert_eq!(
            UploadKind::classify("notes.md", ""),
            Some(UploadKind::Note(NoteKind::Text))
        );
        assert_eq!(UploadKind::classify("archive.zip", "application/zip"), None);
    }

    #[test]
    fn two_class_declarations_yield_two_programs() {
        let src = "class A {\n  int x;\n}\n\nclass B {\n}\n";
        let programs = extract_programs(src, "Two.java", "1/1/2024");
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].name, "Program 1 - Two.java");
        assert_eq!(programs[0].code, "class A {\n  int x;\n}");
        assert_eq!(programs[1].name, "Program 2 - Two.java");
        assert_eq!(programs[1].code, "class B {\n}");
        assert_eq!(programs[1].description, EXTRACTED_DESCRIPTION);
    }

    #[test]
    fn public_class_is_a_single_boundary() {
        let src = "import java.util.Scanner;\n\npublic class Calculator {\n}\n";
        let programs = extract_programs(src, "Calc.java", "d");
        let codes: Vec<_> = programs.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, ["import java.util.Scanner;", "public class Calculator {\n}"]);
    }

    #[test]
    fn leading_text_before_first_keyword_is_kept() {
        let programs = extract_programs("// header\nclass A {}", "A.java", "d");
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].code, "// header");
    }

    #[test]
    fn blank_file_yields_nothing() {
        assert!(extract_programs("  \n\t", "Empty.java", "d").is_empty());
    }

    #[test]
    fn progress_reports_position() {
        let progress = UploadProgress {
            index: 1,
            total: 4,
            file_name: "a.java".into(),
        };
        assert_eq!(progress.percent(), 25.0);
        assert_eq!(progress.message(), "Processing a.java... (1/4)");
    }

    #[test]
    fn summary_counts_failures_instead_of_claiming_success() {
        let mut summary = UploadSummary::default();
        for _ in 0..3 {
            summary.record(&Ok(IngestOutcome::Programs(2)));
        }
        summary.record(&Err(IngestError::Read {
            file: "broken.java".into(),
            message: "denied".into(),
        }));
        assert_eq!(summary.message(), "3 uploaded, 1 failed");

        summary.record(&Ok(IngestOutcome::Skipped));
        assert_eq!(summary.message(), "3 uploaded, 1 failed, 1 skipped");
    }

    #[test]
    fn clean_batch_reports_success() {
        let mut summary = UploadSummary::default();
        summary.record(&Ok(IngestOutcome::Note(NoteKind::Text)));
        assert!(summary.is_clean());
        assert_eq!(summary.message(), "All files uploaded successfully!");
    }
}
