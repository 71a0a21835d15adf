use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

const INDENT: &str = "    ";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn cursor(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_cursor(self) -> bool {
        self.start == self.end
    }

    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// One replaced byte range and where the selection lands afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub insert: String,
    pub selection_after: Selection,
}

impl Edit {
    pub fn new(
        start: usize,
        end: usize,
        insert: impl Into<String>,
        selection_after: Selection,
    ) -> Self {
        Self {
            start,
            end,
            insert: insert.into(),
            selection_after,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidRange { start, end, len } => {
                write!(f, "edit range {start}..{end} is invalid for {len} bytes")
            }
        }
    }
}

/// Editor buffer. Offsets are byte offsets into `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub text: String,
    pub selection: Selection,
}

impl EditorSnapshot {
    pub fn new(text: String) -> Self {
        let len = text.len();
        Self {
            text,
            selection: Selection::cursor(len),
        }
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.text.len());
    }

    /// Selection given in UTF-16 code units, as reported by a textarea.
    pub fn set_selection_utf16(&mut self, start: u32, end: u32) {
        let selection = Selection::new(
            byte_offset_for_utf16(&self.text, start),
            byte_offset_for_utf16(&self.text, end),
        );
        self.set_selection(selection);
    }

    pub fn selection_utf16(&self) -> (u32, u32) {
        (
            utf16_offset_for_byte(&self.text, self.selection.start),
            utf16_offset_for_byte(&self.text, self.selection.end),
        )
    }

    /// Returns whether the text or the selection changed.
    pub fn apply(&mut self, edit: Edit) -> Result<bool, CoreError> {
        let len = self.text.len();
        if edit.start > edit.end
            || edit.end > len
            || !self.text.is_char_boundary(edit.start)
            || !self.text.is_char_boundary(edit.end)
        {
            return Err(CoreError::InvalidRange {
                start: edit.start,
                end: edit.end,
                len,
            });
        }

        let text_changed = self.text[edit.start..edit.end] != edit.insert;
        self.text.replace_range(edit.start..edit.end, &edit.insert);
        let next_selection = edit.selection_after.clamp(self.text.len());
        let selection_changed = self.selection != next_selection;
        self.selection = next_selection;
        Ok(text_changed || selection_changed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorCommand {
    /// Tab: four spaces replace the selection.
    Indent,
    /// Shift+Tab: strip one indent level from the touched lines.
    Outdent,
    Format,
}

pub fn apply_editor_command(
    snapshot: &mut EditorSnapshot,
    command: EditorCommand,
) -> Result<bool, CoreError> {
    match build_edit(snapshot, command) {
        Some(edit) => snapshot.apply(edit),
        None => Ok(false),
    }
}

fn build_edit(snapshot: &EditorSnapshot, command: EditorCommand) -> Option<Edit> {
    match command {
        EditorCommand::Indent => {
            let selection = snapshot.selection.clamp(snapshot.text.len());
            Some(Edit::new(
                selection.start,
                selection.end,
                INDENT,
                Selection::cursor(selection.start + INDENT.len()),
            ))
        }
        EditorCommand::Outdent => outdent_edit(snapshot),
        EditorCommand::Format => {
            let formatted = format_code(&snapshot.text);
            if formatted == snapshot.text {
                return None;
            }
            let len = formatted.len();
            Some(Edit::new(
                0,
                snapshot.text.len(),
                formatted,
                Selection::cursor(len),
            ))
        }
    }
}

fn strip_indent(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix('\t') {
        return rest;
    }
    let remove = line.chars().take_while(|c| *c == ' ').take(INDENT.len()).count();
    &line[remove..]
}

fn outdent_edit(snapshot: &EditorSnapshot) -> Option<Edit> {
    let text = &snapshot.text;
    let selection = snapshot.selection.clamp(text.len());
    let block_start = line_start(text, selection.start);
    let block_end = line_end(text, selection.end);
    let block = &text[block_start..block_end];

    let transformed = block.split('\n').map(strip_indent).collect::<Vec<_>>().join("\n");
    if transformed.len() == block.len() {
        return None;
    }

    let selection_after = if selection.is_cursor() {
        let removed = block.len() - transformed.len();
        Selection::cursor(selection.start.saturating_sub(removed).max(block_start))
    } else {
        Selection::new(block_start, block_start + transformed.len())
    };

    Some(Edit::new(block_start, block_end, transformed, selection_after))
}

fn line_start(text: &str, pos: usize) -> usize {
    let clamped = pos.min(text.len());
    text[..clamped].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

fn line_end(text: &str, pos: usize) -> usize {
    let clamped = pos.min(text.len());
    text[clamped..]
        .find('\n')
        .map(|i| clamped + i)
        .unwrap_or(text.len())
}

fn byte_offset_for_utf16(text: &str, units: u32) -> usize {
    let mut seen = 0u32;
    for (idx, ch) in text.char_indices() {
        if seen >= units {
            return idx;
        }
        seen += ch.len_utf16() as u32;
    }
    text.len()
}

fn utf16_offset_for_byte(text: &str, byte: usize) -> u32 {
    text[..byte.min(text.len())].encode_utf16().count() as u32
}

pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Toy formatter: breaks after braces and semicolons, then drops blank lines.
pub fn format_code(code: &str) -> String {
    static RE_BLANK: OnceLock<Regex> = OnceLock::new();
    let re_blank = RE_BLANK.get_or_init(|| Regex::new(r"\n\s*\n").unwrap());

    let spaced = code
        .replace('{', " {\n    ")
        .replace('}', "\n}\n")
        .replace(';', ";\n");
    re_blank.replace_all(&spaced, "\n").into_owned()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Java,
    JavaScript,
    Html,
    Css,
    Python,
    Text,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Java,
        Language::JavaScript,
        Language::Html,
        Language::Css,
        Language::Python,
        Language::Text,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Html => "html",
            Language::Css => "css",
            Language::Python => "python",
            Language::Text => "text",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::JavaScript => "JavaScript",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Python => "Python",
            Language::Text => "Text",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.tag() == tag)
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn highlight_java(escaped: &str) -> String {
    static RE_JAVA: OnceLock<Regex> = OnceLock::new();
    let re_java = RE_JAVA.get_or_init(|| {
        Regex::new(
            r#"(//[^\n]*)|("[^"]*")|\b(class|public|private|static|void|int|String|boolean|if|else|for|while|return|new)\b|\b(true|false|null)\b"#,
        )
        .unwrap()
    });

    re_java
        .replace_all(escaped, |caps: &Captures| {
            let (class, text) = if let Some(m) = caps.get(1) {
                ("comment", m.as_str())
            } else if let Some(m) = caps.get(2) {
                ("string", m.as_str())
            } else if let Some(m) = caps.get(3) {
                ("keyword", m.as_str())
            } else {
                ("constant", caps.get(4).map(|m| m.as_str()).unwrap_or_default())
            };
            format!("<span class=\"{class}\">{text}</span>")
        })
        .into_owned()
}

/// Markup for the highlight layer behind the textarea. Only Java is colored.
pub fn highlight(language: Language, code: &str) -> String {
    let escaped = escape_html(code);
    let mut html = match language {
        Language::Java => highlight_java(&escaped),
        _ => escaped,
    };
    // Trailing newline in the textarea still needs a line box in the layer.
    html.push_str("\n ");
    html
}

fn print_arguments(re: &Regex, code: &str) -> Vec<String> {
    re.captures_iter(code)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .collect()
}

/// Fakes running `code`: echoes the arguments of the language's print call.
pub fn simulate_run(language: Language, code: &str) -> String {
    static RE_PRINTLN: OnceLock<Regex> = OnceLock::new();
    static RE_CONSOLE: OnceLock<Regex> = OnceLock::new();

    let (re, fallback) = match language {
        Language::Java => (
            RE_PRINTLN.get_or_init(|| Regex::new(r"System\.out\.println\(([^)]+)\)").unwrap()),
            "Program executed successfully!",
        ),
        Language::JavaScript => (
            RE_CONSOLE.get_or_init(|| Regex::new(r"console\.log\(([^)]+)\)").unwrap()),
            "JavaScript executed successfully!",
        ),
        other => return format!("Code execution simulated for {}\n", other.tag()),
    };

    let args = print_arguments(re, code);
    if args.is_empty() {
        format!("{fallback}\n")
    } else {
        format!("{}\n", args.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_and_split_char_edits() {
        let mut snapshot = EditorSnapshot::new("héllo".to_string());
        let backwards = Edit::new(4, 2, "x", Selection::cursor(0));
        assert!(matches!(
            snapshot.apply(backwards),
            Err(CoreError::InvalidRange { start: 4, end: 2, len: 6 })
        ));
        let mid_char = Edit::new(2, 3, "e", Selection::cursor(0));
        assert!(snapshot.apply(mid_char).is_err());
        assert_eq!(snapshot.text, "héllo");
    }

    #[test]
    fn identical_edit_reports_no_change() {
        let mut snapshot = EditorSnapshot::new("abc".to_string());
        let same = Edit::new(0, 1, "a", Selection::cursor(3));
        assert!(!snapshot.apply(same).unwrap());
        let moved = Edit::new(0, 1, "a", Selection::cursor(1));
        assert!(snapshot.apply(moved).unwrap());
    }

    #[test]
    fn tab_replaces_selection_with_four_spaces() {
        let mut snapshot = EditorSnapshot::new("int x;".to_string());
        snapshot.set_selection(Selection::new(0, 3));
        assert!(apply_editor_command(&mut snapshot, EditorCommand::Indent).unwrap());
        assert_eq!(snapshot.text, "     x;");
        assert_eq!(snapshot.selection, Selection::cursor(4));
    }

    #[test]
    fn outdents_cursor_line_and_block() {
        let mut snapshot = EditorSnapshot::new("a\n    b".to_string());
        snapshot.set_selection(Selection::cursor(snapshot.text.len()));
        assert!(apply_editor_command(&mut snapshot, EditorCommand::Outdent).unwrap());
        assert_eq!(snapshot.text, "a\nb");
        assert_eq!(snapshot.selection, Selection::cursor(3));

        let mut block = EditorSnapshot::new("\tx\n  y\nz".to_string());
        block.set_selection(Selection::new(0, block.text.len()));
        apply_editor_command(&mut block, EditorCommand::Outdent).unwrap();
        assert_eq!(block.text, "x\ny\nz");

        assert!(!apply_editor_command(&mut block, EditorCommand::Outdent).unwrap());
    }

    #[test]
    fn format_breaks_braces_and_statements() {
        assert_eq!(
            format_code("class A{int x;}"),
            "class A {\n    int x;\n}\n"
        );
        let mut snapshot = EditorSnapshot::new("a;b;".to_string());
        assert!(apply_editor_command(&mut snapshot, EditorCommand::Format).unwrap());
        assert_eq!(snapshot.text, "a;\nb;\n");
    }

    #[test]
    fn utf16_selection_maps_to_bytes() {
        let mut snapshot = EditorSnapshot::new("é😀x".to_string());
        snapshot.set_selection_utf16(3, 4);
        assert_eq!(snapshot.selection, Selection::new(6, 7));
        assert_eq!(snapshot.selection_utf16(), (3, 4));
    }

    #[test]
    fn counts_lines() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("a\nb\n"), 3);
    }

    #[test]
    fn highlights_java_in_one_pass() {
        let html = highlight(Language::Java, "String s = \"if\"; // new\nreturn null;");
        assert!(html.starts_with("<span class=\"keyword\">String</span> s = <span class=\"string\">\"if\"</span>;"));
        assert!(html.contains("<span class=\"comment\">// new</span>"));
        assert!(html.contains("<span class=\"keyword\">return</span> <span class=\"constant\">null</span>;"));
        assert!(!html.contains("class=<span"));
    }

    #[test]
    fn other_languages_are_escaped_only() {
        assert_eq!(highlight(Language::Python, "if a < b:"), "if a &lt; b:\n ");
    }

    #[test]
    fn run_echoes_single_println_argument() {
        let code = "public class Hi {\n  public static void main(String[] a) {\n    System.out.println(\"Hello\");\n  }\n}";
        assert_eq!(simulate_run(Language::Java, code), "\"Hello\"\n");
    }

    #[test]
    fn run_falls_back_to_canned_messages() {
        assert_eq!(simulate_run(Language::Java, "int x = 1;"), "Program executed successfully!\n");
        assert_eq!(
            simulate_run(Language::JavaScript, "console.log(a);\nconsole.log( 1 + 2 );"),
            "a\n1 + 2\n"
        );
        assert_eq!(simulate_run(Language::Python, "print(1)"), "Code execution simulated for python\n");
    }

    #[test]
    fn language_tags_round_trip() {
        for language in Language::ALL {
            assert_eq!(Language::from_tag(language.tag()), Some(language));
        }
        assert_eq!(Language::from_tag("rust"), None);
    }
}
