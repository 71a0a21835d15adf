use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::editor_core::escape_html;
use crate::records::{Note, NoteKind, Program};

/// Everything a program card shows, lowercased. Search runs against this.
pub fn program_card_text(program: &Program) -> String {
    [
        program.name.as_str(),
        program.description.as_str(),
        program.date.as_str(),
        program.language.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

pub fn matches_filter(card_text: &str, term: &str) -> bool {
    card_text.contains(&term.to_lowercase())
}

pub fn is_markdown_title(title: &str) -> bool {
    title.to_ascii_lowercase().ends_with(".md")
}

const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Keeps relative URLs, fragments and http/https/mailto links. Any other
/// scheme becomes `fallback`.
fn safe_url<'a>(url: CowStr<'a>, fallback: &'static str) -> CowStr<'a> {
    // Browsers drop tabs and newlines inside a scheme.
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    let scheme = match cleaned.find([':', '/', '?', '#']) {
        Some(i) if cleaned[i..].starts_with(':') => &cleaned[..i],
        _ => return url,
    };
    if SAFE_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)) {
        url
    } else {
        CowStr::Borrowed(fallback)
    }
}

/// Markdown to HTML with inline/raw HTML shown as text and unsafe link
/// targets removed.
pub fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url, "#"),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url, ""),
            title,
            id,
        }),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Body markup for a text note in the note modal.
pub fn text_note_html(note: &Note) -> String {
    if is_markdown_title(&note.title) {
        format!("<div class=\"text-note markdown\">{}</div>", markdown_to_html(&note.content))
    } else {
        format!("<div class=\"text-note\"><pre>{}</pre></div>", escape_html(&note.content))
    }
}

pub fn note_icon(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Image => "🖼",
        NoteKind::Pdf => "📕",
        NoteKind::Text => "📄",
    }
}

pub fn download_name(program: &Program) -> String {
    if program.name.to_ascii_lowercase().ends_with(".java") {
        program.name.clone()
    } else {
        format!("{}.java", program.name)
    }
}
