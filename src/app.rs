use leptos::task::spawn_local;

use leptos::ev;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileList, HtmlAnchorElement, HtmlInputElement, HtmlTextAreaElement};

use crate::editor_core::{
    apply_editor_command, highlight, line_count, simulate_run, EditorCommand, EditorSnapshot,
    Language,
};
use crate::ingest::{ingest_file, locale_date, IngestOutcome, UploadProgress, UploadSummary};
use crate::records::{NewNote, NewProgram, Note, NoteKind, Program};
use crate::render::{download_name, matches_filter, note_icon, program_card_text, text_note_html};
use crate::settings::Settings;
use crate::store::{LocalStore, RecordStore};
use crate::theme::THEMES;

const EDITOR_DESCRIPTION: &str = "Saved from the code editor";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Programs,
    Notes,
    Upload,
    Settings,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Programs, Tab::Notes, Tab::Upload, Tab::Settings];

    fn label(self) -> &'static str {
        match self {
            Tab::Programs => "Java Programs",
            Tab::Notes => "Notes",
            Tab::Upload => "Upload",
            Tab::Settings => "Settings",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "notification info",
            ToastKind::Success => "notification success",
            ToastKind::Error => "notification error",
        }
    }
}

#[derive(Clone, Debug)]
struct Toast {
    id: u64,
    message: String,
    kind: ToastKind,
}

#[derive(Clone, Debug, PartialEq)]
enum UploadStatus {
    Progress(UploadProgress),
    Done(UploadSummary),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shortcut {
    OpenEditor,
    Save,
    Run,
    CycleTheme,
    FocusSearch,
    CloseModals,
}

impl Shortcut {
    fn from_key(ctrl: bool, meta: bool, key: &str) -> Option<Self> {
        if key == "Escape" {
            return Some(Shortcut::CloseModals);
        }
        match (ctrl, ctrl || meta, key) {
            (_, true, "e") => Some(Shortcut::OpenEditor),
            (_, true, "s") => Some(Shortcut::Save),
            (_, true, "r") => Some(Shortcut::Run),
            (true, _, "t") => Some(Shortcut::CycleTheme),
            (true, _, "/") => Some(Shortcut::FocusSearch),
            _ => None,
        }
    }
}

/// Logs a failed DOM call instead of dropping it. Returns whether it worked.
fn warn_if_failed<E: std::fmt::Debug>(result: Result<(), E>, action: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("{action} failed: {e:?}");
            false
        }
    }
}

fn files_of(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

fn download_text(file_name: &str, text: &str) -> Result<(), JsValue> {
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/plain");
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let anchor: HtmlAnchorElement = document().create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)
}

#[component]
pub fn App() -> impl IntoView {
    let settings = RwSignal::new(Settings::load(&LocalStore));
    let active_tab = RwSignal::new(Tab::Programs);
    let programs = RwSignal::new(Vec::<Program>::new());
    let notes = RwSignal::new(Vec::<Note>::new());
    let search = RwSignal::new(String::new());

    let code_modal = RwSignal::new(None::<Program>);
    let note_modal = RwSignal::new(None::<Note>);
    let zoom = RwSignal::new(1.0f64);

    let editor_open = RwSignal::new(false);
    let editor_text = RwSignal::new(String::new());
    let editor_lang = RwSignal::new(Language::Java);
    let editor_file = RwSignal::new(String::new());
    let editor_output = RwSignal::new(String::new());
    let (scroll_top, set_scroll_top) = signal(0);
    let (scroll_left, set_scroll_left) = signal(0);

    let toasts = RwSignal::new(Vec::<Toast>::new());
    let toast_seq = RwSignal::new(0u64);
    let upload_status = RwSignal::new(None::<UploadStatus>);
    let dragging = RwSignal::new(false);

    let file_input: NodeRef<leptos::html::Input> = NodeRef::new();
    let search_input: NodeRef<leptos::html::Input> = NodeRef::new();
    let code_area: NodeRef<leptos::html::Textarea> = NodeRef::new();

    log!("settings loaded: theme={} font_size={}", settings.get_untracked().theme, settings.get_untracked().font_size);

    let notify = move |message: String, kind: ToastKind| {
        let id = toast_seq.get_untracked() + 1;
        toast_seq.set(id);
        toasts.update(|list| list.push(Toast { id, message, kind }));
        set_timeout(
            move || toasts.update(|list| list.retain(|t| t.id != id)),
            Duration::from_secs(4),
        );
    };

    let reload = move || {
        let store = RecordStore::browser();
        match store.get_programs() {
            Ok(list) => programs.set(list),
            Err(e) => {
                error!("loading programs failed: {e}");
                programs.set(Vec::new());
                notify(e.to_string(), ToastKind::Error);
            }
        }
        match store.get_notes() {
            Ok(list) => notes.set(list),
            Err(e) => {
                error!("loading notes failed: {e}");
                notes.set(Vec::new());
                notify(e.to_string(), ToastKind::Error);
            }
        }
    };
    reload();

    set_timeout(
        move || {
            notify(
                "Welcome to CodeNotes! Start by uploading your Java files.".to_string(),
                ToastKind::Info,
            )
        },
        Duration::from_secs(1),
    );

    let apply_theme = move |name: String| {
        let mut s = settings.get_untracked();
        match s.apply_theme(&name, &LocalStore) {
            Ok(true) => {
                log!("theme -> {name}");
                settings.set(s);
            }
            Ok(false) => warn!("unknown theme '{name}'"),
            Err(e) => error!("saving theme failed: {e}"),
        }
    };

    let cycle_theme = move || {
        let mut s = settings.get_untracked();
        match s.cycle_theme(&LocalStore) {
            Ok(theme) => {
                log!("theme -> {}", theme.name);
                settings.set(s);
            }
            Err(e) => error!("saving theme failed: {e}"),
        }
    };

    let change_font_size = move |raw: String| {
        let mut s = settings.get_untracked();
        match s.set_font_size(&raw, &LocalStore) {
            Ok(true) => settings.set(s),
            Ok(false) => {}
            Err(e) => error!("saving font size failed: {e}"),
        }
    };

    let handle_files = move |files: Vec<File>| {
        if files.is_empty() {
            return;
        }
        spawn_local(async move {
            let store = RecordStore::browser();
            let total = files.len();
            let mut summary = UploadSummary::default();
            for (i, file) in files.iter().enumerate() {
                upload_status.set(Some(UploadStatus::Progress(UploadProgress {
                    index: i + 1,
                    total,
                    file_name: file.name(),
                })));
                let outcome = ingest_file(&store, file).await;
                summary.record(&outcome);
                match outcome {
                    Ok(IngestOutcome::Programs(count)) => {
                        log!("{}: {count} program(s) extracted", file.name())
                    }
                    Ok(IngestOutcome::Note(kind)) => log!("{}: stored as {} note", file.name(), kind.as_str()),
                    Ok(IngestOutcome::Skipped) => warn!("{}: unsupported file, skipped", file.name()),
                    Err(e) => {
                        error!("{e}");
                        notify(e.to_string(), ToastKind::Error);
                    }
                }
            }
            log!("upload finished: {}", summary.message());
            upload_status.set(Some(UploadStatus::Done(summary)));
            reload();
            set_timeout(move || upload_status.set(None), Duration::from_secs(3));
        });
    };

    let open_program = move |id: &str| match RecordStore::browser().find_program(id) {
        Ok(found) => code_modal.set(found),
        Err(e) => error!("loading program {id} failed: {e}"),
    };

    let open_note = move |id: &str| match RecordStore::browser().find_note(id) {
        Ok(found) => {
            zoom.set(1.0);
            note_modal.set(found);
        }
        Err(e) => error!("loading note {id} failed: {e}"),
    };

    let open_editor = move |content: String, file_name: String, language: Language| {
        editor_text.set(content);
        editor_file.set(file_name);
        editor_lang.set(language);
        editor_output.set(String::new());
        set_scroll_top.set(0);
        set_scroll_left.set(0);
        editor_open.set(true);
        set_timeout(
            move || {
                if let Some(area) = code_area.get_untracked() {
                    warn_if_failed(area.focus(), "focusing editor");
                }
            },
            Duration::from_millis(100),
        );
    };

    let open_new_file = move || open_editor(String::new(), "new-file.java".to_string(), Language::Java);

    let close_modals = move || {
        code_modal.set(None);
        note_modal.set(None);
        editor_open.set(false);
    };

    let run_code = move || {
        let code = editor_text.get_untracked();
        let language = editor_lang.get_untracked();
        editor_output.set("Running code...\n".to_string());
        set_timeout(
            move || editor_output.update(|out| out.push_str(&simulate_run(language, &code))),
            Duration::from_secs(1),
        );
    };

    let save_code = move || {
        let code = editor_text.get_untracked();
        let file_name = editor_file.get_untracked();
        let store = RecordStore::browser();
        let saved = match editor_lang.get_untracked() {
            Language::Java => store
                .save_program(NewProgram {
                    name: file_name.clone(),
                    code: code.clone(),
                    date: locale_date(),
                    description: EDITOR_DESCRIPTION.to_string(),
                })
                .map(|p| p.id),
            _ => store
                .save_note(NewNote::new(file_name.clone(), code.clone(), NoteKind::Text, locale_date()))
                .map(|n| n.id),
        };
        match saved {
            Ok(id) => {
                log!("saved {file_name} as {id}");
                if let Err(e) = download_text(&file_name, &code) {
                    warn!("download of {file_name} failed: {e:?}");
                }
                reload();
                notify("File saved successfully!".to_string(), ToastKind::Success);
            }
            Err(e) => {
                error!("saving {file_name} failed: {e}");
                notify(e.to_string(), ToastKind::Error);
            }
        }
    };

    let format_code = move || {
        let mut snapshot = EditorSnapshot::new(editor_text.get_untracked());
        match apply_editor_command(&mut snapshot, EditorCommand::Format) {
            Ok(_) => {
                editor_text.set(snapshot.text);
                notify("Code formatted!".to_string(), ToastKind::Success);
            }
            Err(e) => warn!("format rejected: {e}"),
        }
    };

    let handle_tab_key = move |ev: ev::KeyboardEvent| {
        if ev.key() != "Tab" {
            return;
        }
        ev.prevent_default();
        let area: HtmlTextAreaElement = event_target(&ev);
        let mut snapshot = EditorSnapshot::new(area.value());
        let start = area.selection_start().ok().flatten().unwrap_or(0);
        let end = area.selection_end().ok().flatten().unwrap_or(start);
        snapshot.set_selection_utf16(start, end);
        let command = if ev.shift_key() {
            EditorCommand::Outdent
        } else {
            EditorCommand::Indent
        };
        match apply_editor_command(&mut snapshot, command) {
            Ok(true) => {
                area.set_value(&snapshot.text);
                let (s, e) = snapshot.selection_utf16();
                warn_if_failed(area.set_selection_range(s, e), "restoring selection");
                editor_text.set(snapshot.text);
            }
            Ok(false) => {}
            Err(e) => warn!("indent rejected: {e}"),
        }
    };

    let _shortcuts = window_event_listener(ev::keydown, move |e| {
        let Some(shortcut) = Shortcut::from_key(e.ctrl_key(), e.meta_key(), &e.key()) else {
            return;
        };
        if shortcut != Shortcut::CloseModals {
            e.prevent_default();
        }
        match shortcut {
            Shortcut::OpenEditor => open_new_file(),
            Shortcut::Save => {
                if editor_open.get_untracked() {
                    save_code();
                }
            }
            Shortcut::Run => {
                if editor_open.get_untracked() {
                    run_code();
                }
            }
            Shortcut::CycleTheme => cycle_theme(),
            Shortcut::FocusSearch => {
                active_tab.set(Tab::Programs);
                if let Some(input) = search_input.get_untracked() {
                    warn_if_failed(input.focus(), "focusing search");
                }
            }
            Shortcut::CloseModals => close_modals(),
        }
    });

    let nav = move || {
        Tab::ALL
            .into_iter()
            .map(|tab| {
                view! {
                    <button
                        class=move || if active_tab.get() == tab { "nav-item active" } else { "nav-item" }
                        on:click=move |_| active_tab.set(tab)
                    >
                        {tab.label()}
                    </button>
                }
            })
            .collect::<Vec<_>>()
    };

    let programs_tab = move || {
        let list = programs.get();
        if list.is_empty() {
            return view! {
                <div class="empty-state">
                    <h3>"No Java Programs Yet"</h3>
                    <p>"Upload your first Java file to get started!"</p>
                    <button class="btn-primary" on:click=move |_| active_tab.set(Tab::Upload)>
                        "Upload Java File"
                    </button>
                </div>
            }
            .into_any();
        }
        list.into_iter()
            .enumerate()
            .map(|(index, program)| {
                let card_text = program_card_text(&program);
                let id = program.id.clone();
                let to_edit = program.clone();
                let to_download = program.clone();
                view! {
                    <div
                        class="program-card animate-slide-in-up"
                        style=move || {
                            let display = if matches_filter(&card_text, &search.get()) { "block" } else { "none" };
                            format!("animation-delay: {:.1}s; display: {display};", index as f64 * 0.1)
                        }
                        on:click=move |_| open_program(&id)
                    >
                        <div class="program-icon">"☕"</div>
                        <h3>{program.name.clone()}</h3>
                        <p>{program.description.clone()}</p>
                        <div class="program-meta">
                            <span>{program.date.clone()}</span>
                            <span>{program.language.clone()}</span>
                        </div>
                        <div class="program-actions">
                            <button class="btn-small" title="Edit" on:click=move |e| {
                                e.stop_propagation();
                                open_editor(to_edit.code.clone(), download_name(&to_edit), Language::Java);
                            }>"✎"</button>
                            <button class="btn-small" title="Download" on:click=move |e| {
                                e.stop_propagation();
                                if let Err(err) = download_text(&download_name(&to_download), &to_download.code) {
                                    warn!("download failed: {err:?}");
                                }
                            }>"⬇"</button>
                        </div>
                    </div>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    let notes_tab = move || {
        let list = notes.get();
        if list.is_empty() {
            return view! {
                <div class="empty-state">
                    <h3>"No Notes Yet"</h3>
                    <p>"Add your first note or upload PDF/Image files!"</p>
                    <button class="btn-primary" on:click=move |_| {
                        open_editor(String::new(), "new-note.txt".to_string(), Language::Text)
                    }>"Add New Note"</button>
                </div>
            }
            .into_any();
        }
        list.into_iter()
            .enumerate()
            .map(|(index, note)| {
                let id = note.id.clone();
                let preview = match note.kind {
                    NoteKind::Image => view! { <img src=note.content.clone() alt=note.title.clone() /> }.into_any(),
                    kind => view! { <span class="note-icon">{note_icon(kind)}</span> }.into_any(),
                };
                view! {
                    <div
                        class="note-card animate-slide-in-up"
                        style=format!("animation-delay: {:.1}s;", index as f64 * 0.1)
                        on:click=move |_| open_note(&id)
                    >
                        <div class=format!("note-preview {}", note.kind.as_str())>{preview}</div>
                        <div class="note-content">
                            <h4>{note.title.clone()}</h4>
                            <p>{note.description.clone()}</p>
                            <div class="note-meta">
                                <span>{note.date.clone()}</span>
                                <span>{note.kind.as_str()}</span>
                            </div>
                        </div>
                    </div>
                }
            })
            .collect::<Vec<_>>()
            .into_any()
    };

    let upload_tab = move || {
        view! {
            <div
                class=move || if dragging.get() { "upload-area dragover" } else { "upload-area" }
                on:dragover=move |e: ev::DragEvent| {
                    e.prevent_default();
                    dragging.set(true);
                }
                on:dragleave=move |_| dragging.set(false)
                on:drop=move |e: ev::DragEvent| {
                    e.prevent_default();
                    dragging.set(false);
                    if let Some(list) = e.data_transfer().and_then(|dt| dt.files()) {
                        handle_files(files_of(&list));
                    }
                }
                on:click=move |_| {
                    if let Some(input) = file_input.get_untracked() {
                        input.click();
                    }
                }
            >
                <h3>"Drop Java files, images, PDFs or text notes here"</h3>
                <p>"or click to choose files"</p>
            </div>
            <div class="upload-progress">
                {move || match upload_status.get() {
                    Some(UploadStatus::Progress(progress)) => view! {
                        <div class="progress-bar" style=format!("width: {}%", progress.percent())></div>
                        <p>{progress.message()}</p>
                    }.into_any(),
                    Some(UploadStatus::Done(summary)) => {
                        let class = if summary.is_clean() { "upload-done" } else { "upload-done partial" };
                        view! { <p class=class>{summary.message()}</p> }.into_any()
                    }
                    None => ().into_any(),
                }}
            </div>
        }
    };

    let settings_tab = move || {
        let previews = THEMES
            .iter()
            .map(|theme| {
                let name = theme.name;
                view! {
                    <div
                        class=move || if settings.get().theme == name { "theme-preview active" } else { "theme-preview" }
                        style=format!("background: {}", theme.palette.preview_gradient())
                        on:click=move |_| apply_theme(name.to_string())
                    >
                        <span>{theme.label()}</span>
                    </div>
                }
            })
            .collect::<Vec<_>>();
        view! {
            <div class="settings-container">
                <div class="setting-item">
                    <label for="themeSelect">"Select Theme:"</label>
                    <select
                        id="themeSelect"
                        class="theme-select"
                        prop:value=move || settings.get().theme
                        on:change=move |e| apply_theme(event_target_value(&e))
                    >
                        {THEMES
                            .iter()
                            .map(|theme| {
                                let name = theme.name;
                                view! {
                                    <option value=name selected=move || settings.get().theme == name>
                                        {theme.label()}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </select>
                </div>
                <div class="theme-previews">{previews}</div>
                <div class="setting-item">
                    <label for="fontSize">"Font Size (px):"</label>
                    <input
                        id="fontSize"
                        type="number"
                        min="10"
                        max="28"
                        prop:value=move || settings.get().font_size.to_string()
                        on:input=move |e| change_font_size(event_target_value(&e))
                    />
                </div>
                <p class="hint">"Ctrl+T cycles themes. Ctrl+E opens the editor. Ctrl+/ searches programs."</p>
            </div>
        }
    };

    let tab_content = move || match active_tab.get() {
        Tab::Programs => view! {
            <div class="tab-content active">
                <input
                    class="search"
                    type="search"
                    placeholder="Search programs..."
                    node_ref=search_input
                    prop:value=move || search.get()
                    on:input=move |e| search.set(event_target_value(&e))
                />
                <div class="programs-grid">{programs_tab}</div>
            </div>
        }
        .into_any(),
        Tab::Notes => view! {
            <div class="tab-content active">
                <button class="btn-primary" on:click=move |_| {
                    open_editor(String::new(), "new-note.txt".to_string(), Language::Text)
                }>"+ Add Note"</button>
                <div class="notes-container">{notes_tab}</div>
            </div>
        }
        .into_any(),
        Tab::Upload => view! { <div class="tab-content active">{upload_tab}</div> }.into_any(),
        Tab::Settings => view! { <div class="tab-content active">{settings_tab}</div> }.into_any(),
    };

    let code_view = move || {
        code_modal.get().map(|program| {
            view! {
                <div class="modal" on:click=move |_| close_modals()>
                    <div class="modal-content large" on:click=|e| e.stop_propagation()>
                        <div class="modal-header">
                            <h3>{program.name.clone()}</h3>
                            <span class="close" on:click=move |_| close_modals()>"×"</span>
                        </div>
                        <pre class="code-display"><code inner_html=highlight(Language::Java, &program.code)></code></pre>
                    </div>
                </div>
            }
        })
    };

    let note_view = move || {
        note_modal.get().map(|note| {
            let body = match note.kind {
                NoteKind::Image => view! {
                    <div class="image-viewer">
                        <img
                            class="note-image"
                            src=note.content.clone()
                            alt=note.title.clone()
                            style=move || format!("transform: scale({});", zoom.get())
                        />
                        <div class="image-controls">
                            <button class="btn-small" on:click=move |_| zoom.set(1.2)>"+"</button>
                            <button class="btn-small" on:click=move |_| zoom.set(1.0)>"1:1"</button>
                            <button class="btn-small" on:click=move |_| zoom.set(0.8)>"−"</button>
                        </div>
                    </div>
                }
                .into_any(),
                NoteKind::Pdf => view! {
                    <iframe src=note.content.clone() width="100%" height="600px"></iframe>
                }
                .into_any(),
                NoteKind::Text => view! { <div inner_html=text_note_html(&note)></div> }.into_any(),
            };
            view! {
                <div class="modal" on:click=move |_| close_modals()>
                    <div class="modal-content large" on:click=|e| e.stop_propagation()>
                        <div class="modal-header">
                            <h3>{note.title.clone()}</h3>
                            <span class="close" on:click=move |_| close_modals()>"×"</span>
                        </div>
                        <div class="modal-body">{body}</div>
                    </div>
                </div>
            }
        })
    };

    let editor_view = move || {
        if !editor_open.get() {
            return ().into_any();
        }
        view! {
            <div class="modal">
                <div class="modal-content xlarge">
                    <div class="modal-header">
                        <h3>"Code Editor"</h3>
                        <div class="editor-controls">
                            <button class="editor-btn" title="Run Code (Ctrl+R)" on:click=move |_| run_code()>"▶ Run"</button>
                            <button class="editor-btn" title="Save Code (Ctrl+S)" on:click=move |_| save_code()>"💾 Save"</button>
                            <button class="editor-btn" title="Format Code" on:click=move |_| format_code()>"⇥ Format"</button>
                            <span class="close" on:click=move |_| close_modals()>"×"</span>
                        </div>
                    </div>
                    <div class="modal-body">
                        <div class="editor-toolbar">
                            <select
                                prop:value=move || editor_lang.get().tag()
                                on:change=move |e| {
                                    if let Some(language) = Language::from_tag(&event_target_value(&e)) {
                                        editor_lang.set(language);
                                    }
                                }
                            >
                                {Language::ALL
                                    .into_iter()
                                    .map(|l| view! {
                                        <option value=l.tag() selected=move || editor_lang.get() == l>{l.label()}</option>
                                    })
                                    .collect::<Vec<_>>()}
                            </select>
                            <input
                                type="text"
                                placeholder="File name..."
                                prop:value=move || editor_file.get()
                                on:input=move |e| editor_file.set(event_target_value(&e))
                            />
                        </div>
                        <div class="editor-container">
                            <div class="line-numbers" prop:scrollTop=move || scroll_top.get()>
                                {move || (1..=line_count(&editor_text.get()))
                                    .map(|n| view! { <div class="line-number">{n}</div> })
                                    .collect::<Vec<_>>()}
                            </div>
                            <div
                                class="code-highlight"
                                inner_html=move || highlight(editor_lang.get(), &editor_text.get())
                                prop:scrollTop=move || scroll_top.get()
                                prop:scrollLeft=move || scroll_left.get()
                            ></div>
                            <textarea
                                class="code-textarea"
                                node_ref=code_area
                                placeholder="Type your code here..."
                                spellcheck="false"
                                prop:value=move || editor_text.get()
                                on:input=move |e| editor_text.set(event_target_value(&e))
                                on:keydown=handle_tab_key
                                on:scroll=move |e| {
                                    let target: leptos::web_sys::Element = event_target(&e);
                                    set_scroll_top.set(target.scroll_top());
                                    set_scroll_left.set(target.scroll_left());
                                }
                            ></textarea>
                        </div>
                        <div class="output-container">
                            <div class="output-header">
                                <h4>"Output"</h4>
                                <button class="clear-output" on:click=move |_| editor_output.set(String::new())>"Clear"</button>
                            </div>
                            <pre class="code-output">{move || editor_output.get()}</pre>
                        </div>
                    </div>
                </div>
            </div>
        }
        .into_any()
    };

    let toast_view = move || {
        toasts
            .get()
            .into_iter()
            .map(|toast| view! { <div class=format!("{} show", toast.kind.class())>{toast.message}</div> })
            .collect::<Vec<_>>()
    };

    view! {
        <main class="app-layout" style=move || settings.get().root_style()>
            <header class="app-header">
                <h1>"CodeNotes"</h1>
                <nav class="nav">{nav}</nav>
                <button class="theme-toggle" title="Next theme (Ctrl+T)" on:click=move |_| cycle_theme()>"🎨"</button>
            </header>
            <input
                type="file"
                multiple=true
                style="display: none;"
                node_ref=file_input
                on:change=move |e| {
                    let input: HtmlInputElement = event_target(&e);
                    if let Some(list) = input.files() {
                        handle_files(files_of(&list));
                    }
                    input.set_value("");
                }
            />
            <section class="content">{tab_content}</section>
            <div class="quick-actions">
                <button class="quick-action" title="New File (Ctrl+E)" on:click=move |_| open_new_file()>"📝"</button>
                <button class="quick-action" title="Upload File" on:click=move |_| {
                    active_tab.set(Tab::Upload);
                    if let Some(input) = file_input.get_untracked() {
                        input.click();
                    }
                }>"⬆"</button>
                <button class="quick-action" title="Settings" on:click=move |_| active_tab.set(Tab::Settings)>"⚙"</button>
            </div>
            {code_view}
            {note_view}
            {editor_view}
            <div class="notifications">{toast_view}</div>
        </main>
    }
}
