use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::records::{NewNote, NewProgram, Note, Program};

pub const PROGRAMS_KEY: &str = "javaPrograms";
pub const NOTES_KEY: &str = "notes";
pub const THEME_KEY: &str = "appTheme";
pub const FONT_SIZE_KEY: &str = "fontSize";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    Unavailable,
    Corrupt { key: String, message: String },
    Encode { key: String, message: String },
    Write { key: String, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "local storage is not available"),
            StoreError::Corrupt { key, message } => {
                write!(f, "stored value for '{key}' is not valid JSON: {message}")
            }
            StoreError::Encode { key, message } => write!(f, "could not encode '{key}': {message}"),
            StoreError::Write { key, message } => write!(f, "could not write '{key}': {message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// String key-value storage. `window.localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                message: e.as_string().unwrap_or_else(|| format!("{e:?}")),
            })
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Timestamp in base 36 followed by a base-36 random suffix.
pub fn format_id(millis: u64, entropy: u64) -> String {
    format!("{}{}", to_base36(millis), to_base36(entropy))
}

pub fn browser_id() -> String {
    let millis = js_sys::Date::now() as u64;
    let entropy = (js_sys::Math::random() * 36f64.powi(10)) as u64;
    format_id(millis, entropy)
}

/// The two record collections on top of a key-value store.
///
/// Every save reads the whole collection, appends and writes it back.
/// Nothing guards against a second tab writing in between.
pub struct RecordStore<S> {
    kv: S,
    next_id: fn() -> String,
}

impl RecordStore<LocalStore> {
    pub fn browser() -> Self {
        Self::new(LocalStore)
    }
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_id_source(kv, browser_id)
    }

    pub fn with_id_source(kv: S, next_id: fn() -> String) -> Self {
        Self { kv, next_id }
    }

    #[cfg(test)]
    pub(crate) fn kv(&self) -> &S {
        &self.kv
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.kv.get(key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items).map_err(|e| StoreError::Encode {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.kv.set(key, &raw)
    }

    pub fn get_programs(&self) -> Result<Vec<Program>, StoreError> {
        self.read_collection(PROGRAMS_KEY)
    }

    pub fn save_program(&self, program: NewProgram) -> Result<Program, StoreError> {
        let mut programs = self.get_programs()?;
        let record = program.into_record((self.next_id)());
        programs.push(record.clone());
        self.write_collection(PROGRAMS_KEY, &programs)?;
        Ok(record)
    }

    pub fn find_program(&self, id: &str) -> Result<Option<Program>, StoreError> {
        Ok(self.get_programs()?.into_iter().find(|p| p.id == id))
    }

    pub fn get_notes(&self) -> Result<Vec<Note>, StoreError> {
        self.read_collection(NOTES_KEY)
    }

    pub fn save_note(&self, note: NewNote) -> Result<Note, StoreError> {
        let mut notes = self.get_notes()?;
        let record = note.into_record((self.next_id)());
        notes.push(record.clone());
        self.write_collection(NOTES_KEY, &notes)?;
        Ok(record)
    }

    pub fn find_note(&self, id: &str) -> Result<Option<Note>, StoreError> {
        Ok(self.get_notes()?.into_iter().find(|n| n.id == id))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::records::NoteKind;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) map: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.map.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.map.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    pub(crate) fn counter_id() -> String {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        format_id(1_700_000_000_000, NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) fn memory_store() -> RecordStore<MemoryStore> {
        RecordStore::with_id_source(MemoryStore::default(), counter_id)
    }

    fn sample_program(name: &str) -> NewProgram {
        NewProgram {
            name: name.to_string(),
            code: "class A {}".to_string(),
            date: "1/1/2024".to_string(),
            description: "Java program extracted from file".to_string(),
        }
    }

    #[test]
    fn empty_store_has_no_records() {
        let store = memory_store();
        assert!(store.get_programs().unwrap().is_empty());
        assert!(store.get_notes().unwrap().is_empty());
    }

    #[test]
    fn save_program_appends_one_record_with_fresh_id() {
        let store = memory_store();
        let first = store.save_program(sample_program("one")).unwrap();
        let before = store.get_programs().unwrap();

        let second = store.save_program(sample_program("two")).unwrap();
        let after = store.get_programs().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_ne!(first.id, second.id);
        assert!(!before.iter().any(|p| p.id == second.id));
        assert_eq!(after.last(), Some(&second));
        assert_eq!(second.language, "Java");
    }

    #[test]
    fn save_note_appends_one_record_with_fresh_id() {
        let store = memory_store();
        let saved = store
            .save_note(NewNote::new("todo.txt", "milk".into(), NoteKind::Text, "1/1/2024".into()))
            .unwrap();
        let notes = store.get_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0], saved);
        assert_eq!(store.find_note(&saved.id).unwrap(), Some(saved));
        assert_eq!(store.find_note("missing").unwrap(), None);
    }

    #[test]
    fn corrupt_collection_is_an_error_and_left_untouched() {
        let store = memory_store();
        store.kv().set(PROGRAMS_KEY, "{not json").unwrap();

        assert!(matches!(
            store.get_programs(),
            Err(StoreError::Corrupt { ref key, .. }) if key == PROGRAMS_KEY
        ));
        assert!(store.save_program(sample_program("x")).is_err());
        assert_eq!(store.kv().get(PROGRAMS_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn ids_are_base36_timestamp_then_suffix() {
        assert_eq!(format_id(0, 0), "00");
        assert_eq!(format_id(35, 36), "z10");
        assert!(format_id(1_700_000_000_000, 12345)
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
