use crate::store::{KeyValueStore, StoreError, FONT_SIZE_KEY, THEME_KEY};
use crate::theme::{self, Theme, DEFAULT_THEME};

pub const DEFAULT_FONT_SIZE: u32 = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub theme: String,
    pub font_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Settings {
    /// Missing or unreadable values fall back to the defaults.
    pub fn load(kv: &impl KeyValueStore) -> Self {
        let mut settings = Self::default();
        if let Ok(Some(name)) = kv.get(THEME_KEY) {
            if theme::find(&name).is_some() {
                settings.theme = name;
            }
        }
        if let Ok(Some(raw)) = kv.get(FONT_SIZE_KEY) {
            if let Ok(size) = raw.trim().parse() {
                settings.font_size = size;
            }
        }
        settings
    }

    pub fn current_theme(&self) -> &'static Theme {
        theme::find(&self.theme).unwrap_or_else(theme::default_theme)
    }

    /// Switches to `name` and persists it. Returns `false` for names not in the table.
    pub fn apply_theme(&mut self, name: &str, kv: &impl KeyValueStore) -> Result<bool, StoreError> {
        let Some(theme) = theme::find(name) else {
            return Ok(false);
        };
        self.theme = theme.name.to_string();
        kv.set(THEME_KEY, theme.name)?;
        Ok(true)
    }

    pub fn cycle_theme(&mut self, kv: &impl KeyValueStore) -> Result<&'static Theme, StoreError> {
        let next = theme::next_after(&self.theme);
        self.apply_theme(next.name, kv)?;
        Ok(next)
    }

    /// Ignores input that is not a whole number of pixels.
    pub fn set_font_size(&mut self, raw: &str, kv: &impl KeyValueStore) -> Result<bool, StoreError> {
        let Ok(size) = raw.trim().parse::<u32>() else {
            return Ok(false);
        };
        self.font_size = size;
        kv.set(FONT_SIZE_KEY, &size.to_string())?;
        Ok(true)
    }

    pub fn root_style(&self) -> String {
        format!("{} font-size: {}px;", self.current_theme().style(), self.font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::MemoryStore;
    use crate::theme::THEMES;

    #[test]
    fn applying_each_theme_sets_its_tokens_and_persists_name() {
        let kv = MemoryStore::default();
        let mut settings = Settings::default();
        for theme in &THEMES {
            assert!(settings.apply_theme(theme.name, &kv).unwrap());
            assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some(theme.name));

            let style = settings.root_style();
            for (var, value) in theme.palette.declarations() {
                assert!(style.contains(&format!("{var}: {value};")), "{var} in {style}");
            }
            assert_eq!(style.matches("--").count(), 8);
        }
    }

    #[test]
    fn unknown_theme_is_ignored() {
        let kv = MemoryStore::default();
        let mut settings = Settings::default();
        assert!(!settings.apply_theme("neon", &kv).unwrap());
        assert_eq!(settings.theme, DEFAULT_THEME);
        assert_eq!(kv.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn cycle_persists_next_theme() {
        let kv = MemoryStore::default();
        let mut settings = Settings::default();
        let next = settings.cycle_theme(&kv).unwrap();
        assert_eq!(next.name, "dark");
        assert_eq!(Settings::load(&kv).theme, "dark");
    }

    #[test]
    fn load_falls_back_on_bad_values() {
        let kv = MemoryStore::default();
        kv.set(THEME_KEY, "neon").unwrap();
        kv.set(FONT_SIZE_KEY, "huge").unwrap();
        assert_eq!(Settings::load(&kv), Settings::default());

        kv.set(FONT_SIZE_KEY, "20").unwrap();
        assert_eq!(Settings::load(&kv).font_size, 20);
    }

    #[test]
    fn font_size_rejects_non_numbers() {
        let kv = MemoryStore::default();
        let mut settings = Settings::default();
        assert!(!settings.set_font_size("abc", &kv).unwrap());
        assert!(settings.set_font_size("18", &kv).unwrap());
        assert!(settings.root_style().ends_with("font-size: 18px;"));
        assert_eq!(kv.get(FONT_SIZE_KEY).unwrap().as_deref(), Some("18"));
    }
}
