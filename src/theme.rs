#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
}

impl Palette {
    /// The eight CSS custom properties this palette sets.
    pub fn declarations(&self) -> [(&'static str, &'static str); 8] {
        [
            ("--primary", self.primary),
            ("--secondary", self.secondary),
            ("--accent", self.accent),
            ("--background", self.background),
            ("--surface", self.surface),
            ("--text-primary", self.text_primary),
            ("--text-secondary", self.text_secondary),
            ("--border", self.border),
        ]
    }

    pub fn preview_gradient(&self) -> String {
        format!(
            "linear-gradient(135deg, {}, {})",
            self.primary, self.secondary
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub palette: Palette,
}

impl Theme {
    pub fn label(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Theme", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }

    pub fn style(&self) -> String {
        self.palette
            .declarations()
            .iter()
            .map(|(var, value)| format!("{var}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub const DEFAULT_THEME: &str = "default";

pub static THEMES: [Theme; 6] = [
    Theme {
        name: "default",
        palette: Palette {
            primary: "#667eea",
            secondary: "#764ba2",
            accent: "#f093fb",
            background: "#f8f9fa",
            surface: "#ffffff",
            text_primary: "#2d3748",
            text_secondary: "#718096",
            border: "#e2e8f0",
        },
    },
    Theme {
        name: "dark",
        palette: Palette {
            primary: "#8b5cf6",
            secondary: "#6d28d9",
            accent: "#a78bfa",
            background: "#1a202c",
            surface: "#2d3748",
            text_primary: "#f7fafc",
            text_secondary: "#cbd5e0",
            border: "#4a5568",
        },
    },
    Theme {
        name: "blue",
        palette: Palette {
            primary: "#3182ce",
            secondary: "#2c5aa0",
            accent: "#63b3ed",
            background: "#ebf8ff",
            surface: "#ffffff",
            text_primary: "#2d3748",
            text_secondary: "#718096",
            border: "#bee3f8",
        },
    },
    Theme {
        name: "green",
        palette: Palette {
            primary: "#38a169",
            secondary: "#2f855a",
            accent: "#68d391",
            background: "#f0fff4",
            surface: "#ffffff",
            text_primary: "#2d3748",
            text_secondary: "#718096",
            border: "#c6f6d5",
        },
    },
    Theme {
        name: "purple",
        palette: Palette {
            primary: "#9f7aea",
            secondary: "#6b46c1",
            accent: "#d6bcfa",
            background: "#faf5ff",
            surface: "#ffffff",
            text_primary: "#2d3748",
            text_secondary: "#718096",
            border: "#e9d8fd",
        },
    },
    Theme {
        name: "orange",
        palette: Palette {
            primary: "#ed8936",
            secondary: "#dd6b20",
            accent: "#fbd38d",
            background: "#fffaf0",
            surface: "#ffffff",
            text_primary: "#2d3748",
            text_secondary: "#718096",
            border: "#feebc8",
        },
    },
];

pub fn find(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name == name)
}

pub fn default_theme() -> &'static Theme {
    &THEMES[0]
}

/// The entry after `name` in table order, wrapping. Unknown names start over.
pub fn next_after(name: &str) -> &'static Theme {
    let next = THEMES
        .iter()
        .position(|t| t.name == name)
        .map(|i| (i + 1) % THEMES.len())
        .unwrap_or(0);
    &THEMES[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_palette_has_eight_distinct_tokens() {
        for theme in &THEMES {
            let vars: HashSet<_> = theme.palette.declarations().iter().map(|(v, _)| *v).collect();
            assert_eq!(vars.len(), 8, "{}", theme.name);
            assert_eq!(theme.style().matches(';').count(), 8);
        }
    }

    #[test]
    fn cycling_table_size_times_returns_to_start() {
        for start in &THEMES {
            let mut current = start.name;
            for _ in 0..THEMES.len() {
                current = next_after(current).name;
            }
            assert_eq!(current, start.name);
        }
    }

    #[test]
    fn unknown_name_cycles_to_first() {
        assert_eq!(next_after("neon").name, DEFAULT_THEME);
        assert!(find("neon").is_none());
    }

    #[test]
    fn labels_are_capitalised() {
        assert_eq!(find("dark").map(Theme::label).as_deref(), Some("Dark Theme"));
    }
}
