//! Reader preferences persisted in browser local storage.

use std::collections::HashMap;

use log::warn;

/// Storage key of the colour theme.
pub const THEME_KEY: &str = "theme";

/// Storage key of the content font size.
pub const FONT_SIZE_KEY: &str = "fontSize";

/// Key-value storage for preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored value. Anything but `"dark"` is light.
    pub fn parse(value: &str) -> Self {
        if value == "dark" { Self::Dark } else { Self::Light }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Label of the theme button: the icon of the theme it switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }
}

/// Content font size in `rem`, clamped and rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FontSize(f64);

impl FontSize {
    pub const MIN: f64 = 0.8;
    pub const MAX: f64 = 2.0;
    pub const STEP: f64 = 0.1;
    pub const DEFAULT: f64 = 1.2;

    /// Create a size, rounding to one decimal and clamping to the allowed range.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let rounded = (value * 10.0).round() / 10.0;
        Self(rounded.clamp(Self::MIN, Self::MAX))
    }

    /// Parse a stored value.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<f64>().ok().map(Self::new)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn increased(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    #[must_use]
    pub fn decreased(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }

    /// CSS `font-size` value.
    pub fn to_css(self) -> String {
        format!("{}rem", self)
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl std::fmt::Display for FontSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Theme and font size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Preferences {
    pub theme: Theme,
    pub font_size: FontSize,
}

impl Preferences {
    /// Read preferences, falling back to defaults for missing or invalid values.
    pub fn load(store: &impl PreferenceStore) -> Self {
        let theme = store.get(THEME_KEY).map(|v| Theme::parse(&v)).unwrap_or_default();
        let font_size = match store.get(FONT_SIZE_KEY) {
            Some(raw) => FontSize::parse(&raw).unwrap_or_else(|| {
                warn!("ignoring invalid stored font size '{raw}'");
                FontSize::default()
            }),
            None => FontSize::default(),
        };
        Self { theme, font_size }
    }

    /// Write both preferences.
    pub fn save(&self, store: &mut impl PreferenceStore) {
        store.set(THEME_KEY, self.theme.as_str());
        store.set(FONT_SIZE_KEY, &self.font_size.to_string());
    }
}
