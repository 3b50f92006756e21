//! Language and theme preference values.
//!
//! DESIGN
//! ======
//! Both axes are binary. External strings (URL parameters, stored values,
//! channel payloads) are parsed into these types at the edge; anything that
//! does not parse is treated as absent by callers.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "preference_test.rs"]
mod preference_test;

/// Persistent store key for the language axis.
pub const LANG_STORAGE_KEY: &str = "site-lang";
/// Persistent store key for the theme axis.
pub const THEME_STORAGE_KEY: &str = "site-theme";
/// URL query parameter carrying the language.
pub const LANG_PARAM: &str = "lang";
/// URL query parameter carrying the theme.
pub const THEME_PARAM: &str = "theme";
/// Broadcast channel name shared by every page of the site.
pub const SYNC_CHANNEL_NAME: &str = "edupath-sync";

/// Site language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    /// Parse a language code. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "ar" => Some(Self::Ar),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Ar => Self::En,
            Self::En => Self::Ar,
        }
    }

    /// Text direction for the `dir` attribute.
    #[must_use]
    pub fn dir(self) -> &'static str {
        match self {
            Self::Ar => "rtl",
            Self::En => "ltr",
        }
    }

    /// Root class marking the active language, e.g. `lang-ar`.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Ar => "lang-ar",
            Self::En => "lang-en",
        }
    }

    /// Label of the language switch while `self` is active. Always names the
    /// language the control switches *to*.
    #[must_use]
    pub fn switch_label(self) -> &'static str {
        match self {
            Self::Ar => "English",
            Self::En => "العربية",
        }
    }

    /// Advisory title of the theme switch, written in `self`.
    #[must_use]
    pub fn theme_switch_title(self) -> &'static str {
        match self {
            Self::Ar => "تبديل المظهر",
            Self::En => "Toggle Theme",
        }
    }

    /// Attribute holding this language's content variant.
    #[must_use]
    pub fn content_attr(self) -> &'static str {
        match self {
            Self::Ar => "data-ar",
            Self::En => "data-en",
        }
    }

    /// Attribute holding this language's placeholder variant.
    #[must_use]
    pub fn placeholder_attr(self) -> &'static str {
        match self {
            Self::Ar => "data-ar-placeholder",
            Self::En => "data-en-placeholder",
        }
    }
}

/// Color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Parse a theme name. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// The `(language, theme)` pair mirrored into the document, the store, and
/// outbound links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Preference {
    pub language: Language,
    pub theme: Theme,
}

impl Preference {
    #[must_use]
    pub fn new(language: Language, theme: Theme) -> Self {
        Self { language, theme }
    }
}
