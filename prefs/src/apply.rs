//! Pure apply functions: preference in, document mutations out.
//!
//! DESIGN
//! ======
//! Nothing here reads preference state back out of the document. Callers
//! hold the [`Preference`] and pass it in, so applying the same value twice
//! produces the same tree.

use crate::error::TreeError;
use crate::links::{PageLocation, rewrite_href};
use crate::preference::{Language, Preference, Theme};
use crate::tree::{Control, DocumentTree};

#[cfg(test)]
#[path = "apply_test.rs"]
mod apply_test;

const THEME_ATTR: &str = "data-theme";
const CLASS_PREFIX: &str = "lang-";

/// Apply the full preference: language, theme, then outbound links.
///
/// # Errors
///
/// Returns the first [`TreeError`] hit while applying language or theme.
/// Link failures are per-anchor and never surface here.
pub fn apply_preference<T: DocumentTree>(
    tree: &mut T,
    page: &PageLocation,
    pref: Preference,
) -> Result<(), TreeError> {
    apply_language(tree, pref.language)?;
    apply_theme(tree, pref.theme)?;
    refresh_links(tree, page, pref);
    Ok(())
}

/// Switch every language-dependent part of the document to `lang`.
///
/// # Errors
///
/// Returns a [`TreeError`] if the document rejects a write. Writes already
/// made stay in place.
pub fn apply_language<T: DocumentTree>(tree: &mut T, lang: Language) -> Result<(), TreeError> {
    let root = tree.root()?;
    tree.set_attribute(&root, "lang", lang.as_str())?;
    tree.set_attribute(&root, "dir", lang.dir())?;
    let classes = swap_language_class(tree.attribute(&root, "class").as_deref(), lang);
    tree.set_attribute(&root, "class", &classes)?;

    if let Some(button) = tree.element_by_id(Control::LanguageSwitch.id()) {
        tree.set_text(&button, lang.switch_label())?;
    }
    if let Some(button) = tree.element_by_id(Control::ThemeSwitch.id()) {
        tree.set_attribute(&button, "title", lang.theme_switch_title())?;
    }

    for node in tree.translatable_nodes() {
        let Some(content) = tree.attribute(&node, lang.content_attr()) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }
        if content.contains('<') || tree.has_child_elements(&node) {
            tree.set_markup(&node, &content)?;
        } else {
            tree.set_text(&node, &content)?;
        }
    }

    for input in tree.placeholder_inputs() {
        if let Some(placeholder) = tree.attribute(&input, lang.placeholder_attr()) {
            tree.set_attribute(&input, "placeholder", &placeholder)?;
        }
    }

    Ok(())
}

/// Set `data-theme` on the root and, once parsed, the body.
///
/// # Errors
///
/// Returns a [`TreeError`] if the document rejects the write.
pub fn apply_theme<T: DocumentTree>(tree: &mut T, theme: Theme) -> Result<(), TreeError> {
    let root = tree.root()?;
    tree.set_attribute(&root, THEME_ATTR, theme.as_str())?;
    if let Some(body) = tree.body() {
        tree.set_attribute(&body, THEME_ATTR, theme.as_str())?;
    }
    Ok(())
}

/// Rewrite eligible anchors to carry `pref`. Returns how many were changed.
/// A failure on one anchor is logged and skipped.
pub fn refresh_links<T: DocumentTree>(tree: &mut T, page: &PageLocation, pref: Preference) -> usize {
    let mut rewritten = 0;
    for anchor in tree.anchors() {
        let Some(href) = tree.attribute(&anchor, "href") else {
            continue;
        };
        let Some(next) = rewrite_href(&href, page, pref) else {
            continue;
        };
        if next == href {
            continue;
        }
        match tree.set_attribute(&anchor, "href", &next) {
            Ok(()) => rewritten += 1,
            Err(e) => log::debug!("anchor {href:?} left unchanged: {e}"),
        }
    }
    rewritten
}

/// Replace any `lang-*` class with the one for `lang`, keeping the rest.
#[must_use]
pub fn swap_language_class(existing: Option<&str>, lang: Language) -> String {
    let mut classes: Vec<&str> = existing
        .unwrap_or_default()
        .split_whitespace()
        .filter(|class| !class.starts_with(CLASS_PREFIX))
        .collect();
    classes.push(lang.class_name());
    classes.join(" ")
}
