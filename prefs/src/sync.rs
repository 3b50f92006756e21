//! The preference synchronizer: resolve, apply, persist, broadcast.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`Synchronizer`] lives per page. The browser boundary owns it and
//! forwards four events: page activation (fresh load), back/forward cache
//! restore, control clicks, and inbound channel messages. Everything here is
//! synchronous and runs on the UI thread.
//!
//! ERROR HANDLING
//! ==============
//! Public entry points never return errors. Store failures degrade to
//! "absent"; a missing channel disables cross-tab sync; any other failure is
//! logged and whatever was applied before it stays applied.

use crate::apply;
use crate::channel::{SyncChannel, SyncMessage};
use crate::error::{SyncError, TreeError};
use crate::links::PageLocation;
use crate::preference::{LANG_PARAM, LANG_STORAGE_KEY, Language, Preference, THEME_PARAM, THEME_STORAGE_KEY, Theme};
use crate::store::PreferenceStore;
use crate::tree::{BOUND_ATTR, Control, ControlBinder, DocumentTree};

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

/// How the page became active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Fresh load: URL parameters win over the store.
    Load,
    /// Shown again from the back/forward cache: the cached URL is stale, so
    /// the store wins.
    Restore,
}

/// Per-page preference state plus the document, store and channel it drives.
pub struct Synchronizer<T, S, C>
where
    T: DocumentTree,
    S: PreferenceStore,
    C: SyncChannel,
{
    tree: T,
    store: S,
    channel: Option<C>,
    page: PageLocation,
    state: Preference,
}

impl<T, S, C> Synchronizer<T, S, C>
where
    T: DocumentTree,
    S: PreferenceStore,
    C: SyncChannel,
{
    /// `channel` is `None` when the host could not open a broadcast channel.
    pub fn new(tree: T, store: S, channel: Option<C>) -> Self {
        Self { tree, store, channel, page: PageLocation::default(), state: Preference::default() }
    }

    /// Fresh-load initialization for the page at `page_url`.
    pub fn init<B>(&mut self, page_url: &str, binder: &mut B) -> Preference
    where
        B: ControlBinder<T::Node>,
    {
        self.page = PageLocation::parse(page_url);
        self.activate(Activation::Load, binder)
    }

    /// Apply just the theme for `page_url` while the document is still
    /// loading. Resolves URL, then store, then default, without writing the
    /// store; [`Synchronizer::init`] does the full pass later.
    pub fn preload_theme(&mut self, page_url: &str) -> Theme {
        self.page = PageLocation::parse(page_url);
        let theme = self
            .page
            .query_param(THEME_PARAM)
            .as_deref()
            .and_then(Theme::parse)
            .or_else(|| self.stored(THEME_STORAGE_KEY).as_deref().and_then(Theme::parse))
            .unwrap_or_default();
        self.state.theme = theme;
        if let Err(e) = apply::apply_theme(&mut self.tree, theme) {
            log::error!("early theme {} failed: {e}", theme.as_str());
        }
        theme
    }

    /// Re-run initialization after a back/forward cache restore.
    pub fn restore<B>(&mut self, binder: &mut B) -> Preference
    where
        B: ControlBinder<T::Node>,
    {
        self.activate(Activation::Restore, binder)
    }

    /// Resolve, apply, and bind controls. Errors are logged, never returned.
    pub fn activate<B>(&mut self, activation: Activation, binder: &mut B) -> Preference
    where
        B: ControlBinder<T::Node>,
    {
        if let Err(e) = self.try_activate(activation, binder) {
            log::error!("preference sync {activation:?} failed: {e}");
        }
        self.state
    }

    fn try_activate<B>(&mut self, activation: Activation, binder: &mut B) -> Result<(), SyncError>
    where
        B: ControlBinder<T::Node>,
    {
        self.state = self.resolve(activation);
        log::debug!(
            "preference resolved: lang={} theme={}",
            self.state.language.as_str(),
            self.state.theme.as_str()
        );
        let applied = apply::apply_preference(&mut self.tree, &self.page, self.state);
        self.bind_controls(binder)?;
        applied.map_err(SyncError::from)
    }

    /// Per axis: URL parameter (adopted and persisted), then store, then
    /// default. Restores skip the URL.
    fn resolve(&mut self, activation: Activation) -> Preference {
        let (url_lang, url_theme) = match activation {
            Activation::Load => (
                self.page.query_param(LANG_PARAM).as_deref().and_then(Language::parse),
                self.page.query_param(THEME_PARAM).as_deref().and_then(Theme::parse),
            ),
            Activation::Restore => (None, None),
        };

        let language = match url_lang {
            Some(lang) => {
                self.persist(LANG_STORAGE_KEY, lang.as_str());
                lang
            }
            None => self.stored(LANG_STORAGE_KEY).as_deref().and_then(Language::parse).unwrap_or_default(),
        };
        let theme = match url_theme {
            Some(theme) => {
                self.persist(THEME_STORAGE_KEY, theme.as_str());
                theme
            }
            None => self.stored(THEME_STORAGE_KEY).as_deref().and_then(Theme::parse).unwrap_or_default(),
        };
        Preference::new(language, theme)
    }

    fn bind_controls<B>(&mut self, binder: &mut B) -> Result<(), TreeError>
    where
        B: ControlBinder<T::Node>,
    {
        for control in Control::ALL {
            let Some(node) = self.tree.element_by_id(control.id()) else {
                continue;
            };
            if self.tree.attribute(&node, BOUND_ATTR).is_some() {
                continue;
            }
            binder.bind(control, &node)?;
            self.tree.set_attribute(&node, BOUND_ATTR, "true")?;
        }
        Ok(())
    }

    /// Dispatch a click on `control`.
    pub fn click(&mut self, control: Control) {
        match control {
            Control::LanguageSwitch => {
                self.toggle_language();
            }
            Control::ThemeSwitch => {
                self.toggle_theme();
            }
        }
    }

    /// Flip the language: store, document, links, then broadcast.
    pub fn toggle_language(&mut self) -> Language {
        let next = self.state.language.opposite();
        self.state.language = next;
        self.persist(LANG_STORAGE_KEY, next.as_str());
        if let Err(e) = apply::apply_language(&mut self.tree, next) {
            log::error!("applying language {} failed: {e}", next.as_str());
        }
        apply::refresh_links(&mut self.tree, &self.page, self.state);
        self.broadcast(SyncMessage::Language(next));
        next
    }

    /// Flip the theme: store, document, links, then broadcast.
    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.state.theme.opposite();
        self.state.theme = next;
        self.persist(THEME_STORAGE_KEY, next.as_str());
        if let Err(e) = apply::apply_theme(&mut self.tree, next) {
            log::error!("applying theme {} failed: {e}", next.as_str());
        }
        apply::refresh_links(&mut self.tree, &self.page, self.state);
        self.broadcast(SyncMessage::Theme(next));
        next
    }

    /// Apply a change made in another tab. Never rebroadcasts and never
    /// writes the store; the sender already did.
    pub fn receive(&mut self, message: SyncMessage) {
        let result = match message {
            SyncMessage::Language(lang) => {
                self.state.language = lang;
                apply::apply_language(&mut self.tree, lang)
            }
            SyncMessage::Theme(theme) => {
                self.state.theme = theme;
                apply::apply_theme(&mut self.tree, theme)
            }
        };
        if let Err(e) = result {
            log::error!("applying sync message {message:?} failed: {e}");
        }
        apply::refresh_links(&mut self.tree, &self.page, self.state);
    }

    /// Decode and apply a raw channel payload. Foreign payloads are ignored.
    pub fn receive_raw(&mut self, raw: &str) {
        match SyncMessage::decode(raw) {
            Ok(message) => self.receive(message),
            Err(e) => log::warn!("ignoring sync payload: {e}"),
        }
    }

    #[must_use]
    pub fn preference(&self) -> Preference {
        self.state
    }

    #[must_use]
    pub fn tree(&self) -> &T {
        &self.tree
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn page(&self) -> &PageLocation {
        &self.page
    }

    #[must_use]
    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }

    fn stored(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("reading {key} from store failed: {e}");
                None
            }
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            log::warn!("writing {key} to store failed: {e}");
        }
    }

    fn broadcast(&self, message: SyncMessage) {
        let Some(channel) = &self.channel else {
            return;
        };
        if let Err(e) = channel.publish(&message) {
            log::warn!("broadcasting {message:?} failed: {e}");
        }
    }
}
