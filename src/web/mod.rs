//! Browser boundary: wires the preference core and the enrollment form to
//! the live page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The wasm module starts once per page load. It opens storage and the sync
//! channel, builds one [`Synchronizer`] for the page and keeps it in a
//! thread-local. If the document is still loading, the theme is applied
//! to the root element right away and the rest waits for DOMContentLoaded.
//! Control clicks, channel messages and back/forward cache restores all
//! dispatch into that single instance.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here panics. Missing browser APIs degrade to no persistence or
//! no cross-tab sync, and every event that cannot be delivered is logged.

mod broadcast;
mod dom;
mod form;
mod storage;

use std::cell::RefCell;

use prefs::error::TreeError;
use prefs::{Control, ControlBinder, Synchronizer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, PageTransitionEvent, Window};

use crate::config::SiteConfig;

pub use broadcast::WebBroadcast;
pub use dom::WebDocument;
pub use storage::WebStorage;

type PageSync = Synchronizer<WebDocument, WebStorage, WebBroadcast>;

thread_local! {
    static PAGE: RefCell<Option<PageSync>> = const { RefCell::new(None) };
}

/// wasm entry point.
///
/// While the document is still loading only the theme is applied, so the
/// page never paints in the wrong theme; everything else waits for
/// DOMContentLoaded.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("logger already installed"));
    }

    let Some(window) = web_sys::window() else {
        log::error!("no window; preference sync not started");
        return;
    };
    let Some(document) = window.document() else {
        log::error!("no document; preference sync not started");
        return;
    };
    let config = SiteConfig::from_build_env().unwrap_or_else(|e| {
        log::error!("site config invalid; enrollment disabled: {e}");
        SiteConfig::default()
    });
    let href = window.location().href().unwrap_or_default();

    let tree = WebDocument::new(document.clone());
    let store = WebStorage::open(&window);
    let channel = WebBroadcast::open(&config.channel_name, |raw| with_page(|sync| sync.receive_raw(&raw)));
    let mut sync = Synchronizer::new(tree, store, channel);

    if document.ready_state() == "loading" {
        sync.preload_theme(&href);
        PAGE.with(|page| *page.borrow_mut() = Some(sync));
        let boot_once = Closure::once_into_js(move || boot(&window, &config, &href));
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", boot_once.unchecked_ref()) {
            log::error!("DOMContentLoaded listener failed: {}", js_error(&e));
        }
    } else {
        PAGE.with(|page| *page.borrow_mut() = Some(sync));
        boot(&window, &config, &href);
    }
}

fn boot(window: &Window, config: &SiteConfig, href: &str) {
    with_page(|sync| {
        let pref = sync.init(href, &mut ClickBinder);
        log::info!("preferences applied: lang={} theme={}", pref.language.as_str(), pref.theme.as_str());
    });

    listen_page_show(window);
    match window.document() {
        Some(document) => form::bind(&document, config),
        None => log::error!("no document; enrollment form not bound"),
    }
}

fn listen_page_show(window: &Window) {
    let cb = Closure::wrap(Box::new(move |event: PageTransitionEvent| {
        if event.persisted() {
            with_page(|sync| {
                sync.restore(&mut ClickBinder);
            });
        }
    }) as Box<dyn FnMut(PageTransitionEvent)>);
    match window.add_event_listener_with_callback("pageshow", cb.as_ref().unchecked_ref()) {
        Ok(()) => cb.forget(),
        Err(e) => log::warn!("pageshow listener failed: {}", js_error(&e)),
    }
}

/// Run `f` against the page synchronizer, if it is running and not busy.
fn with_page(f: impl FnOnce(&mut PageSync)) {
    PAGE.with(|page| match page.try_borrow_mut() {
        Ok(mut guard) => match guard.as_mut() {
            Some(sync) => f(sync),
            None => log::warn!("preference sync not started; event dropped"),
        },
        Err(_) => log::warn!("preference sync busy; event dropped"),
    });
}

/// Attaches a click listener that forwards to the page synchronizer.
struct ClickBinder;

impl ControlBinder<Element> for ClickBinder {
    fn bind(&mut self, control: Control, node: &Element) -> Result<(), TreeError> {
        let cb = Closure::wrap(Box::new(move |_event: Event| {
            with_page(|sync| sync.click(control));
        }) as Box<dyn FnMut(Event)>);
        node.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .map_err(|e| TreeError::Bind { id: control.id().to_owned(), reason: js_error(&e) })?;
        cb.forget();
        Ok(())
    }
}

pub(crate) fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
