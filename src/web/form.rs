//! Binds `.enroll-form` to the enrollment flow.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::js_error;
use crate::config::SiteConfig;
use crate::enroll::{self, EnrollmentForm, EnrollmentRecord};
use crate::net::api::RestTable;

const FORM_SELECTOR: &str = ".enroll-form";
const SUBMIT_SELECTOR: &str = ".submit-btn";

pub(super) fn bind(document: &Document, config: &SiteConfig) {
    let form = match document.query_selector(FORM_SELECTOR) {
        Ok(Some(form)) => form,
        Ok(None) => return,
        Err(e) => {
            log::warn!("enrollment form lookup failed: {}", js_error(&e));
            return;
        }
    };
    let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
        log::warn!("{FORM_SELECTOR} is not a form element");
        return;
    };

    let sink = config.backend.as_ref().map(|backend| Rc::new(RestTable::new(backend)));
    if sink.is_none() {
        log::warn!("enrollment backend not configured; submissions will fail");
    }

    let document = document.clone();
    let form_for_cb = form.clone();
    let cb = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        let lang = enroll::form_language(document.document_element().and_then(|el| el.get_attribute("lang")).as_deref());
        let mut view = PageForm { document: document.clone(), form: form_for_cb.clone() };
        let sink = sink.clone();
        wasm_bindgen_futures::spawn_local(async move {
            enroll::submit(&mut view, sink.as_deref(), lang).await;
        });
    }) as Box<dyn FnMut(Event)>);

    match form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref()) {
        Ok(()) => cb.forget(),
        Err(e) => log::error!("enrollment submit listener failed: {}", js_error(&e)),
    }
}

struct PageForm {
    document: Document,
    form: HtmlFormElement,
}

impl PageForm {
    fn field(&self, id: &str) -> String {
        let Some(el) = self.document.get_element_by_id(id) else {
            log::warn!("enrollment field #{id} missing");
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            el.text_content().unwrap_or_default()
        }
    }

    fn submit_button(&self) -> Option<Element> {
        self.form.query_selector(SUBMIT_SELECTOR).ok().flatten()
    }
}

impl EnrollmentForm for PageForm {
    fn read_record(&self) -> EnrollmentRecord {
        EnrollmentRecord {
            full_name: self.field("name"),
            email: self.field("email"),
            path_preference: self.field("path"),
        }
    }

    fn submit_label(&self) -> String {
        self.submit_button().and_then(|b| b.text_content()).unwrap_or_default()
    }

    fn set_submitting(&mut self, busy: bool, label: &str) {
        let Some(button) = self.submit_button() else {
            return;
        };
        if let Err(e) = button.toggle_attribute_with_force("disabled", busy) {
            log::warn!("submit button toggle failed: {}", js_error(&e));
        }
        button.set_text_content(Some(label));
    }

    fn alert(&mut self, message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            log::warn!("alert failed: {}", js_error(&e));
        }
    }

    fn reset(&mut self) {
        self.form.reset();
    }
}
