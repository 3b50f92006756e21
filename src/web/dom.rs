//! [`DocumentTree`] over the live page.

use prefs::error::TreeError;
use prefs::tree::{ANCHOR_SELECTOR, PLACEHOLDER_SELECTOR, TRANSLATABLE_SELECTOR};
use prefs::DocumentTree;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::js_error;

pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("query {selector:?} failed: {}", js_error(&e));
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl DocumentTree for WebDocument {
    type Node = Element;

    fn root(&self) -> Result<Element, TreeError> {
        self.document.document_element().ok_or(TreeError::Missing("document element"))
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn translatable_nodes(&self) -> Vec<Element> {
        self.query_all(TRANSLATABLE_SELECTOR)
    }

    fn placeholder_inputs(&self) -> Vec<Element> {
        self.query_all(PLACEHOLDER_SELECTOR)
    }

    fn anchors(&self) -> Vec<Element> {
        self.query_all(ANCHOR_SELECTOR)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), TreeError> {
        node.set_attribute(name, value)
            .map_err(|e| TreeError::Attribute { name: name.to_owned(), reason: js_error(&e) })
    }

    fn has_child_elements(&self, node: &Element) -> bool {
        node.child_element_count() > 0
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<(), TreeError> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn set_markup(&mut self, node: &Element, markup: &str) -> Result<(), TreeError> {
        node.set_inner_html(markup);
        Ok(())
    }
}
