//! Document tree seam consumed by the apply functions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser boundary implements [`DocumentTree`] over `web_sys::Element`;
//! [`crate::memory::MemoryDocument`] implements it for tests. Only the
//! queries the synchronizer actually needs are exposed, so the trait stays
//! small enough to fake.

use crate::error::TreeError;

/// Elements carrying per-language content variants.
pub const TRANSLATABLE_SELECTOR: &str = "[data-en]";
/// Inputs carrying per-language placeholder variants.
pub const PLACEHOLDER_SELECTOR: &str = "input[data-en-placeholder]";
/// Outbound anchors.
pub const ANCHOR_SELECTOR: &str = "a[href]";
/// Marker set on a control once its click handler is attached.
pub const BOUND_ATTR: &str = "data-sync-bound";

/// Read/write access to the live document.
pub trait DocumentTree {
    type Node: Clone;

    /// The document element (`<html>`).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Missing`] when the document has no root.
    fn root(&self) -> Result<Self::Node, TreeError>;

    /// The `<body>` element, once parsed.
    fn body(&self) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Every element matching [`TRANSLATABLE_SELECTOR`], in document order.
    fn translatable_nodes(&self) -> Vec<Self::Node>;

    /// Every element matching [`PLACEHOLDER_SELECTOR`], in document order.
    fn placeholder_inputs(&self) -> Vec<Self::Node>;

    /// Every element matching [`ANCHOR_SELECTOR`], in document order.
    fn anchors(&self) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`TreeError::Attribute`] when the document rejects the write.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<(), TreeError>;

    fn has_child_elements(&self, node: &Self::Node) -> bool;

    /// Replace the node's children with a single text node.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Content`] when the document rejects the write.
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), TreeError>;

    /// Replace the node's children with parsed markup.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Content`] when the document rejects the write.
    fn set_markup(&mut self, node: &Self::Node, markup: &str) -> Result<(), TreeError>;
}

/// The two toggle controls the page may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    LanguageSwitch,
    ThemeSwitch,
}

impl Control {
    pub const ALL: [Self; 2] = [Self::LanguageSwitch, Self::ThemeSwitch];

    /// Element id of the control.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::LanguageSwitch => "lang-switch",
            Self::ThemeSwitch => "theme-switch",
        }
    }
}

/// Attaches click handlers to controls. Called at most once per control
/// element; the synchronizer tracks that through [`BOUND_ATTR`].
pub trait ControlBinder<N> {
    /// # Errors
    ///
    /// Returns [`TreeError::Bind`] if the handler cannot be attached.
    fn bind(&mut self, control: Control, node: &N) -> Result<(), TreeError>;
}
