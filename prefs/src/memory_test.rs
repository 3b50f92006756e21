use super::*;

#[test]
fn new_document_has_root_and_body() {
    let doc = MemoryDocument::new();
    assert_eq!(doc.element(doc.root_id()).map(|el| el.tag.as_str()), Some("html"));
    assert_eq!(doc.body().and_then(|b| doc.element(b)).map(|el| el.tag.as_str()), Some("body"));
}

#[test]
fn queries_follow_selectors() {
    let mut doc = MemoryDocument::new();
    let heading = doc.append_to_body("h1", &[("data-en", "Hi"), ("data-ar", "مرحبا")]);
    let input = doc.append_to_body("input", &[("data-en-placeholder", "Name")]);
    let textarea = doc.append_to_body("textarea", &[("data-en-placeholder", "Message")]);
    let link = doc.append_to_body("a", &[("href", "./a.html")]);
    doc.append_to_body("a", &[("name", "anchor-without-href")]);

    assert_eq!(doc.translatable_nodes(), vec![heading]);
    assert_eq!(doc.placeholder_inputs(), vec![input]);
    assert!(!doc.placeholder_inputs().contains(&textarea));
    assert_eq!(doc.anchors(), vec![link]);
}

#[test]
fn element_by_id_finds_controls() {
    let mut doc = MemoryDocument::new();
    let button = doc.append_to_body("button", &[("id", "lang-switch")]);
    assert_eq!(doc.element_by_id("lang-switch"), Some(button));
    assert_eq!(doc.element_by_id("theme-switch"), None);
}

#[test]
fn set_text_replaces_children() {
    let mut doc = MemoryDocument::new();
    let p = doc.append_to_body("p", &[]);
    doc.append(p, "strong", &[]);
    assert!(doc.has_child_elements(&p));

    doc.set_text(&p, "plain").unwrap();
    assert!(!doc.has_child_elements(&p));
    assert_eq!(doc.content(p), Content::Text("plain".to_owned()));
}

#[test]
fn markup_with_tags_counts_as_child_elements() {
    let mut doc = MemoryDocument::new();
    let p = doc.append_to_body("p", &[]);
    doc.set_markup(&p, "<b>bold</b>").unwrap();
    assert!(doc.has_child_elements(&p));
}

#[test]
fn rejected_attribute_writes_fail() {
    let mut doc = MemoryDocument::new();
    doc.reject_attribute("dir");
    let root = doc.root_id();
    assert!(doc.set_attribute(&root, "dir", "rtl").is_err());
    assert!(doc.set_attribute(&root, "lang", "ar").is_ok());
}

#[test]
fn replaced_subtree_drops_out_of_queries() {
    let mut doc = MemoryDocument::new();
    let p = doc.append_to_body("p", &[("data-en", "<b>y</b>"), ("data-ar", "<b>ص</b>")]);
    let old_link = doc.append(p, "a", &[("href", "./old.html"), ("id", "inner")]);
    assert_eq!(doc.anchors(), vec![old_link]);

    crate::apply::apply_language(&mut doc, crate::preference::Language::En).unwrap();

    assert!(doc.anchors().is_empty());
    assert_eq!(doc.element_by_id("inner"), None);
    assert_eq!(doc.translatable_nodes(), vec![p]);
}

#[test]
fn queries_return_document_order() {
    let mut doc = MemoryDocument::new();
    let section = doc.append_to_body("section", &[]);
    let later = doc.append_to_body("a", &[("href", "./b.html")]);
    let nested = doc.append(section, "a", &[("href", "./a.html")]);
    assert_eq!(doc.anchors(), vec![nested, later]);
}
