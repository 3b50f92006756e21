use super::*;
use crate::memory::{Content, MemoryDocument, NodeId};

// =============================================================
// Helpers
// =============================================================

struct Page {
    doc: MemoryDocument,
    lang_switch: NodeId,
    theme_switch: NodeId,
    heading: NodeId,
    rich: NodeId,
    arabic_only: NodeId,
    name_input: NodeId,
    local_link: NodeId,
    external_link: NodeId,
    script_link: NodeId,
}

fn sample_page() -> Page {
    let mut doc = MemoryDocument::new();
    let lang_switch = doc.append_to_body("button", &[("id", "lang-switch")]);
    let theme_switch = doc.append_to_body("button", &[("id", "theme-switch")]);
    let heading = doc.append_to_body("h1", &[("data-ar", "ابدأ رحلتك"), ("data-en", "Start your journey")]);
    let rich = doc.append_to_body(
        "p",
        &[("data-ar", "تعلم <strong>البرمجة</strong>"), ("data-en", "Learn <strong>coding</strong>")],
    );
    let arabic_only = doc.append_to_body("span", &[("data-en", ""), ("data-ar", "عربي فقط")]);
    let name_input = doc.append_to_body(
        "input",
        &[("id", "name"), ("data-ar-placeholder", "الاسم الكامل"), ("data-en-placeholder", "Full name")],
    );
    let local_link = doc.append_to_body("a", &[("href", "./courses.html")]);
    let external_link = doc.append_to_body("a", &[("href", "https://external.example/")]);
    let script_link = doc.append_to_body("a", &[("href", "javascript:void(0)")]);
    Page {
        doc,
        lang_switch,
        theme_switch,
        heading,
        rich,
        arabic_only,
        name_input,
        local_link,
        external_link,
        script_link,
    }
}

fn location() -> PageLocation {
    PageLocation::parse("https://edupath.example/index.html")
}

// =============================================================
// apply_preference
// =============================================================

#[test]
fn every_preference_pair_sets_expected_attributes() {
    for language in [Language::Ar, Language::En] {
        for theme in [Theme::Dark, Theme::Light] {
            let mut page = sample_page();
            apply_preference(&mut page.doc, &location(), Preference::new(language, theme)).unwrap();

            let root = page.doc.root_id();
            let body = page.doc.body_id();
            assert_eq!(page.doc.attr(root, "lang"), Some(language.as_str()));
            assert_eq!(page.doc.attr(root, "dir"), Some(language.dir()));
            assert_eq!(page.doc.attr(root, "class"), Some(language.class_name()));
            assert_eq!(page.doc.attr(root, "data-theme"), Some(theme.as_str()));
            assert_eq!(page.doc.attr(body, "data-theme"), Some(theme.as_str()));
            let other_language = match language {
                Language::Ar => "English",
                Language::En => "العربية",
            };
            assert_eq!(page.doc.content(page.lang_switch), Content::Text(other_language.to_owned()));
        }
    }
}

#[test]
fn applying_twice_yields_identical_document() {
    let mut page = sample_page();
    let pref = Preference::new(Language::En, Theme::Light);
    apply_preference(&mut page.doc, &location(), pref).unwrap();
    let first = format!("{:?}", page.doc);
    apply_preference(&mut page.doc, &location(), pref).unwrap();
    assert_eq!(format!("{:?}", page.doc), first);
}

// =============================================================
// apply_language
// =============================================================

#[test]
fn theme_switch_title_follows_language() {
    let mut page = sample_page();
    apply_language(&mut page.doc, Language::En).unwrap();
    assert_eq!(page.doc.attr(page.theme_switch, "title"), Some("Toggle Theme"));
    apply_language(&mut page.doc, Language::Ar).unwrap();
    assert_eq!(page.doc.attr(page.theme_switch, "title"), Some("تبديل المظهر"));
}

#[test]
fn plain_variant_replaces_text() {
    let mut page = sample_page();
    apply_language(&mut page.doc, Language::En).unwrap();
    assert_eq!(page.doc.content(page.heading), Content::Text("Start your journey".to_owned()));
}

#[test]
fn markup_variant_replaces_markup() {
    let mut page = sample_page();
    apply_language(&mut page.doc, Language::En).unwrap();
    assert_eq!(page.doc.content(page.rich), Content::Markup("Learn <strong>coding</strong>".to_owned()));
}

#[test]
fn node_with_child_elements_gets_markup_even_for_plain_variant() {
    let mut page = sample_page();
    let card = page.doc.append_to_body("div", &[("data-ar", "بطاقة"), ("data-en", "Card")]);
    page.doc.append(card, "img", &[("src", "card.webp")]);
    apply_language(&mut page.doc, Language::En).unwrap();
    assert_eq!(page.doc.content(card), Content::Markup("Card".to_owned()));
}

#[test]
fn missing_or_empty_variant_leaves_node_unchanged() {
    let mut page = sample_page();
    apply_language(&mut page.doc, Language::Ar).unwrap();
    assert_eq!(page.doc.content(page.arabic_only), Content::Text("عربي فقط".to_owned()));
    apply_language(&mut page.doc, Language::En).unwrap();
    assert_eq!(page.doc.content(page.arabic_only), Content::Text("عربي فقط".to_owned()));
}

#[test]
fn placeholders_follow_language() {
    let mut page = sample_page();
    apply_language(&mut page.doc, Language::En).unwrap();
    assert_eq!(page.doc.attr(page.name_input, "placeholder"), Some("Full name"));
    apply_language(&mut page.doc, Language::Ar).unwrap();
    assert_eq!(page.doc.attr(page.name_input, "placeholder"), Some("الاسم الكامل"));
}

#[test]
fn root_keeps_unrelated_classes() {
    let mut doc = MemoryDocument::new();
    let root = doc.root_id();
    doc.set_attribute(&root, "class", "no-js lang-en home").unwrap();
    apply_language(&mut doc, Language::Ar).unwrap();
    assert_eq!(doc.attr(root, "class"), Some("no-js home lang-ar"));
}

#[test]
fn document_without_controls_still_applies() {
    let mut doc = MemoryDocument::new();
    apply_language(&mut doc, Language::En).unwrap();
    assert_eq!(doc.attr(doc.root_id(), "lang"), Some("en"));
}

#[test]
fn rejected_write_surfaces_after_partial_apply() {
    let mut page = sample_page();
    page.doc.reject_attribute("dir");
    let err = apply_language(&mut page.doc, Language::En).unwrap_err();
    assert!(matches!(err, TreeError::Attribute { .. }));
    assert_eq!(page.doc.attr(page.doc.root_id(), "lang"), Some("en"));
}

// =============================================================
// apply_theme
// =============================================================

#[test]
fn theme_applies_to_root_when_body_not_parsed() {
    let mut doc = MemoryDocument::without_body();
    apply_theme(&mut doc, Theme::Light).unwrap();
    assert_eq!(doc.attr(doc.root_id(), "data-theme"), Some("light"));
}

// =============================================================
// refresh_links
// =============================================================

#[test]
fn refresh_links_touches_only_local_anchors() {
    let mut page = sample_page();
    let count = refresh_links(&mut page.doc, &location(), Preference::new(Language::En, Theme::Dark));
    assert_eq!(count, 1);
    assert_eq!(page.doc.attr(page.local_link, "href"), Some("./courses.html?lang=en&theme=dark"));
    assert_eq!(page.doc.attr(page.external_link, "href"), Some("https://external.example/"));
    assert_eq!(page.doc.attr(page.script_link, "href"), Some("javascript:void(0)"));
}

#[test]
fn refresh_links_skips_unchanged_anchors() {
    let mut page = sample_page();
    let pref = Preference::new(Language::Ar, Theme::Light);
    assert_eq!(refresh_links(&mut page.doc, &location(), pref), 1);
    assert_eq!(refresh_links(&mut page.doc, &location(), pref), 0);
}

#[test]
fn refresh_links_survives_rejected_anchor_write() {
    let mut page = sample_page();
    page.doc.reject_attribute("href");
    let count = refresh_links(&mut page.doc, &location(), Preference::default());
    assert_eq!(count, 0);
    assert_eq!(page.doc.attr(page.local_link, "href"), Some("./courses.html"));
}

// =============================================================
// swap_language_class
// =============================================================

#[test]
fn swap_language_class_keeps_exactly_one_language_class() {
    assert_eq!(swap_language_class(None, Language::Ar), "lang-ar");
    assert_eq!(swap_language_class(Some("lang-ar lang-en"), Language::En), "lang-en");
    assert_eq!(swap_language_class(Some("  dark   lang-ar "), Language::En), "dark lang-en");
}
