use super::*;

// =============================================================
// Language
// =============================================================

#[test]
fn language_default_is_arabic() {
    assert_eq!(Language::default(), Language::Ar);
}

#[test]
fn language_parse_accepts_known_codes_only() {
    assert_eq!(Language::parse("ar"), Some(Language::Ar));
    assert_eq!(Language::parse(" en "), Some(Language::En));
    assert_eq!(Language::parse("EN"), None);
    assert_eq!(Language::parse("fr"), None);
    assert_eq!(Language::parse(""), None);
}

#[test]
fn language_opposite_flips() {
    assert_eq!(Language::Ar.opposite(), Language::En);
    assert_eq!(Language::En.opposite(), Language::Ar);
}

#[test]
fn language_dir_is_rtl_only_for_arabic() {
    assert_eq!(Language::Ar.dir(), "rtl");
    assert_eq!(Language::En.dir(), "ltr");
}

#[test]
fn switch_label_names_the_other_language() {
    assert_eq!(Language::Ar.switch_label(), "English");
    assert_eq!(Language::En.switch_label(), "العربية");
}

#[test]
fn theme_switch_title_is_in_active_language() {
    assert_eq!(Language::Ar.theme_switch_title(), "تبديل المظهر");
    assert_eq!(Language::En.theme_switch_title(), "Toggle Theme");
}

#[test]
fn variant_attributes_follow_document_contract() {
    assert_eq!(Language::Ar.content_attr(), "data-ar");
    assert_eq!(Language::En.content_attr(), "data-en");
    assert_eq!(Language::Ar.placeholder_attr(), "data-ar-placeholder");
    assert_eq!(Language::En.placeholder_attr(), "data-en-placeholder");
}

// =============================================================
// Theme
// =============================================================

#[test]
fn theme_default_is_dark() {
    assert_eq!(Theme::default(), Theme::Dark);
}

#[test]
fn theme_parse_and_opposite() {
    assert_eq!(Theme::parse("light"), Some(Theme::Light));
    assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
    assert_eq!(Theme::parse("sepia"), None);
    assert_eq!(Theme::Dark.opposite(), Theme::Light);
    assert_eq!(Theme::Light.opposite(), Theme::Dark);
}

// =============================================================
// Preference
// =============================================================

#[test]
fn preference_default_is_arabic_dark() {
    let pref = Preference::default();
    assert_eq!(pref, Preference::new(Language::Ar, Theme::Dark));
}

#[test]
fn serde_uses_lowercase_codes() {
    assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
    assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    let lang: Language = serde_json::from_str("\"ar\"").unwrap();
    assert_eq!(lang, Language::Ar);
}
