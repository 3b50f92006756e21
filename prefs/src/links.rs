//! Page location parsing and outbound link rewriting.
//!
//! Rewriting rule: an `href` is rewritten when it is relative (but not empty
//! and not a bare `#fragment`), uses the `file` scheme, or is `http(s)` with
//! the same origin as the current page. Pseudo-protocols (`javascript:`,
//! `mailto:`, `tel:`), cross-origin targets, and hrefs that fail to parse are
//! left alone. Rewriting replaces any existing `lang`/`theme` parameters
//! and keeps every other query segment byte-for-byte, along with the
//! fragment. Relative hrefs stay relative, and rewriting is idempotent.

use url::{Origin, ParseError, Url, form_urlencoded};

use crate::preference::{LANG_PARAM, Preference, THEME_PARAM};

#[cfg(test)]
#[path = "links_test.rs"]
mod links_test;

/// The URL of the page the synchronizer runs in.
#[derive(Clone, Debug, Default)]
pub struct PageLocation {
    url: Option<Url>,
}

impl PageLocation {
    /// Parse the page URL. An unparseable URL yields a location with no
    /// query parameters and no origin.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => Self { url: Some(url) },
            Err(e) => {
                log::warn!("page url {raw:?} did not parse: {e}");
                Self { url: None }
            }
        }
    }

    /// First value of query parameter `name`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .as_ref()?
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    fn origin(&self) -> Option<Origin> {
        self.url.as_ref().map(Url::origin)
    }

    fn is_same_origin(&self, target: &Url) -> bool {
        self.origin().is_some_and(|origin| origin.is_tuple() && origin == target.origin())
    }
}

/// Compute the rewritten `href`, or `None` when the anchor must be left
/// untouched.
#[must_use]
pub fn rewrite_href(href: &str, page: &PageLocation, pref: Preference) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match Url::parse(href) {
        Ok(mut url) => {
            let eligible = match url.scheme() {
                "file" => true,
                "http" | "https" => page.is_same_origin(&url),
                _ => false,
            };
            if !eligible {
                return None;
            }
            set_pref_params(&mut url, pref);
            Some(url.into())
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            if href.starts_with("//") && !network_path_is_same_origin(href, page) {
                return None;
            }
            Some(rewrite_relative(href, pref))
        }
        Err(e) => {
            log::debug!("leaving href {href:?} untouched: {e}");
            None
        }
    }
}

/// `//host/path` references resolve against the page scheme and are only
/// local when they land on the page's own origin.
fn network_path_is_same_origin(href: &str, page: &PageLocation) -> bool {
    page.url()
        .and_then(|base| base.join(href).ok())
        .is_some_and(|target| page.is_same_origin(&target))
}

fn set_pref_params(url: &mut Url, pref: Preference) {
    let query = merged_query(url.query().unwrap_or(""), pref);
    url.set_query(Some(&query));
}

fn rewrite_relative(href: &str, pref: Preference) -> String {
    let (before_fragment, fragment) = match href.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (href, None),
    };
    let (path, query) = before_fragment.split_once('?').unwrap_or((before_fragment, ""));

    let mut out = format!("{path}?{}", merged_query(query, pref));
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Raw query with `lang`/`theme` replaced. Other segments are kept
/// byte-for-byte, in order.
fn merged_query(query: &str, pref: Preference) -> String {
    let lang = format!("{LANG_PARAM}={}", pref.language.as_str());
    let theme = format!("{THEME_PARAM}={}", pref.theme.as_str());
    let mut segments: Vec<&str> = query
        .split('&')
        .filter(|segment| !segment.is_empty() && !is_pref_segment(segment))
        .collect();
    segments.push(&lang);
    segments.push(&theme);
    segments.join("&")
}

fn is_pref_segment(segment: &str) -> bool {
    let raw_key = segment.split_once('=').map_or(segment, |(key, _)| key);
    form_urlencoded::parse(raw_key.as_bytes())
        .next()
        .is_some_and(|(key, _)| key == LANG_PARAM || key == THEME_PARAM)
}
