//! Field locator: finds the username/password input of a sign-in page.
//!
//! Selector tiers are ordered from the most specific attribute match down
//! to a bare input-type scan. The first tier that yields any fillable
//! candidate wins, and within that tier the first candidate in document
//! order is returned; later tiers are never consulted.

use scraper::{ElementRef, Html};

use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Username,
    Password,
}

/// Inputs named like this belong to the account-id widget and must never
/// be treated as a username field.
const RESERVED_ACCOUNT_NAME: &str = "account";

const USERNAME_SELECTORS: [&str; 6] = [
    r#"input[name="username"]"#,
    r#"input[id="username"]"#,
    r#"input[aria-labelledby="username-label"]"#,
    r#"div[data-testid="username"] input"#,
    r#"input[autocomplete="username"]"#,
    r#"input[type="text"]:not([name="account"])"#,
];

const PASSWORD_SELECTORS: [&str; 7] = [
    r#"input[name="password"]"#,
    r#"input[id="password"]"#,
    r#"input[aria-labelledby="password-label"]"#,
    r#"div[data-testid="password"] input"#,
    r#"input[type="password"]"#,
    r#"input[autocomplete="current-password"]"#,
    r#"form input[type="password"]"#,
];

impl FieldRole {
    pub const fn selector_tiers(&self) -> &'static [&'static str] {
        match self {
            FieldRole::Username => &USERNAME_SELECTORS,
            FieldRole::Password => &PASSWORD_SELECTORS,
        }
    }
}

/// A located input element, together with the selector tier that found it.
/// Lives only as long as the parsed document.
#[derive(Debug, Clone, Copy)]
pub struct FieldMatch<'a> {
    pub element: ElementRef<'a>,
    pub selector: &'static str,
}

impl<'a> FieldMatch<'a> {
    pub fn name(&self) -> Option<&'a str> {
        self.element.value().attr("name")
    }

    pub fn id(&self) -> Option<&'a str> {
        self.element.value().attr("id")
    }
}

/// Find the best-candidate input for `role`. Pure read; absence is `None`.
pub fn locate(doc: &Html, role: FieldRole) -> Option<FieldMatch<'_>> {
    for &selector in role.selector_tiers() {
        let sel = util::selector_must_parsed(selector);
        let hit = doc.select(&sel).find(|el| {
            if !is_fillable(*el) {
                return false;
            }
            if role == FieldRole::Username
                && el.value().attr("name") == Some(RESERVED_ACCOUNT_NAME)
            {
                return false;
            }
            true
        });
        if let Some(element) = hit {
            log::debug!("{:?} field found with selector: {}", role, selector);
            return Some(FieldMatch { element, selector });
        }
    }
    log::debug!("{:?} field not found", role);
    None
}

/// Static-DOM rendition of the browser visibility check: the element is
/// attached to layout (no hidden ancestor), enabled, writable, and not
/// styled out of view.
pub fn is_fillable(el: ElementRef) -> bool {
    let e = el.value();
    if e.attr("disabled").is_some() || e.attr("readonly").is_some() {
        return false;
    }
    if e.attr("type") == Some("hidden") || e.attr("hidden").is_some() {
        return false;
    }
    if style_hides(e.attr("style")) {
        return false;
    }
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .all(|a| a.value().attr("hidden").is_none() && !style_hides(a.value().attr("style")))
}

fn style_hides(style: Option<&str>) -> bool {
    let Some(style) = style else {
        return false;
    };
    let style: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    style.contains("display:none") || style.contains("visibility:hidden")
}

/// Whether a markup fragment looks like it carries a sign-in form
/// (drives out-of-band retry nudges on dynamic pages).
pub fn looks_login_markup(html: &str) -> bool {
    [
        r#"type="password""#,
        r#"name="username""#,
        r#"name="password""#,
        r#"data-testid="username""#,
        r#"data-testid="password""#,
    ]
    .iter()
    .any(|marker| html.contains(marker))
}

#[cfg(test)]
mod test {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn exact_name_beats_bare_type_scan() {
        let doc = doc(concat!(
            r#"<input type="text" id="first">"#,
            r#"<input type="text" name="username" id="second">"#,
        ));
        let m = locate(&doc, FieldRole::Username).unwrap();
        assert_eq!(m.id(), Some("second"));
        assert_eq!(m.selector, r#"input[name="username"]"#);
    }

    #[test]
    fn first_document_order_match_wins_within_a_tier() {
        let doc = doc(concat!(
            r#"<input type="text" id="a">"#,
            r#"<input type="text" id="b">"#,
        ));
        let m = locate(&doc, FieldRole::Username).unwrap();
        assert_eq!(m.id(), Some("a"));
    }

    #[test]
    fn account_input_is_never_a_username() {
        let doc = doc(r#"<input type="text" name="account" id="acct">"#);
        assert!(locate(&doc, FieldRole::Username).is_none());

        // ...even when a more specific tier would match it.
        let doc2 = self::doc(r#"<input type="text" id="username" name="account">"#);
        assert!(locate(&doc2, FieldRole::Username).is_none());
    }

    #[test]
    fn hidden_disabled_readonly_are_skipped() {
        let doc = doc(concat!(
            r#"<input type="password" id="p1" style="display:none">"#,
            r#"<input type="password" id="p2" disabled>"#,
            r#"<input type="password" id="p3" readonly>"#,
            r#"<input type="password" id="p4" style="visibility: hidden">"#,
        ));
        assert!(locate(&doc, FieldRole::Password).is_none());
    }

    #[test]
    fn sole_display_none_password_reports_not_found() {
        let doc = doc(r#"<input type="password" id="password" style="display:none">"#);
        assert!(locate(&doc, FieldRole::Password).is_none());
    }

    #[test]
    fn hidden_ancestor_detaches_the_field() {
        let doc = doc(concat!(
            r#"<div style="display: none"><input type="password" id="hidden-one"></div>"#,
            r#"<div><input type="password" id="shown-one"></div>"#,
        ));
        let m = locate(&doc, FieldRole::Password).unwrap();
        assert_eq!(m.id(), Some("shown-one"));
    }

    #[test]
    fn visible_password_found_by_bare_type_scan() {
        let doc = doc(r#"<form><input type="password" class="xyz"></form>"#);
        let m = locate(&doc, FieldRole::Password).unwrap();
        assert_eq!(m.selector, r#"input[type="password"]"#);
    }

    #[test]
    fn login_markup_hints() {
        assert!(looks_login_markup(r#"<input type="password">"#));
        assert!(looks_login_markup(r#"<input name="username">"#));
        assert!(!looks_login_markup("<p>nothing to sign into</p>"));
    }
}
