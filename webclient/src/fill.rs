//! Builds the sign-in form submission out of a fetched console page.
//!
//! The located username/password fields get the stored values, every
//! other named input of the enclosing form is carried through untouched
//! (csrf tokens and the like), and the account widget is seeded from the
//! account id embedded in the console link. Fields that already hold a
//! value are never overwritten.

use scraper::{ElementRef, Html};

use crate::locator::{self, FieldMatch, FieldRole};
use crate::model::CredentialRecord;
use crate::patterns;
use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The form was located, filled and submitted.
    Submitted,
    /// No fillable field was found. Not an error; the page may still be
    /// rendering, or someone already signed in.
    FieldsNotFound,
}

/// A ready-to-post form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFill {
    /// Raw `action` attribute of the form, if any; relative to the page.
    pub action: Option<String>,
    pub params: Vec<(String, String)>,
}

/// Work out what to submit. `None` when nothing needs filling: no field
/// was located, the record has no values for the located fields, or the
/// fields already carry values.
pub fn build_login_fill(doc: &Html, record: &CredentialRecord) -> Option<FormFill> {
    let mut targets: Vec<(FieldMatch, String, String)> = Vec::new();

    for (role, fallback_name, value) in [
        (FieldRole::Username, "username", record.username.as_str()),
        (FieldRole::Password, "password", record.password.as_str()),
    ] {
        if value.is_empty() {
            continue;
        }
        let Some(m) = locator::locate(doc, role) else {
            continue;
        };
        if !field_value_is_empty(&m) {
            log::debug!("{:?} field already holds a value, left untouched", role);
            continue;
        }
        let name = m.name().unwrap_or(fallback_name).to_owned();
        targets.push((m, name, value.to_owned()));
    }

    if targets.is_empty() {
        return None;
    }

    let form = targets
        .iter()
        .find_map(|(m, _, _)| enclosing_form(m.element));

    let mut params: Vec<(String, String)> = Vec::new();
    if let Some(form) = form {
        let sel_input = util::selector_must_parsed("input");
        for input in form.select(&sel_input) {
            let Some(name) = input.value().attr("name") else {
                continue;
            };
            if targets.iter().any(|(m, _, _)| m.element.id() == input.id()) {
                continue;
            }
            let existing = input.value().attr("value").unwrap_or("");
            if name == "account" && existing.is_empty() {
                if let Some(account) = patterns::console_account_id(&record.console_link) {
                    params.push((name.to_owned(), account.to_owned()));
                    continue;
                }
            }
            params.push((name.to_owned(), existing.to_owned()));
        }
    }
    for (_, name, value) in targets {
        params.push((name, value));
    }

    let action = form
        .and_then(|f| f.value().attr("action"))
        .map(ToOwned::to_owned);

    Some(FormFill { action, params })
}

fn field_value_is_empty(m: &FieldMatch) -> bool {
    m.element
        .value()
        .attr("value")
        .map(|v| v.trim().is_empty())
        .unwrap_or(true)
}

fn enclosing_form<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "form")
}

#[cfg(test)]
mod test {
    use super::*;

    fn record() -> CredentialRecord {
        CredentialRecord {
            console_link: "https://123456789012.signin.aws.amazon.com/console".to_owned(),
            username: "lab-poridhi".to_owned(),
            password: "P@ssw0rd!".to_owned(),
            ..Default::default()
        }
    }

    fn param<'a>(fill: &'a FormFill, name: &str) -> Option<&'a str> {
        fill.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn fills_form_and_carries_hidden_inputs() {
        let doc = Html::parse_document(concat!(
            r#"<form action="/signin">"#,
            r#"<input type="hidden" name="csrf" value="tok123">"#,
            r#"<input type="text" name="account" value="">"#,
            r#"<input type="text" name="username">"#,
            r#"<input type="password" name="password">"#,
            "</form>",
        ));
        let fill = build_login_fill(&doc, &record()).unwrap();

        assert_eq!(fill.action.as_deref(), Some("/signin"));
        assert_eq!(param(&fill, "csrf"), Some("tok123"));
        assert_eq!(param(&fill, "account"), Some("123456789012"));
        assert_eq!(param(&fill, "username"), Some("lab-poridhi"));
        assert_eq!(param(&fill, "password"), Some("P@ssw0rd!"));
    }

    #[test]
    fn prefilled_fields_are_never_overwritten() {
        let doc = Html::parse_document(concat!(
            r#"<form action="/signin">"#,
            r#"<input type="text" name="username" value="someone-else">"#,
            r#"<input type="password" name="password">"#,
            "</form>",
        ));
        let fill = build_login_fill(&doc, &record()).unwrap();

        // existing value rides along unchanged
        assert_eq!(param(&fill, "username"), Some("someone-else"));
        assert_eq!(param(&fill, "password"), Some("P@ssw0rd!"));
    }

    #[test]
    fn nothing_to_fill_yields_none() {
        // both fields already hold values
        let doc = Html::parse_document(concat!(
            r#"<form><input type="text" name="username" value="a-user">"#,
            r#"<input type="password" name="password" value="a-pass"></form>"#,
        ));
        assert!(build_login_fill(&doc, &record()).is_none());

        // no form fields at all
        let doc = Html::parse_document("<p>maintenance page</p>");
        assert!(build_login_fill(&doc, &record()).is_none());

        // fields exist, but the record is empty
        let doc = Html::parse_document(
            r#"<form><input type="text" name="username"><input type="password" name="password"></form>"#,
        );
        assert!(build_login_fill(&doc, &CredentialRecord::default()).is_none());
    }

    #[test]
    fn formless_fields_still_produce_params() {
        let doc = Html::parse_document(concat!(
            r#"<div><input type="text" name="username">"#,
            r#"<input type="password" name="password"></div>"#,
        ));
        let fill = build_login_fill(&doc, &record()).unwrap();
        assert_eq!(fill.action, None);
        assert_eq!(fill.params.len(), 2);
    }
}
