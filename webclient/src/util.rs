use scraper::{node::Element, ElementRef, Html, Selector};
use url::Url;

use crate::error::*;
use crate::http::Client;

/// Complete given link into fully qualified URL removing trailling slash.
pub fn complete_url(link: &str, host: &str) -> Result<Url> {
    let link = link.trim_end_matches('/');
    if link.starts_with('/') {
        self::parse_url(format!("https://{}{}", host, link))
    } else {
        self::parse_url(link)
    }
}

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

pub fn selector_must_parsed(sel: &'static str) -> Selector {
    Selector::parse(sel).expect("Failed to parse  `&'static str`  selector")
}

pub async fn fetch_html(c: &Client, url: Url) -> Result<Html> {
    let url_str = url.to_string();
    let resp = c.get(url).send().await?;

    let status = resp.status();
    if status != reqwest::StatusCode::OK {
        return Err(Error::UnexpectedResponseCode {
            got: status,
            expected: reqwest::StatusCode::OK,
            requested_url: url_str,
        });
    }

    let html = resp.text().await?;
    Ok(Html::parse_document(&html))
}

/// All descendant text of the element joined, leading/trailing
/// whitespace removed (the `textContent.trim()` of the browser world).
pub fn inner_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_owned()
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.classes().any(|c| c == class)
}

pub trait DocExt {
    fn select_first(&self, sel: &Selector) -> Option<ElementRef>;
}

impl DocExt for Html {
    fn select_first(&self, sel: &Selector) -> Option<ElementRef> {
        self.select(sel).next()
    }
}

impl<'a> DocExt for ElementRef<'a> {
    fn select_first(&self, sel: &Selector) -> Option<ElementRef> {
        self.select(sel).next()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_complete_url() {
        let url = complete_url("/signin", "signin.aws.amazon.com").unwrap();
        assert_eq!(url, Url::parse("https://signin.aws.amazon.com/signin").unwrap());

        // If `link` is already fully qualified, 2nd argument is ignored:
        let url = complete_url(
            "https://123456789012.signin.aws.amazon.com/console",
            "example.com",
        )
        .unwrap();
        assert_eq!(
            url,
            Url::parse("https://123456789012.signin.aws.amazon.com/console").unwrap()
        );

        // Trailling slash will be removed:
        let url = complete_url("/console/", "signin.aws.amazon.com").unwrap();
        assert_eq!(url, Url::parse("https://signin.aws.amazon.com/console").unwrap());
    }

    #[test]
    fn inner_text_joins_descendants() {
        let doc = Html::parse_fragment("<div> <span>lab</span>-<b>poridhi</b> </div>");
        let sel = selector_must_parsed("div");
        let div = doc.select_first(&sel).unwrap();
        assert_eq!(inner_text(div), "lab-poridhi");
    }
}
