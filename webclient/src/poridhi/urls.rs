use crate::model::Url;
use crate::patterns::SIGNIN_DOMAIN;

pub const DOMAIN: &str = "poridhi.io";

pub struct PoridhiUrlAnalyzer;

impl PoridhiUrlAnalyzer {
    fn is_https(url: &Url) -> bool {
        url.scheme() == "https"
    }

    fn domain_matches(url: &Url, domain: &str) -> bool {
        url.domain()
            .map(|d| d == domain || d.ends_with(&format!(".{}", domain)))
            .unwrap_or(false)
    }

    pub fn is_lab_url(url: &Url) -> bool {
        Self::is_https(url) && Self::domain_matches(url, DOMAIN)
    }

    pub fn is_console_signin_url(url: &Url) -> bool {
        Self::is_https(url) && Self::domain_matches(url, SIGNIN_DOMAIN)
    }
}
