use ::async_trait::async_trait;
use ::scraper::Html;
use ::std::time::Duration;

use super::urls::PoridhiUrlAnalyzer;
use crate::patterns::SIGNIN_DOMAIN;
use crate::{
    error::*,
    fill::{self, FillOutcome},
    locator,
    model::*,
    parser, util,
};

pub struct PoridhiClient {
    http: crate::http::Client,
}

impl PoridhiClient {
    pub fn new() -> Self {
        use ::glob::Pattern;
        Self {
            http: crate::http::Client::new(
                crate::http::redirect::Policy::none(),
                [
                    (
                        Pattern::new("https://poridhi.io*").unwrap(),
                        Duration::from_millis(600),
                    ),
                    (
                        Pattern::new("https://*.poridhi.io*").unwrap(),
                        Duration::from_millis(600),
                    ),
                    (
                        Pattern::new("https://*.signin.aws.amazon.com*").unwrap(),
                        Duration::from_millis(500),
                    ),
                ],
            ),
        }
    }

    /// Extraction over an already-parsed document; what
    /// [`LabClient::fetch_credentials`] runs after the fetch.
    pub fn extract_from_html(doc: &Html) -> Option<ExtractReport> {
        parser::extract_credentials(doc)
    }
}

impl Default for PoridhiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LabClient for PoridhiClient {
    fn site(&self) -> LabSite {
        LabSite::Poridhi
    }

    fn is_lab_url(&self, url: &Url) -> bool {
        PoridhiUrlAnalyzer::is_lab_url(url)
    }

    fn is_console_signin_url(&self, url: &Url) -> bool {
        PoridhiUrlAnalyzer::is_console_signin_url(url)
    }

    async fn fetch_credentials(&self, page_url: &Url) -> Result<Option<ExtractReport>> {
        if !self.is_lab_url(page_url) {
            return Err(Error::NotLabUrl(page_url.to_owned()));
        }
        let doc = util::fetch_html(&self.http, page_url.clone()).await?;
        let report = Self::extract_from_html(&doc);
        if report.is_none() && parser::looks_credential_markup(&util::inner_text(doc.root_element()))
        {
            log::debug!("page mentions credentials but the block is not parseable yet");
        }
        Ok(report)
    }

    async fn fill_console_login(
        &self,
        console_url: &Url,
        record: &CredentialRecord,
    ) -> Result<FillOutcome> {
        if !self.is_console_signin_url(console_url) {
            return Err(Error::NotConsoleSigninUrl(console_url.to_owned()));
        }

        // The document must not live across the submit await below.
        let form = {
            let doc = util::fetch_html(&self.http, console_url.clone()).await?;
            let form = fill::build_login_fill(&doc, record);
            if form.is_none() && locator::looks_login_markup(&doc.root_element().html()) {
                log::debug!("sign-in markup present at {} but nothing fillable yet", console_url);
            }
            form
        };
        let Some(form) = form else {
            log::debug!("no fillable sign-in field at {}", console_url);
            return Ok(FillOutcome::FieldsNotFound);
        };

        let submit_url = match &form.action {
            Some(action) => {
                util::complete_url(action, console_url.host_str().unwrap_or(SIGNIN_DOMAIN))?
            }
            None => console_url.clone(),
        };

        let resp = self
            .http
            .post(submit_url.clone())
            .form(&form.params)
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() || status.is_redirection() {
            log::info!("sign-in form submitted to {}", submit_url);
            Ok(FillOutcome::Submitted)
        } else {
            Err(Error::UnexpectedResponseCode {
                got: status,
                expected: reqwest::StatusCode::FOUND,
                requested_url: submit_url.to_string(),
            })
        }
    }
}
