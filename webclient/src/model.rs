use async_trait::async_trait;

use crate::error::*;
use crate::fill::FillOutcome;

pub use reqwest::Url;
pub use scraper::{ElementRef, Html};

pub mod record;
pub use record::CredentialRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum LabSite {
    Poridhi,
}

impl LabSite {
    pub const fn lowercase(&self) -> &'static str {
        use LabSite::*;
        match self {
            Poridhi => "poridhi",
        }
    }
}

/// One of the six credential fields, with the metadata the interactive
/// surfaces need (display name, secret or not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredField {
    ConsoleLink,
    Username,
    Password,
    AccessKey,
    SecretKey,
    SessionToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredFieldKind {
    Text,
    Secret,
}

impl CredField {
    pub const ALL: [CredField; 6] = [
        CredField::ConsoleLink,
        CredField::Username,
        CredField::Password,
        CredField::AccessKey,
        CredField::SecretKey,
        CredField::SessionToken,
    ];

    pub const fn name(&self) -> &'static str {
        use CredField::*;
        match self {
            ConsoleLink => "console-link",
            Username => "username",
            Password => "password",
            AccessKey => "access-key",
            SecretKey => "secret-key",
            SessionToken => "session-token",
        }
    }

    pub const fn kind(&self) -> CredFieldKind {
        use CredField::*;
        match self {
            ConsoleLink | Username | AccessKey => CredFieldKind::Text,
            Password | SecretKey | SessionToken => CredFieldKind::Secret,
        }
    }
}

/// Which parser tiers actually ran for one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    StructuredWalk,
    LinePairs,
    RegexScan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    pub record: CredentialRecord,
    pub tiers_run: Vec<ParseTier>,
}

#[async_trait]
pub trait LabClient: Send + Sync {
    fn site(&self) -> LabSite;

    fn is_lab_url(&self, url: &Url) -> bool;

    fn is_console_signin_url(&self, url: &Url) -> bool;

    /// Fetch the lab dashboard page and extract the credential block.
    /// `Ok(None)` means the page had no recognizable credentials yet.
    async fn fetch_credentials(&self, page_url: &Url) -> Result<Option<ExtractReport>>;

    /// Fetch the console sign-in page and submit the login form filled
    /// with `record`.
    async fn fill_console_login(
        &self,
        console_url: &Url,
        record: &CredentialRecord,
    ) -> Result<FillOutcome>;
}
