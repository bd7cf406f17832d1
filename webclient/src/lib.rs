// exported modules
pub mod driver;
pub mod error;
pub mod fill;
pub mod locator;
pub mod model;
pub mod parser;
pub mod patterns;

// client impls
pub mod poridhi;

// re-exports
pub use error::*;
pub use model::*;
pub use poridhi::PoridhiClient;

pub fn new_client(site: LabSite) -> Box<dyn LabClient> {
    use LabSite::*;
    match site {
        Poridhi => Box::new(PoridhiClient::new()),
    }
}

pub fn detect_site_from_url(url: &Url) -> Option<LabSite> {
    use strum::IntoEnumIterator;
    LabSite::iter().find(|s| match s {
        LabSite::Poridhi => poridhi::PoridhiUrlAnalyzer::is_lab_url(url),
    })
}

// internal modules
mod http;
mod util;
