mod client;
mod urls;

pub use client::PoridhiClient;
pub use urls::{PoridhiUrlAnalyzer, DOMAIN};
