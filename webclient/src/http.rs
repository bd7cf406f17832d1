use std::{sync::Arc, time::Duration};

use ::tokio::sync::Mutex;
use ::tokio::time::{Interval, MissedTickBehavior};
use reqwest::header::{HeaderName, HeaderValue};
use serde::Serialize;

pub use ::reqwest::redirect;
pub use ::reqwest::{Error, IntoUrl, Request, Response};
pub type UrlGlob = ::glob::Pattern;

/// Thin reqwest wrapper that rate-limits requests per URL pattern, so
/// repeated polling of a dashboard or sign-in page stays polite.
#[derive(Clone)]
pub struct Client {
    inner: ::reqwest::Client,
    req_intervals: Vec<(UrlGlob, Arc<Mutex<Interval>>)>,
}

pub struct RequestBuilder {
    inner: ::reqwest::RequestBuilder,
    client: Client,
}

impl Client {
    pub fn new(
        redirection: self::redirect::Policy,
        url_wise_req_interval: impl IntoIterator<Item = (UrlGlob, Duration)>,
    ) -> Self {
        let req_intervals = url_wise_req_interval
            .into_iter()
            .map(|(pat, dur)| {
                let mut interval = ::tokio::time::interval(dur);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                (pat, Arc::new(Mutex::new(interval)))
            })
            .collect();
        Self {
            inner: reqwest::Client::builder()
                .cookie_store(true)
                .redirect(redirection)
                .gzip(true)
                .build()
                .unwrap(),
            req_intervals,
        }
    }

    pub fn get(&self, u: impl IntoUrl) -> RequestBuilder {
        RequestBuilder::new(self.inner.get(u), self.clone())
    }

    pub fn post(&self, u: impl IntoUrl) -> RequestBuilder {
        RequestBuilder::new(self.inner.post(u), self.clone())
    }

    async fn execute_request(&self, req: Request) -> Result<Response, Error> {
        let url_str = req.url().as_str();
        if let Some(interval) = self
            .req_intervals
            .iter()
            .find(|(pat, _)| pat.matches(url_str))
            .map(|(_, interval)| interval)
        {
            interval.lock().await.tick().await;
        }

        self.inner.execute(req).await
    }
}

impl RequestBuilder {
    fn new(b: ::reqwest::RequestBuilder, client: Client) -> Self {
        Self { inner: b, client }
    }

    pub async fn send(self) -> Result<Response, Error> {
        let req = self.inner.build()?;
        self.client.execute_request(req).await
    }

    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        self.inner = self.inner.form(form);
        self
    }

    pub fn header<K, V>(self, key: K, value: V) -> RequestBuilder
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<::http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<::http::Error>,
    {
        Self::new(self.inner.header(key, value), self.client)
    }
}
