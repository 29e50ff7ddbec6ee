use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

use super::{FetchError, SnapshotSource};
use crate::model::Snapshot;

pub const CACHE_BUST_PARAM: &str = "ts";

pub struct HttpSource {
    url: Url,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("parse snapshot url {}", url))?;
        let client = reqwest::blocking::Client::builder()
            .user_agent("newsdesk")
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;
        Ok(Self { url, client })
    }

    /// The snapshot url with a `ts=<unix millis>` parameter so caches never answer.
    pub fn cache_busted_url(&self, unix_millis: i128) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair(CACHE_BUST_PARAM, &unix_millis.to_string());
        url
    }
}

impl SnapshotSource for HttpSource {
    fn fetch(&self) -> Result<Snapshot, FetchError> {
        let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let url = self.cache_busted_url(millis);
        tracing::debug!(%url, "fetching snapshot");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        let bytes = resp
            .bytes()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Snapshot::from_slice(&bytes).map_err(|err| FetchError::Malformed(err.to_string()))
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
