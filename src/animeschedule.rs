//! Source for AnimeSchedule (https://animeschedule.net).
//! The landing page carries the current week as `div.timetable-column-show` cards,
//! each with a `<time datetime>` in UTC.

use reqwest::{Client, Url, header};
use tracing::debug;

use crate::error::{EntryError, FetchError};
use crate::extract::parse_fragments;
use crate::{Poster, RawShowEntry, ScheduleSource};

pub const DEFAULT_URL: &str = "https://animeschedule.net";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

pub struct AnimeScheduleSource {
    url: String,
}

impl AnimeScheduleSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Resolve a poster reference against the page it was found on.
/// Anything that does not form a valid URL becomes `Unavailable`.
fn resolve_poster(page: Option<&Url>, src: &str) -> Poster {
    let resolved = match page {
        Some(page) => page.join(src),
        None => Url::parse(src),
    };
    match resolved {
        Ok(url) => Poster::Url(url.to_string()),
        Err(e) => {
            debug!(src, error = %e, "poster reference does not resolve");
            Poster::Unavailable
        }
    }
}

impl Default for AnimeScheduleSource {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

#[async_trait::async_trait]
impl ScheduleSource for AnimeScheduleSource {
    async fn fetch(&self, client: &Client) -> Result<String, FetchError> {
        let http = |source| FetchError::Http {
            url: self.url.clone(),
            source,
        };
        let resp = client
            .get(&self.url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(http)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        resp.text().await.map_err(http)
    }

    fn parse_fragments(&self, document: &str) -> Vec<Result<RawShowEntry, EntryError>> {
        let page = Url::parse(&self.url).ok();
        let entries: Vec<_> = parse_fragments(document)
            .into_iter()
            .map(|entry| {
                entry.map(|mut raw| {
                    if let Poster::Url(src) = &raw.poster {
                        raw.poster = resolve_poster(page.as_ref(), src);
                    }
                    raw
                })
            })
            .collect();
        debug!(cards = entries.len(), url = %self.url, "parsed timetable");
        entries
    }

    fn url(&self) -> &str {
        &self.url
    }
}
