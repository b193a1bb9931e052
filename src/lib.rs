//! Weekly anime broadcast schedule scraper.
//!
//! Raw timetable markup goes through [`extract`] (per-entry fields), [`time`]
//! (offset parsing and timezone conversion) and [`schedule`] (dedup, weekday
//! buckets, ordering). [`session`] runs that as a refresh cycle and the
//! [`render`] and [`feed`] modules turn the result into something to read.

use reqwest::Client;

pub mod animeschedule;
pub mod config;
pub mod error;
pub mod extract;
pub mod feed;
pub mod render;
pub mod schedule;
pub mod session;
pub mod time;

pub use error::{EntryError, FetchError, TimeError};
pub use schedule::{BuildOutcome, DedupPolicy, Diagnostic, ScheduleBuilder, WeeklySchedule};
pub use session::{Session, Snapshot};

/// Poster image reference of a show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Poster {
    Url(String),
    Unavailable,
}

impl Poster {
    pub fn url(&self) -> Option<&str> {
        match self {
            Poster::Url(u) => Some(u),
            Poster::Unavailable => None,
        }
    }
}

/// Fields pulled out of one timetable fragment, before any time handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawShowEntry {
    pub title: String,
    pub episode: String,
    pub air_time: Option<String>,
    pub poster: Poster,
}

/// A show placed on the week: converted air time and the weekday it falls on.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedShow {
    pub title: String,
    pub episode: String,
    pub air_time: time::AirTime,
    pub poster: Poster,
}

impl NormalizedShow {
    pub fn weekday(&self) -> chrono::Weekday {
        self.air_time.weekday()
    }
}

/// A website publishing a weekly timetable.
#[async_trait::async_trait]
pub trait ScheduleSource {
    /// Fetch the raw timetable document.
    async fn fetch(&self, client: &Client) -> Result<String, FetchError>;

    /// Split the document into per-show results, in document order.
    fn parse_fragments(&self, document: &str) -> Vec<Result<RawShowEntry, EntryError>>;

    /// URL the schedule is read from (used as the feed link).
    fn url(&self) -> &str;
}
