use thiserror::Error;

/// The schedule page could not be fetched. The only error that reaches the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
}

/// Why an air-time string could not be turned into an instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("air time {0:?} carries no UTC offset")]
    MissingOffset(String),
    #[error("air time {0:?} is not an ISO-8601 date-time")]
    Unparsable(String),
}

/// Why a single raw entry was dropped. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("missing title element")]
    MissingTitle,
    #[error("title element is empty")]
    EmptyTitle,
    #[error("missing episode element for {0:?}")]
    MissingEpisode(String),
    #[error("no air time for {0:?}")]
    MissingAirTime(String),
    #[error("bad air time for {title:?}: {source}")]
    Time {
        title: String,
        #[source]
        source: TimeError,
    },
}
