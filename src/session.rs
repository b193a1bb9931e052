//! Refresh cycle: fetch, extract, build, then publish a whole new [`Snapshot`].

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use tracing::{info, warn};

use crate::ScheduleSource;
use crate::error::FetchError;
use crate::schedule::{Diagnostic, ScheduleBuilder, WeeklySchedule};

/// Result of one successful refresh. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub schedule: WeeklySchedule,
    pub refreshed_at: DateTime<Utc>,
    pub diagnostics: Vec<Diagnostic>,
}

/// HTTP client for schedule sources: bounded request time, cookies kept.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().cookie_store(true).timeout(timeout).build()
}

/// Run one fetch-parse-build cycle.
pub async fn refresh<S>(
    source: &S,
    client: &Client,
    builder: &ScheduleBuilder,
) -> Result<Snapshot, FetchError>
where
    S: ScheduleSource + Sync + ?Sized,
{
    refresh_at(source, client, builder, Utc::now()).await
}

async fn refresh_at<S>(
    source: &S,
    client: &Client,
    builder: &ScheduleBuilder,
    now: DateTime<Utc>,
) -> Result<Snapshot, FetchError>
where
    S: ScheduleSource + Sync + ?Sized,
{
    let document = source.fetch(client).await?;
    let outcome = builder.build(source.parse_fragments(&document));
    info!(
        url = source.url(),
        shows = outcome.schedule.len(),
        dropped = outcome.diagnostics.len(),
        "schedule refreshed"
    );
    Ok(Snapshot {
        schedule: outcome.schedule,
        refreshed_at: now,
        diagnostics: outcome.diagnostics,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    Refreshed,
    UpToDate,
}

/// Owns the current snapshot and gates re-fetching within one run.
#[derive(Debug)]
pub struct Session {
    current: Option<Snapshot>,
    min_interval: TimeDelta,
}

impl Session {
    pub fn new(min_interval: TimeDelta) -> Self {
        Self {
            current: None,
            min_interval,
        }
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref().map(|s| s.refreshed_at)
    }

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.last_refreshed() {
            Some(at) => now - at >= self.min_interval,
            None => true,
        }
    }

    /// Refresh unless the last success is younger than the interval. On
    /// failure the previous snapshot stays in place.
    pub async fn refresh_if_stale<S>(
        &mut self,
        source: &S,
        client: &Client,
        builder: &ScheduleBuilder,
        now: DateTime<Utc>,
    ) -> Result<RefreshStatus, FetchError>
    where
        S: ScheduleSource + Sync + ?Sized,
    {
        if !self.is_stale(now) {
            return Ok(RefreshStatus::UpToDate);
        }
        self.force_refresh(source, client, builder, now).await
    }

    pub async fn force_refresh<S>(
        &mut self,
        source: &S,
        client: &Client,
        builder: &ScheduleBuilder,
        now: DateTime<Utc>,
    ) -> Result<RefreshStatus, FetchError>
    where
        S: ScheduleSource + Sync + ?Sized,
    {
        match refresh_at(source, client, builder, now).await {
            Ok(snapshot) => {
                self.current = Some(snapshot);
                Ok(RefreshStatus::Refreshed)
            }
            Err(e) => {
                warn!(error = %e, kept_previous = self.current.is_some(), "refresh failed");
                Err(e)
            }
        }
    }
}
