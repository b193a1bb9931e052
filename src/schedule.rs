//! Weekday buckets: dedup, ordering and the finished [`WeeklySchedule`].

use std::collections::BTreeMap;

use chrono::Weekday;
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::EntryError;
use crate::time::{self, weekday_index};
use crate::{NormalizedShow, RawShowEntry};

/// Monday-first week, the fixed order of every schedule.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const FRENCH_DAYS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// Parse a weekday name: English (full or 3-letter) or French, any case.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim().to_lowercase();
    if let Ok(day) = name.parse::<Weekday>() {
        return Some(day);
    }
    FRENCH_DAYS
        .iter()
        .position(|d| *d == name)
        .map(|i| WEEK[i])
}

/// Which scraped entries count as the same show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DedupPolicy {
    /// One entry per title per weekday.
    #[default]
    #[value(name = "per-day")]
    TitlePerDay,
    /// One entry per title per `HH:MM` slot within a weekday.
    #[value(name = "per-slot")]
    TitlePerSlot,
}

/// Seven time-ordered buckets, Monday to Sunday. Every day is always present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklySchedule {
    days: [Vec<NormalizedShow>; 7],
}

impl WeeklySchedule {
    pub fn day(&self, day: Weekday) -> &[NormalizedShow] {
        &self.days[weekday_index(day)]
    }

    pub fn day_by_name(&self, name: &str) -> Option<&[NormalizedShow]> {
        parse_weekday(name).map(|d| self.day(d))
    }

    /// Days in Monday…Sunday order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[NormalizedShow])> {
        WEEK.iter().map(move |d| (*d, self.day(*d)))
    }

    /// Total number of shows across the week.
    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_day_len(&self) -> usize {
        self.days.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Copy keeping only `day`; the other six days are present but empty.
    pub fn only(&self, day: Weekday) -> WeeklySchedule {
        let mut narrowed = WeeklySchedule::default();
        let i = weekday_index(day);
        narrowed.days[i] = self.days[i].clone();
        narrowed
    }
}

/// An entry that was dropped, with its position in the raw batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub index: usize,
    pub error: EntryError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutcome {
    pub schedule: WeeklySchedule,
    pub diagnostics: Vec<Diagnostic>,
}

/// Place one extracted entry on the week.
pub fn normalize_entry(raw: RawShowEntry, tz: Tz) -> Result<NormalizedShow, EntryError> {
    let iso = raw
        .air_time
        .as_deref()
        .ok_or_else(|| EntryError::MissingAirTime(raw.title.clone()))?;
    let air_time = time::normalize(iso, tz).map_err(|source| EntryError::Time {
        title: raw.title.clone(),
        source,
    })?;
    Ok(NormalizedShow {
        title: raw.title,
        episode: raw.episode,
        air_time,
        poster: raw.poster,
    })
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleBuilder {
    tz: Tz,
    policy: DedupPolicy,
}

impl ScheduleBuilder {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            policy: DedupPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: DedupPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Build a fresh schedule. A failing entry is recorded and skipped; it
    /// never stops the rest of the batch.
    pub fn build<I>(&self, entries: I) -> BuildOutcome
    where
        I: IntoIterator<Item = Result<RawShowEntry, EntryError>>,
    {
        // (slot or "", title) -> show; later inserts overwrite earlier ones.
        let mut slots: [BTreeMap<(String, String), NormalizedShow>; 7] = Default::default();
        let mut diagnostics = Vec::new();

        for (index, entry) in entries.into_iter().enumerate() {
            match entry.and_then(|raw| normalize_entry(raw, self.tz)) {
                Ok(show) => {
                    let slot = match self.policy {
                        DedupPolicy::TitlePerDay => String::new(),
                        DedupPolicy::TitlePerSlot => show.air_time.slot(),
                    };
                    let bucket = &mut slots[weekday_index(show.weekday())];
                    if let Some(old) = bucket.insert((slot, show.title.clone()), show) {
                        debug!(title = %old.title, episode = %old.episode, "replaced by later duplicate");
                    }
                }
                Err(error) => {
                    warn!(index, %error, "dropping schedule entry");
                    diagnostics.push(Diagnostic { index, error });
                }
            }
        }

        let days = slots.map(|bucket| {
            let mut shows: Vec<NormalizedShow> = bucket.into_values().collect();
            shows.sort_by_key(|s| s.air_time.instant());
            shows
        });

        BuildOutcome {
            schedule: WeeklySchedule { days },
            diagnostics,
        }
    }
}

/// Convenience for callers that do not care about diagnostics.
pub fn build_schedule<I>(entries: I, tz: Tz) -> WeeklySchedule
where
    I: IntoIterator<Item = RawShowEntry>,
{
    ScheduleBuilder::new(tz).build(entries.into_iter().map(Ok)).schedule
}
