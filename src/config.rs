use std::path::PathBuf;

use chrono::{TimeDelta, Weekday};
use chrono_tz::Tz;
use clap::{Parser, ValueEnum};

use crate::animeschedule::DEFAULT_URL;
use crate::render::Lang;
use crate::schedule::{DedupPolicy, parse_weekday};
use crate::time::DEFAULT_TIMEZONE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Html,
    Json,
    Rss,
}

/// Scrape the weekly anime broadcast schedule and print it.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Timetable page to scrape
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// IANA timezone used to place shows on weekdays
    #[arg(long, default_value_t = DEFAULT_TIMEZONE, value_parser = parse_timezone)]
    pub timezone: Tz,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Only show this day, e.g. "monday" or "lundi". Text output defaults to today
    #[arg(long, value_parser = parse_day, conflicts_with = "week")]
    pub day: Option<Weekday>,

    /// Text output: list the whole week instead of today
    #[arg(long)]
    pub week: bool,

    /// Language of day labels
    #[arg(long, value_enum, default_value_t = Lang::En)]
    pub lang: Lang,

    /// Duplicate policy: one entry per title per day, or per title per time slot
    #[arg(long, value_enum, default_value_t = DedupPolicy::TitlePerDay)]
    pub dedup: DedupPolicy,

    /// Write output here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Keep running and re-render every --interval seconds
    #[arg(long)]
    pub watch: bool,

    /// Minimum seconds between refreshes in --watch mode
    #[arg(long, default_value_t = 3600, value_parser = parse_interval)]
    pub interval: u64,
}

impl Args {
    /// Day the output is narrowed to, if any. Text shows `today` unless
    /// `--week` is set; other formats keep the full week without `--day`.
    pub fn day_filter(&self, today: Weekday) -> Option<Weekday> {
        self.day
            .or((self.format == Format::Text && !self.week).then_some(today))
    }

    pub fn min_interval(&self) -> TimeDelta {
        i64::try_from(self.interval)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

fn parse_timezone(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>().map_err(|e| e.to_string())
}

fn parse_interval(s: &str) -> Result<u64, String> {
    let secs: u64 = s.parse().map_err(|e| format!("{e}"))?;
    if secs == 0 {
        return Err("interval must be at least one second".into());
    }
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .map(|_| secs)
        .ok_or_else(|| format!("interval of {secs} seconds is too large"))
}

fn parse_day(s: &str) -> Result<Weekday, String> {
    parse_weekday(s).ok_or_else(|| format!("unknown weekday {s:?}"))
}
