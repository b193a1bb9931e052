//! Air-time parsing and conversion into the target timezone.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::TimeError;

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Paris;

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// An absolute broadcast instant, held as civil time in the target zone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AirTime {
    local: DateTime<Tz>,
}

impl AirTime {
    pub fn instant(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }

    pub fn local(&self) -> &DateTime<Tz> {
        &self.local
    }

    /// Weekday of the converted civil date, never of the source date.
    pub fn weekday(&self) -> Weekday {
        self.local.weekday()
    }

    /// Display slot: local time truncated to the minute, `HH:MM`.
    pub fn slot(&self) -> String {
        format!("{:02}:{:02}", self.local.hour(), self.local.minute())
    }
}

/// Parse an ISO-8601 date-time carrying `Z` or an explicit offset and
/// convert it to `tz`.
pub fn normalize(iso: &str, tz: Tz) -> Result<AirTime, TimeError> {
    let parsed = parse_offset_datetime(iso)?;
    Ok(AirTime {
        local: parsed.with_timezone(&tz),
    })
}

fn parse_offset_datetime(iso: &str) -> Result<DateTime<FixedOffset>, TimeError> {
    let mut s = iso.trim().to_string();
    if s.ends_with('Z') || s.ends_with('z') {
        s.pop();
        s.push_str("+00:00");
    }
    // Accept "YYYY-MM-DD HH:MM" as well as the T separator.
    if s.len() > 10 && s.as_bytes()[10] == b' ' {
        s.replace_range(10..11, "T");
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&s, fmt) {
            return Ok(dt);
        }
    }
    if NAIVE_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(&s, fmt).is_ok())
    {
        return Err(TimeError::MissingOffset(iso.to_string()));
    }
    Err(TimeError::Unparsable(iso.to_string()))
}

/// Index in a Monday-first week: 0 = Monday … 6 = Sunday.
pub fn weekday_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// Current weekday in `tz`.
pub fn today(tz: Tz) -> Weekday {
    Utc::now().with_timezone(&tz).weekday()
}
