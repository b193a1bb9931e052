//! Text, static HTML and JSON views of a [`WeeklySchedule`].

use chrono::{Datelike, Weekday};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::schedule::WeeklySchedule;
use crate::time::weekday_index;
use crate::{NormalizedShow, Poster};

const POSTER_UNAVAILABLE: &str = "Poster unavailable";

/// Language of day and month labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Lang {
    #[default]
    En,
    Fr,
}

impl Lang {
    pub fn day(self, day: Weekday) -> &'static str {
        const EN: [&str; 7] = [
            "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
        ];
        const FR: [&str; 7] = [
            "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
        ];
        let i = weekday_index(day);
        match self {
            Lang::En => EN[i],
            Lang::Fr => FR[i],
        }
    }

    fn month(self, month0: u32) -> &'static str {
        const EN: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        const FR: [&str; 12] = [
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
            "septembre", "octobre", "novembre", "décembre",
        ];
        let i = month0 as usize % 12;
        match self {
            Lang::En => EN[i],
            Lang::Fr => FR[i],
        }
    }

    /// `DD Month YYYY` of the show's local air date.
    pub fn date(self, show: &NormalizedShow) -> String {
        let local = show.air_time.local();
        format!("{:02} {} {}", local.day(), self.month(local.month0()), local.year())
    }

    fn no_shows(self) -> &'static str {
        match self {
            Lang::En => "No shows",
            Lang::Fr => "Aucun anime pour ce jour",
        }
    }

    fn episode(self) -> &'static str {
        match self {
            Lang::En => "Episode",
            Lang::Fr => "Épisode",
        }
    }

    fn time(self) -> &'static str {
        match self {
            Lang::En => "Time",
            Lang::Fr => "Horaire",
        }
    }
}

/// Plain listing of one day, or of the whole week when `only` is `None`.
pub fn render_text(schedule: &WeeklySchedule, only: Option<Weekday>, lang: Lang) -> String {
    let mut out = String::new();
    for (day, shows) in schedule.iter() {
        if only.is_some_and(|d| d != day) {
            continue;
        }
        out.push_str(lang.day(day));
        out.push('\n');
        if shows.is_empty() {
            out.push_str(&format!("  {}\n", lang.no_shows()));
        }
        for show in shows {
            out.push_str(&format!(
                "  {}  {} ({})\n",
                show.air_time.slot(),
                show.title,
                show.episode
            ));
        }
        out.push('\n');
    }
    out
}

/// One-page weekly table, `current` day header highlighted.
pub fn render_html(schedule: &WeeklySchedule, current: Weekday, lang: Lang) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Anime schedule</title>\n\
         <style>\n\
         table { width: 100%; border-collapse: collapse; }\n\
         th, td { padding: 10px; border: 1px solid #ddd; text-align: left; vertical-align: top; }\n\
         th { background-color: #f4f4f4; }\n\
         img { width: 100px; height: auto; }\n\
         .current-day { background-color: #B0E0E6; font-weight: bold; }\n\
         </style>\n</head>\n<body>\n<table>\n<thead>\n<tr>",
    );

    for (day, _) in schedule.iter() {
        if day == current {
            html.push_str(&format!("<th class=\"current-day\">{}</th>", lang.day(day)));
        } else {
            html.push_str(&format!("<th>{}</th>", lang.day(day)));
        }
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in 0..schedule.max_day_len() {
        html.push_str("<tr>");
        for (_, shows) in schedule.iter() {
            html.push_str("<td>");
            if let Some(show) = shows.get(row) {
                html.push_str(&show_cell(show, lang));
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn show_cell(show: &NormalizedShow, lang: Lang) -> String {
    let poster = match &show.poster {
        Poster::Url(url) => format!(
            "<img src=\"{}\" alt=\"{}\" class=\"anime-poster\">",
            encode_double_quoted_attribute(url),
            encode_double_quoted_attribute(&show.title)
        ),
        Poster::Unavailable => format!("<p><em>{}</em></p>", POSTER_UNAVAILABLE),
    };
    format!(
        "<div><p><strong>{}</strong></p>{}<p>{}: {}</p><p>Date: {}</p><p>{}: {}</p></div>",
        encode_text(&show.title),
        poster,
        lang.time(),
        show.air_time.slot(),
        lang.date(show),
        lang.episode(),
        encode_text(&show.episode)
    )
}

#[derive(Serialize)]
struct JsonDay<'a> {
    day: &'static str,
    current: bool,
    shows: Vec<JsonShow<'a>>,
}

#[derive(Serialize)]
struct JsonShow<'a> {
    title: &'a str,
    episode: &'a str,
    air_time: String,
    slot: String,
    poster_url: Option<&'a str>,
}

/// Per-day lists as JSON, air times in RFC 3339 with the target zone offset.
pub fn render_json(schedule: &WeeklySchedule, current: Weekday) -> serde_json::Result<String> {
    let days: Vec<JsonDay> = schedule
        .iter()
        .map(|(day, shows)| JsonDay {
            day: Lang::En.day(day),
            current: day == current,
            shows: shows
                .iter()
                .map(|s| JsonShow {
                    title: &s.title,
                    episode: &s.episode,
                    air_time: s.air_time.local().to_rfc3339(),
                    slot: s.air_time.slot(),
                    poster_url: s.poster.url(),
                })
                .collect(),
        })
        .collect();
    serde_json::to_string_pretty(&days)
}
