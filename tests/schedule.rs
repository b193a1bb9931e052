use anime_schedule_scrape::animeschedule::AnimeScheduleSource;
use anime_schedule_scrape::error::{EntryError, TimeError};
use anime_schedule_scrape::extract::parse_fragments;
use anime_schedule_scrape::schedule::build_schedule;
use anime_schedule_scrape::{Poster, RawShowEntry, ScheduleBuilder, ScheduleSource};
use chrono::Weekday;
use chrono_tz::Europe::Paris;
use chrono_tz::Tz;

const TIMETABLE: &str = include_str!("fixtures/timetable.html");

fn raw(title: &str, episode: &str, time: Option<&str>, img: &str) -> RawShowEntry {
    RawShowEntry {
        title: title.into(),
        episode: episode.into(),
        air_time: time.map(str::to_string),
        poster: Poster::Url(img.into()),
    }
}

#[test]
fn fixture_page() {
    let source = AnimeScheduleSource::default();
    let outcome = ScheduleBuilder::new(Paris).build(source.parse_fragments(TIMETABLE));
    let schedule = &outcome.schedule;

    assert_eq!(schedule.len(), 3);

    let monday: Vec<_> = schedule
        .day(Weekday::Mon)
        .iter()
        .map(|s| (s.title.as_str(), s.episode.as_str(), s.air_time.slot()))
        .collect();
    assert_eq!(
        monday,
        [
            ("Show A", "Ep 2", "15:00".to_string()),
            ("Crossing Midnight", "Ep 7", "00:30".to_string()),
        ]
    );
    assert_eq!(
        schedule.day(Weekday::Mon)[0].poster,
        Poster::Url("https://animeschedule.net/img/show-a.webp".into())
    );

    let sunday = schedule.day(Weekday::Sun);
    assert_eq!(sunday.len(), 1);
    assert_eq!(sunday[0].title, "Late Night");
    assert_eq!(sunday[0].air_time.slot(), "23:30");

    let dropped: Vec<_> = outcome
        .diagnostics
        .iter()
        .map(|d| (d.index, d.error.clone()))
        .collect();
    assert_eq!(
        dropped,
        [
            (2, EntryError::MissingAirTime("Show B".into())),
            (5, EntryError::MissingTitle),
            (
                6,
                EntryError::Time {
                    title: "No Offset".into(),
                    source: TimeError::MissingOffset("2024-03-10T12:00:00".into()),
                }
            ),
        ]
    );
}

#[test]
fn duplicate_scenario_in_utc_plus_one() {
    let schedule = build_schedule(
        vec![
            raw("Show A", "Ep 1", Some("2024-03-04T14:00:00Z"), "a.jpg"),
            raw("Show A", "Ep 2", Some("2024-03-04T14:00:00Z"), "a.jpg"),
            raw("Show B", "Ep 1", None, "b.jpg"),
        ],
        // POSIX sign convention: Etc/GMT-1 is UTC+1.
        "Etc/GMT-1".parse::<Tz>().unwrap(),
    );
    let monday = schedule.day(Weekday::Mon);
    assert_eq!(monday.len(), 1);
    assert_eq!(monday[0].title, "Show A");
    assert_eq!(monday[0].episode, "Ep 2");
    assert!(
        schedule
            .iter()
            .all(|(_, shows)| shows.iter().all(|s| s.title != "Show B"))
    );
}

#[test]
fn one_bad_entry_does_not_spoil_the_batch() {
    let cards: String = [
        ("A", "2024-03-04T10:00:00Z"),
        ("B", "2024-03-05T10:00:00Z"),
        ("", "2024-03-06T10:00:00Z"),
        ("D", "2024-03-07T10:00:00Z"),
        ("E", "2024-03-08T10:00:00Z"),
    ]
    .iter()
    .map(|(title, time)| {
        let title = if title.is_empty() {
            String::new()
        } else {
            format!("<h2 class=\"show-title-bar\">{title}</h2>")
        };
        format!(
            "<div class=\"timetable-column-show\">{title}<span class=\"show-episode\">Ep 1</span>\
             <time class=\"show-air-time\" datetime=\"{time}\"></time></div>"
        )
    })
    .collect();

    let entries = parse_fragments(&cards);
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[2], Err(EntryError::MissingTitle));

    let outcome = ScheduleBuilder::new(Paris).build(entries);
    assert_eq!(outcome.schedule.len(), 4);
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(outcome.schedule.day(Weekday::Wed).is_empty());
}

#[test]
fn every_weekday_is_present_and_ordered() {
    let entries: Vec<_> = (0..40)
        .map(|i| {
            let day = 4 + i % 7;
            let hour = (i * 5) % 24;
            raw(
                &format!("Show {i}"),
                "Ep 1",
                Some(&format!("2024-03-{day:02}T{hour:02}:{:02}:00Z", i % 60)),
                "x.jpg",
            )
        })
        .collect();
    let schedule = build_schedule(entries, Paris);

    assert_eq!(schedule.iter().count(), 7);
    assert_eq!(schedule.len(), 40);
    for (day, shows) in schedule.iter() {
        for pair in shows.windows(2) {
            assert!(pair[0].air_time.instant() <= pair[1].air_time.instant());
        }
        assert!(shows.iter().all(|s| s.weekday() == day));
    }
}

#[test]
fn weekday_follows_the_converted_date() {
    // Sunday 10 March 2024, 23:30 UTC; Paris is still on winter time (UTC+1).
    let schedule = build_schedule(
        vec![raw("A", "Ep 1", Some("2024-03-10T23:30:00Z"), "a.jpg")],
        Paris,
    );
    assert!(schedule.day(Weekday::Sun).is_empty());
    assert_eq!(schedule.day(Weekday::Mon).len(), 1);

    let in_utc = build_schedule(
        vec![raw("A", "Ep 1", Some("2024-03-10T23:30:00Z"), "a.jpg")],
        Tz::UTC,
    );
    assert_eq!(in_utc.day(Weekday::Sun).len(), 1);
}
