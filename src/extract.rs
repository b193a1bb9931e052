//! Field extraction from one timetable fragment.
//!
//! A fragment is a `div.timetable-column-show` card. Every sub-field is read
//! as an `Option` first, so an absent node is an ordinary outcome that turns
//! into either a default or an [`EntryError`] for that single card.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::EntryError;
use crate::{Poster, RawShowEntry};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css}: {e}"))
}

static SHOW_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div.timetable-column-show"));
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("h2.show-title-bar"));
static EPISODE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("span.show-episode"));
static TIME_SEL: LazyLock<Selector> = LazyLock::new(|| selector("time.show-air-time"));
static POSTER_SEL: LazyLock<Selector> = LazyLock::new(|| selector("img.show-poster"));

/// Extract every show card of a timetable document, one result per card.
pub fn parse_fragments(document: &str) -> Vec<Result<RawShowEntry, EntryError>> {
    let doc = Html::parse_document(document);
    doc.select(&SHOW_SEL).map(extract).collect()
}

/// Pull title, episode label, air-time string and poster out of one card.
pub fn extract(card: ElementRef) -> Result<RawShowEntry, EntryError> {
    let title = card
        .select(&TITLE_SEL)
        .next()
        .map(text_of)
        .ok_or(EntryError::MissingTitle)?;
    if title.is_empty() {
        return Err(EntryError::EmptyTitle);
    }

    let episode = card
        .select(&EPISODE_SEL)
        .next()
        .map(text_of)
        .ok_or_else(|| EntryError::MissingEpisode(title.clone()))?;

    let air_time = card
        .select(&TIME_SEL)
        .next()
        .and_then(|t| non_empty_attr(t, "datetime"))
        .map(str::to_string);

    let poster = card
        .select(&POSTER_SEL)
        .next()
        .and_then(|img| non_empty_attr(img, "data-src").or_else(|| non_empty_attr(img, "src")))
        .map(|src| Poster::Url(src.to_string()))
        .unwrap_or(Poster::Unavailable);

    Ok(RawShowEntry {
        title,
        episode,
        air_time,
        poster,
    })
}

fn text_of(el: ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty_attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(inner: &str) -> Vec<Result<RawShowEntry, EntryError>> {
        parse_fragments(&format!(
            "<html><body><div class=\"timetable-column-show\">{inner}</div></body></html>"
        ))
    }

    #[test]
    fn full_card() {
        let got = card(
            r#"<h2 class="show-title-bar">  Frieren:
                 Beyond Journey's End </h2>
               <span class="show-episode">Ep 5</span>
               <time class="show-air-time" datetime="2024-03-04T14:00:00Z">14:00</time>
               <img class="show-poster" data-src="https://img/f.jpg" src="placeholder.gif">"#,
        );
        assert_eq!(
            got,
            vec![Ok(RawShowEntry {
                title: "Frieren: Beyond Journey's End".into(),
                episode: "Ep 5".into(),
                air_time: Some("2024-03-04T14:00:00Z".into()),
                poster: Poster::Url("https://img/f.jpg".into()),
            })]
        );
    }

    #[test]
    fn poster_falls_back_to_src_then_sentinel() {
        let src_only = card(
            r#"<h2 class="show-title-bar">A</h2><span class="show-episode">1</span>
               <img class="show-poster" data-src="" src="/a.jpg">"#,
        );
        assert_eq!(src_only[0].as_ref().unwrap().poster, Poster::Url("/a.jpg".into()));

        let none = card(r#"<h2 class="show-title-bar">A</h2><span class="show-episode">1</span>"#);
        assert_eq!(none[0].as_ref().unwrap().poster, Poster::Unavailable);

        let empty_src = card(
            r#"<h2 class="show-title-bar">A</h2><span class="show-episode">1</span>
               <img class="show-poster" src="  ">"#,
        );
        assert_eq!(empty_src[0].as_ref().unwrap().poster, Poster::Unavailable);
    }

    #[test]
    fn missing_time_is_not_an_extraction_error() {
        let got = card(
            r#"<h2 class="show-title-bar">A</h2><span class="show-episode">1</span>
               <time class="show-air-time">soon</time>"#,
        );
        assert_eq!(got[0].as_ref().unwrap().air_time, None);
    }

    #[test]
    fn required_fields() {
        assert_eq!(
            card(r#"<span class="show-episode">1</span>"#),
            vec![Err(EntryError::MissingTitle)]
        );
        assert_eq!(
            card(r#"<h2 class="show-title-bar">  </h2><span class="show-episode">1</span>"#),
            vec![Err(EntryError::EmptyTitle)]
        );
        assert_eq!(
            card(r#"<h2 class="show-title-bar">A</h2>"#),
            vec![Err(EntryError::MissingEpisode("A".into()))]
        );
    }

    #[test]
    fn bad_card_does_not_hide_neighbours() {
        let html = r#"
            <div class="timetable-column-show"><h2 class="show-title-bar">A</h2><span class="show-episode">1</span></div>
            <div class="timetable-column-show"><span class="show-episode">2</span></div>
            <div class="timetable-column-show"><h2 class="show-title-bar">C</h2><span class="show-episode">3</span></div>"#;
        let got = parse_fragments(html);
        assert_eq!(got.len(), 3);
        assert!(got[0].is_ok());
        assert!(got[1].is_err());
        assert_eq!(got[2].as_ref().unwrap().title, "C");
    }
}
