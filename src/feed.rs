use rss::{ChannelBuilder, ItemBuilder};

use crate::render::Lang;
use crate::schedule::WeeklySchedule;

/// Generate an RSS feed with one item per scheduled broadcast.
pub fn generate_rss(
    schedule: &WeeklySchedule,
    channel_link: &str,
    lang: Lang,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut items = Vec::new();

    for (day, shows) in schedule.iter() {
        for show in shows {
            let mut description_parts = vec![
                format!("{} {}", lang.day(day), show.air_time.slot()),
                show.episode.clone(),
            ];
            if let Some(poster) = show.poster.url() {
                description_parts.push(format!("<img src=\"{}\" alt=\"Poster\" />", poster));
            }

            let instant = show.air_time.instant();
            // Same title can air on several days; the instant keeps guids unique.
            let guid = rss::Guid {
                value: format!("{}#{}", show.title, instant.timestamp()),
                permalink: false,
            };

            let mut item_builder = ItemBuilder::default();
            item_builder.title(format!("{} - {}", show.title, show.episode));
            item_builder.link(channel_link.to_string());
            item_builder.description(description_parts.join("<br/>\n"));
            item_builder.guid(guid);
            item_builder.pub_date(instant.to_rfc2822());
            items.push(item_builder.build());
        }
    }

    let channel = ChannelBuilder::default()
        .title("Weekly anime schedule")
        .link(channel_link)
        .description("Broadcasts of the current week")
        .items(items)
        .build();

    let mut buf = Vec::new();
    channel.write_to(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}
