use std::time::Duration;

use anime_schedule_scrape::animeschedule::AnimeScheduleSource;
use anime_schedule_scrape::config::{Args, Format};
use anime_schedule_scrape::session::{RefreshStatus, Session, http_client};
use anime_schedule_scrape::{ScheduleBuilder, Snapshot, feed, render, time};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = http_client(Duration::from_secs(args.timeout))?;
    let source = AnimeScheduleSource::new(args.url.clone());
    let builder = ScheduleBuilder::new(args.timezone).policy(args.dedup);
    let mut session = Session::new(args.min_interval());

    if !args.watch {
        session
            .force_refresh(&source, &client, &builder, Utc::now())
            .await?;
        if let Some(snapshot) = session.current() {
            emit(&args, snapshot)?;
        }
        return Ok(());
    }

    loop {
        match session
            .refresh_if_stale(&source, &client, &builder, Utc::now())
            .await
        {
            Ok(RefreshStatus::Refreshed) => {
                if let Some(snapshot) = session.current() {
                    emit(&args, snapshot)?;
                }
            }
            Ok(RefreshStatus::UpToDate) => {}
            // Keep showing the last good schedule.
            Err(e) => error!("{e}"),
        }
        tokio::time::sleep(Duration::from_secs(args.interval)).await;
    }
}

fn emit(args: &Args, snapshot: &Snapshot) -> Result<(), Box<dyn std::error::Error>> {
    let today = time::today(args.timezone);
    let filter = args.day_filter(today);
    let narrowed;
    let schedule = match filter {
        Some(day) => {
            narrowed = snapshot.schedule.only(day);
            &narrowed
        }
        None => &snapshot.schedule,
    };
    let out = match args.format {
        Format::Text => render::render_text(schedule, filter, args.lang),
        Format::Html => render::render_html(schedule, today, args.lang),
        Format::Json => render::render_json(schedule, today)?,
        Format::Rss => feed::generate_rss(schedule, &args.url, args.lang)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, out)?;
            info!(
                path = %path.display(),
                refreshed_at = %snapshot.refreshed_at,
                "schedule written"
            );
        }
        None => print!("{out}"),
    }
    Ok(())
}
