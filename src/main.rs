#![warn(
    clippy::all,
    // clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    // clippy::unwrap_used
)]
use chrono::Utc;
use clap::Parser;

use logger::LogExt;
use markup::Element;

mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
mod logger;
pub mod markup;
pub mod schedule;
pub mod storage;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logger::init(cli.log_format);

    let config = config::init(cli.config).log_error("failed to load configuration")?;
    log::debug!(config:? = config; "configuration");

    let destination = config.destination(cli.output).log_error("failed to resolve feed destination")?;
    let timezone = config.timezone().log_error("failed to resolve calendar timezone")?;
    let agent = fetch::agent(config.http_timeout());

    let html = fetch::page(&agent, &config.schedule_url).log_error("failed to get schedule page")?;
    let document = Element::parse_document(&html);

    let events = schedule::events_from_document(&document).log_error("failed to extract schedule")?;
    log::info!(events = events.len(); "normalized schedule");

    let options = feed::FeedOptions {
        name: config.calendar.name.clone(),
        timezone,
        generated_at: Utc::now(),
    };
    let calendar = feed::render(&events, &options).to_string();

    destination
        .write(&agent, calendar.as_bytes(), feed::CONTENT_TYPE)
        .log_error("failed to write calendar feed")?;

    log::info!("succeeded!");

    Ok(())
}
