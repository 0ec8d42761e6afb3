use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarDateTime, Component as _, DatePerhapsTime, EventLike as _};

use crate::schedule::Event;

pub const CONTENT_TYPE: &str = "text/calendar";

#[derive(Debug, Clone)]
pub struct FeedOptions {
  pub name: String,
  pub timezone: Option<Tz>,
  /// `DTSTAMP` of every event.
  pub generated_at: DateTime<Utc>,
}

/// Renders events into one calendar, keeping their order.
pub fn render(events: &[Event], options: &FeedOptions) -> Calendar {
  let mut calendar = Calendar::new();
  calendar.name(&options.name);

  if let Some(tz) = options.timezone {
    calendar.timezone(tz.name());
  }

  for event in events {
    calendar.push(vevent(event, options));
  }

  calendar.done()
}

fn vevent(event: &Event, options: &FeedOptions) -> icalendar::Event {
  let mut vevent = icalendar::Event::new();
  vevent
    .uid(&event.uid)
    .summary(&event.summary)
    .timestamp(options.generated_at);

  if event.all_day {
    vevent.starts(event.start_date()).ends(event.end_date());
  } else {
    vevent
      .starts(date_time(event.start, options.timezone))
      .ends(date_time(event.end, options.timezone));
  }

  vevent.done()
}

fn date_time(date_time: NaiveDateTime, timezone: Option<Tz>) -> DatePerhapsTime {
  DatePerhapsTime::DateTime(timezone.map_or(CalendarDateTime::Floating(date_time), |tz| {
    CalendarDateTime::WithTimezone {
      date_time,
      tzid: tz.name().to_owned(),
    }
  }))
}
