use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, ErrorKind};

use super::{DayEntry, Event};

/// `<h>:<m>〜<title>`, the tilde may be followed by a half or full width space.
static TIMED: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"([0-9]+):([0-9]+)〜[ \x{3000}]?(.*)").expect("timed event pattern")
});

/// Segment always streamed at 20:00 without a time in its line.
pub const RECURRING_MARKER: &str = "「アイカツアカデミー！配信部」デミカツ通信";
pub const RECURRING_HOURS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
  Timed,
  Recurring,
  AllDay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
  pub kind: Kind,
  pub hours: u32,
  pub minutes: u32,
  pub title: String,
}

impl Classified {
  pub const fn is_all_day(&self) -> bool {
    matches!(self.kind, Kind::AllDay)
  }

  pub fn offset(&self) -> TimeDelta {
    TimeDelta::hours(i64::from(self.hours)) + TimeDelta::minutes(i64::from(self.minutes))
  }
}

/// Classifies a raw schedule line. Every line is timed, recurring or all-day.
///
/// # Errors
/// Returns an error if a matched hour or minute does not fit a `u32`.
pub fn classify(line: &str) -> Result<Classified, Error> {
  if let Some(captures) = TIMED.captures(line) {
    return Ok(Classified {
      kind: Kind::Timed,
      hours: duration_part(&captures[1], "hours")?,
      minutes: duration_part(&captures[2], "minutes")?,
      title: captures[3].to_owned(),
    });
  }

  if line.contains(RECURRING_MARKER) {
    return Ok(Classified {
      kind: Kind::Recurring,
      hours: RECURRING_HOURS,
      minutes: 0,
      title: line.to_owned(),
    });
  }

  Ok(Classified {
    kind: Kind::AllDay,
    hours: 0,
    minutes: 0,
    title: line.to_owned(),
  })
}

fn duration_part(digits: &str, unit: &str) -> Result<u32, Error> {
  digits.parse().map_err(|e| Error::new(
    ErrorKind::InvalidDuration,
    format!("{unit} {digits:?}: {e}"),
  ))
}

/// First day of the month named by a `YYYY.M` label, at midnight.
///
/// # Errors
/// Returns an error if the label is not a valid year and month.
pub fn month_anchor(label: &str) -> Result<NaiveDateTime, Error> {
  NaiveDate::parse_from_str(&format!("{}.1", label.trim()), "%Y.%m.%d")
    .map(|date| date.and_time(NaiveTime::default()))
    .map_err(|e| Error::new(ErrorKind::InvalidMonth, format!("month {label:?}: {e}")))
}

/// Turns month labels and their day groups into events in document order.
///
/// # Errors
/// Returns an error if the number of labels and groups differ, a label is
/// not a month, or a time does not parse.
pub fn normalize(months: &[String], groups: &[Vec<DayEntry>]) -> Result<Vec<Event>, Error> {
  if months.len() != groups.len() {
    return Err(Error::new(
      ErrorKind::MonthMismatch,
      format!("{} month labels for {} month groups", months.len(), groups.len()),
    ));
  }

  let mut events = Vec::new();

  for (index, (label, days)) in months.iter().zip(groups).enumerate() {
    let anchor = month_anchor(label)?;
    log::info!(index = index, month:% = anchor.date(); "month");

    for entry in days {
      let day = anchor + Days::new(u64::from(entry.day.saturating_sub(1)));

      for line in &entry.lines {
        let classified = classify(line)?;
        let start = day.checked_add_signed(classified.offset()).ok_or_else(|| Error::new(
          ErrorKind::InvalidDuration,
          format!("{}:{} after {day} is out of range", classified.hours, classified.minutes),
        ))?;
        let all_day = classified.is_all_day();
        let event = Event::new(classified.title, all_day, start);
        log::debug!(uid = event.uid.as_str(), summary = event.summary.as_str(), start:% = event.start, all_day = event.all_day; "event");
        events.push(event);
      }
    }
  }

  Ok(events)
}
