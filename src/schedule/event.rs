use chrono::{Days, NaiveDate, NaiveDateTime, TimeDelta};
use data_encoding::BASE32HEX_NOPAD;
use sha2::{Digest, Sha256};

pub const UID_NAMESPACE: &str = "dmkt-schedule";
pub const UID_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
pub const EVENT_DURATION: TimeDelta = TimeDelta::hours(1);

/// A normalized schedule entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
  pub uid: String,
  pub summary: String,
  pub all_day: bool,
  pub start: NaiveDateTime,
  pub end: NaiveDateTime,
}

impl Event {
  pub fn new(summary: String, all_day: bool, start: NaiveDateTime) -> Self {
    Self {
      uid: uid(&summary, start),
      summary,
      all_day,
      start,
      end: start + EVENT_DURATION,
    }
  }

  pub const fn start_date(&self) -> NaiveDate {
    self.start.date()
  }

  /// Exclusive end date for all-day rendering.
  pub fn end_date(&self) -> NaiveDate {
    self.start_date() + Days::new(1)
  }
}

/// Content hash of title and start, stable across runs.
pub fn uid(summary: &str, start: NaiveDateTime) -> String {
  let mut hasher = Sha256::new();
  hasher.update(UID_NAMESPACE);
  hasher.update(summary);
  hasher.update(start.format(UID_TIME_FORMAT).to_string());

  BASE32HEX_NOPAD.encode(&hasher.finalize()).to_lowercase()
}
