use crate::error::{Error, ErrorKind};
use crate::markup::{self, Element};

pub const HEADER_CLASS: &str = "p-schedule-header";
pub const SLIDE_CLASS: &str = "swiper-slide";
pub const BODY_CLASS: &str = "p-schedule-body";
pub const ITEM_CLASS: &str = "p-schedule-body__item";
pub const DAY_CLASS: &str = "num";
pub const LINE_TAG: &str = "p";

const CONTAINER_TAG: &str = "div";

/// One day cell of the schedule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
  pub day: u32,
  pub lines: Vec<String>,
}

impl DayEntry {
  pub fn new<S: Into<String>>(day: u32, lines: impl IntoIterator<Item = S>) -> Self {
    Self {
      day,
      lines: lines.into_iter().map(Into::into).collect(),
    }
  }
}

fn required<'a>(root: &'a Element, class: &str) -> Result<&'a Element, Error> {
  markup::find_first(root, CONTAINER_TAG, class).ok_or_else(|| Error::new(
    ErrorKind::MissingAnchor,
    format!("not found <{CONTAINER_TAG} class=\"{class}\">"),
  ))
}

/// Month labels of the schedule header, one per slide, in document order.
///
/// # Errors
/// Returns an error if the header is missing or a slide has no text label.
pub fn months(root: &Element) -> Result<Vec<String>, Error> {
  let header = required(root, HEADER_CLASS)?;
  let slides = markup::find_all(header, CONTAINER_TAG, SLIDE_CLASS);
  log::debug!(slides = slides.len(); "found schedule header");

  slides
    .into_iter()
    .map(|slide| markup::first_text(slide).map(|label| label.trim().to_owned()))
    .collect()
}

/// Every day cell of the schedule body in document order.
///
/// # Errors
/// Returns an error if the body is missing, a day number is missing or not
/// numeric, or an event line has no text.
pub fn day_entries(root: &Element) -> Result<Vec<DayEntry>, Error> {
  let body = required(root, BODY_CLASS)?;
  let items = markup::find_all(body, CONTAINER_TAG, ITEM_CLASS);
  log::debug!(items = items.len(); "found schedule body");

  items
    .into_iter()
    .map(day_entry)
    .collect()
}

fn day_entry(item: &Element) -> Result<DayEntry, Error> {
  let num = required(item, DAY_CLASS)?;
  let text = markup::first_text(num)?.trim();
  let day = text.parse::<u32>().map_err(|e| Error::new(
    ErrorKind::InvalidDay,
    format!("day of month {text:?}: {e}"),
  ))?;

  if !(1..=31).contains(&day) {
    return Err(Error::new(ErrorKind::InvalidDay, format!("day of month {day} out of range")));
  }

  Ok(DayEntry::new(day, markup::collect_text(item, LINE_TAG)?))
}

/// Splits day cells into months; a month starts at every day 1.
///
/// The first cell always opens a group, so a schedule that starts mid-month
/// does not produce an empty leading group.
pub fn group_by_month(entries: Vec<DayEntry>) -> Vec<Vec<DayEntry>> {
  let mut groups: Vec<Vec<DayEntry>> = Vec::new();

  for entry in entries {
    match groups.last_mut() {
      Some(group) if entry.day != 1 => group.push(entry),
      _ => groups.push(vec![entry]),
    }
  }

  groups
}
