mod event;
mod extract;
mod normalize;

pub use event::*;
pub use extract::*;
pub use normalize::*;

use crate::error::Error;
use crate::markup::Element;

/// Extracts and normalizes every event on a schedule page, in document order.
///
/// # Errors
/// Returns an error if the page structure is not the expected schedule layout.
pub fn events_from_document(root: &Element) -> Result<Vec<Event>, Error> {
  let groups = group_by_month(day_entries(root)?);
  let months = months(root)?;
  log::info!(months:? = months, groups = groups.len(); "extracted schedule");

  normalize(&months, &groups)
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Timelike};

  use super::*;
  use crate::error::ErrorKind;

  const FIXTURE: &str = r#"<!DOCTYPE html>
<html lang="ja">
<head><title>SCHEDULE</title></head>
<body>
  <div class="p-schedule">
    <div class="p-schedule-header">
      <div class="swiper">
        <div class="swiper-wrapper">
          <div class="swiper-slide">2024.2</div>
          <div class="swiper-slide">2024.3</div>
        </div>
      </div>
    </div>
    <div class="p-schedule-body">
      <div class="p-schedule-body__item">
        <div class="num">1</div>
        <div class="events"><p>10:00〜朝の会</p></div>
      </div>
      <div class="p-schedule-body__item">
        <div class="num">28</div>
        <div class="events"><p>お休み</p></div>
      </div>
      <div class="p-schedule-body__item">
        <div class="num">1</div>
        <div class="events"><p>「アイカツアカデミー！配信部」デミカツ通信</p></div>
      </div>
    </div>
  </div>
</body>
</html>"#;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn two_month_schedule() {
    let root = Element::parse_document(FIXTURE);

    let events = events_from_document(&root).unwrap();

    assert_eq!(events.len(), 3);

    assert_eq!(events[0].summary, "朝の会");
    assert_eq!(events[0].start_date(), date(2024, 2, 1));
    assert!(!events[0].all_day);
    assert_eq!(events[0].start.hour(), 10);

    assert_eq!(events[1].summary, "お休み");
    assert_eq!(events[1].start_date(), date(2024, 2, 28));
    assert!(events[1].all_day);

    assert_eq!(events[2].summary, "「アイカツアカデミー！配信部」デミカツ通信");
    assert_eq!(events[2].start, date(2024, 3, 1).and_hms_opt(20, 0, 0).unwrap());
    assert_eq!(events[2].end, date(2024, 3, 1).and_hms_opt(21, 0, 0).unwrap());
    assert!(!events[2].all_day);
  }

  #[test]
  fn reruns_are_identical() {
    let first = events_from_document(&Element::parse_document(FIXTURE)).unwrap();
    let second = events_from_document(&Element::parse_document(FIXTURE)).unwrap();

    assert_eq!(first, second);
  }

  #[test]
  fn missing_month_label_is_fatal() {
    let html = FIXTURE.replace(r#"<div class="swiper-slide">2024.3</div>"#, "");

    let error = events_from_document(&Element::parse_document(&html)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::MonthMismatch);
  }

  #[test]
  fn changed_layout_is_fatal() {
    let html = FIXTURE.replace("p-schedule-body\"", "p-schedule-body c-list\"");

    let error = events_from_document(&Element::parse_document(&html)).unwrap_err();
    assert_eq!(error.kind, ErrorKind::MissingAnchor);
  }
}
