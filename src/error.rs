use std::fmt::{Display, Formatter};

/// Errors that may occur while turning the schedule page into a feed.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
  pub kind: ErrorKind,
  pub message: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
  /// A structurally required element is not on the page.
  MissingAnchor,
  /// A matched element does not start with a text node.
  MissingText,
  InvalidDay,
  InvalidMonth,
  InvalidDuration,
  /// Month labels and day groups do not line up.
  MonthMismatch,
  Http,
  Storage,
}

impl Error {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}: {}", self.kind, self.message)
  }
}

impl std::error::Error for Error {}

impl From<ureq::Error> for Error {
  fn from(e: ureq::Error) -> Self {
    Self {
      kind: ErrorKind::Http,
      message: format!("{e:?}"),
    }
  }
}

impl From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Self {
    Self {
      kind: ErrorKind::Storage,
      message: e.to_string(),
    }
  }
}

impl From<url::ParseError> for Error {
  fn from(e: url::ParseError) -> Self {
    Self {
      kind: ErrorKind::Storage,
      message: e.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_names_the_kind() {
    let error = Error::new(ErrorKind::InvalidDay, "\"x\" is not a day");

    assert_eq!(error.to_string(), "InvalidDay: \"x\" is not a day");
  }

  #[test]
  fn io_errors_are_storage_errors() {
    let error = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));

    assert_eq!(error.kind, ErrorKind::Storage);
  }
}
