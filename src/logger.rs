use std::io::Write;

use clap::ValueEnum;
use env_logger::Env;
use log::kv::{Error, Key, Source as _, Value, VisitSource};
use log::{Level, Record};
use serde_json::{Map, Value as Json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
  /// One Cloud Logging structured entry per line.
  Json,
  Text,
}

pub fn init(format: Format) {
  let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

  if format == Format::Json {
    builder.format(|buf, record| writeln!(buf, "{}", entry(record)));
  }

  builder.init();
}

pub const fn severity(level: Level) -> &'static str {
  match level {
    Level::Error => "ERROR",
    Level::Warn => "WARNING",
    Level::Info => "INFO",
    Level::Debug | Level::Trace => "DEBUG",
  }
}

/// Structured log entry with `severity`, `message` and the record's key-values.
pub fn entry(record: &Record) -> Json {
  let mut fields = Map::new();
  fields.insert("severity".to_owned(), Json::from(severity(record.level())));
  fields.insert("message".to_owned(), Json::from(record.args().to_string()));
  fields.insert("target".to_owned(), Json::from(record.target()));

  // visiting a map never fails
  let _ = record.key_values().visit(&mut Fields(&mut fields));

  Json::Object(fields)
}

struct Fields<'a>(&'a mut Map<String, Json>);

impl<'kvs> VisitSource<'kvs> for Fields<'_> {
  fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
    let json = value
      .to_u64()
      .map(Json::from)
      .or_else(|| value.to_i64().map(Json::from))
      .or_else(|| value.to_bool().map(Json::from))
      .unwrap_or_else(|| Json::from(value.to_string()));

    self.0.insert(key.as_str().to_owned(), json);
    Ok(())
  }
}

pub trait LogExt<T> {
  fn log_error(self, step: &str) -> anyhow::Result<T>;
}

impl<T, E> LogExt<T> for Result<T, E> where E: Into<anyhow::Error> {
  /// Logs the failing step with the caller's location before propagating.
  #[track_caller]
  fn log_error(self, step: &str) -> anyhow::Result<T> {
    let location = std::panic::Location::caller();

    self.map_err(|error| {
      let error = error.into();
      log::error!(location:% = location, error:% = error; "{step}");

      error.context(step.to_owned())
    })
  }
}
