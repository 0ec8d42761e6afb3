use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono_tz::Tz;
use url::Url;

use crate::storage::{Credentials, Destination};

pub const DEFAULT_SCHEDULE_URL: &str = "https://aikatsu-academy.com/schedule/";

#[derive(Debug, serde::Deserialize)]
pub struct Config {
    #[serde(default = "default_schedule_url")]
    pub schedule_url: Url,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    #[serde(default)]
    pub gcs: Gcs,
    #[serde(default)]
    pub calendar: Calendar,
}

#[derive(Default, serde::Deserialize)]
pub struct Gcs {
    pub bucket: Option<String>,
    pub path: Option<String>,
    pub access_token: Option<String>,
}

impl core::fmt::Debug for Gcs {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gcs")
            .field("bucket", &self.bucket)
            .field("path", &self.path)
            .field("access_token", &self.access_token.as_ref().map(|_| "<hidden>"))
            .finish()
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Calendar {
    #[serde(default = "default_calendar_name")]
    pub name: String,
    pub timezone: Option<String>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            name: default_calendar_name(),
            timezone: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule_url: default_schedule_url(),
            http_timeout_secs: default_http_timeout(),
            gcs: Gcs::default(),
            calendar: Calendar::default(),
        }
    }
}

impl Config {
    /// Overrides settings with `SCHEDULE_URL`, `GCS_BUCKET`, `GCS_PATH`,
    /// `GCS_ACCESS_TOKEN`, `CALENDAR_NAME`, `CALENDAR_TIMEZONE` and `HTTP_TIMEOUT_SECS`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(url) = lookup("SCHEDULE_URL").filter(|url| !url.is_empty()) {
            self.schedule_url = Url::parse(&url).with_context(|| format!("SCHEDULE_URL {url:?}"))?;
        }
        if let Some(secs) = lookup("HTTP_TIMEOUT_SECS") {
            self.http_timeout_secs = secs.parse().with_context(|| format!("HTTP_TIMEOUT_SECS {secs:?}"))?;
        }

        if let Some(bucket) = lookup("GCS_BUCKET") {
            self.gcs.bucket = Some(bucket);
        }
        if let Some(path) = lookup("GCS_PATH") {
            self.gcs.path = Some(path);
        }
        if let Some(token) = lookup("GCS_ACCESS_TOKEN") {
            self.gcs.access_token = Some(token);
        }
        if let Some(name) = lookup("CALENDAR_NAME") {
            self.calendar.name = name;
        }
        if let Some(timezone) = lookup("CALENDAR_TIMEZONE") {
            self.calendar.timezone = Some(timezone);
        }

        Ok(())
    }

    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn timezone(&self) -> anyhow::Result<Option<Tz>> {
        self.calendar
            .timezone
            .as_deref()
            .map(|name| Tz::from_str(name).map_err(|e| anyhow::anyhow!("CALENDAR_TIMEZONE {name:?}: {e}")))
            .transpose()
    }

    /// Where the feed goes: `output` when given, Cloud Storage otherwise.
    pub fn destination(&self, output: Option<PathBuf>) -> anyhow::Result<Destination> {
        if let Some(path) = output {
            return Ok(Destination::File(path));
        }

        let Some(bucket) = self.gcs.bucket.clone() else {
            bail!("GCS_BUCKET must be set");
        };
        let Some(object) = self.gcs.path.clone() else {
            bail!("GCS_PATH must be set");
        };

        Ok(Destination::Gcs {
            bucket,
            object,
            credentials: Credentials::from(self.gcs.access_token.clone()),
        })
    }
}

pub fn init(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            let string = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&string)?
        }
        None => Config::default(),
    };

    config.apply_env(|key| std::env::var(key).ok())?;

    Ok(config)
}

fn default_schedule_url() -> Url {
    Url::parse(DEFAULT_SCHEDULE_URL).expect("default schedule url is valid")
}

const fn default_http_timeout() -> u64 {
    30
}

fn default_calendar_name() -> String {
    "デミカツ配信スケジュール".to_owned()
}
